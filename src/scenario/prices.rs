//! Price table for player actions

use serde::{Deserialize, Serialize};

use crate::core::types::Component;

/// Actions that carry a price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricedAction {
    RepairPump,
    RepairTurbine,
    RepairCondenser,
    CreateSpe,
    Lobby,
    Shred,
    Refuel,
    PumpUpgrade,
    AutoScram,
}

impl PricedAction {
    pub fn repair(component: Component) -> Self {
        match component {
            Component::Pump => PricedAction::RepairPump,
            Component::Turbine => PricedAction::RepairTurbine,
            Component::Condenser => PricedAction::RepairCondenser,
        }
    }
}

/// Prices keyed by action name
///
/// Everything is paid in operating cash except `create_spe`, which is
/// paid in stock-score points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    pub repair_pump: f64,
    pub repair_turbine: f64,
    pub repair_condenser: f64,
    pub create_spe: f64,
    pub lobby: f64,
    pub shred: f64,
    pub refuel: f64,
    /// Multiplied by the current pump level
    pub pump_upgrade: f64,
    pub auto_scram: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            repair_pump: 800.0,
            repair_turbine: 1200.0,
            repair_condenser: 1000.0,
            create_spe: 25.0,
            lobby: 2000.0,
            shred: 3000.0,
            refuel: 1500.0,
            pump_upgrade: 800.0,
            auto_scram: 2500.0,
        }
    }
}

impl PriceTable {
    pub fn price(&self, action: PricedAction) -> f64 {
        match action {
            PricedAction::RepairPump => self.repair_pump,
            PricedAction::RepairTurbine => self.repair_turbine,
            PricedAction::RepairCondenser => self.repair_condenser,
            PricedAction::CreateSpe => self.create_spe,
            PricedAction::Lobby => self.lobby,
            PricedAction::Shred => self.shred,
            PricedAction::Refuel => self.refuel,
            PricedAction::PumpUpgrade => self.pump_upgrade,
            PricedAction::AutoScram => self.auto_scram,
        }
    }

    pub fn repair(&self, component: Component) -> f64 {
        self.price(PricedAction::repair(component))
    }

    pub(crate) fn all(&self) -> [(PricedAction, f64); 9] {
        use PricedAction::*;
        [
            RepairPump,
            RepairTurbine,
            RepairCondenser,
            CreateSpe,
            Lobby,
            Shred,
            Refuel,
            PumpUpgrade,
            AutoScram,
        ]
        .map(|action| (action, self.price(action)))
    }
}
