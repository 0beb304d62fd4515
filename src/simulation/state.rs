//! The simulation state record
//!
//! One aggregate owned by the engine and mutated in place once per tick.
//! Everything outside the engine sees clones of it.

use serde::{Deserialize, Serialize};

use crate::core::calendar::Calendar;
use crate::core::types::{clamp_percent, clamp_to, Difficulty, SpeId, Tick};
use crate::scenario::difficulty::DifficultyProfile;
use crate::scenario::weather::Weather;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// Meltdown progress reached its ceiling
    CriticalMass,
    /// Core temperature hit the absolute ceiling
    CoreBreach,
    /// Pressure hit the absolute ceiling
    VesselRupture,
    /// Audit risk reached its ceiling
    FraudExposed,
    /// Stock score stayed at zero past the grace period
    Bankruptcy,
}

impl FailureReason {
    pub fn is_reactor_failure(self) -> bool {
        matches!(
            self,
            FailureReason::CriticalMass | FailureReason::CoreBreach | FailureReason::VesselRupture
        )
    }

    pub fn headline(self) -> &'static str {
        match self {
            FailureReason::CriticalMass => "CRITICAL MASS",
            FailureReason::CoreBreach => "CORE BREACH",
            FailureReason::VesselRupture => "VESSEL RUPTURE",
            FailureReason::FraudExposed => "FEDERAL RAID - FRAUD EXPOSED",
            FailureReason::Bankruptcy => "DELISTED - BANKRUPTCY",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.headline())
    }
}

/// Session lifecycle: running until a terminal condition fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionPhase {
    Running,
    GameOver { reason: FailureReason, tick: Tick },
}

/// Reactor lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactorPhase {
    Running,
    /// Meltdown progress is non-zero
    Melting,
    /// Terminal reactor failure
    Destroyed,
}

/// Status of a Special Purpose Entity; collapse is irreversible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpeStatus {
    Active,
    Collapsed { tick: Tick },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialPurposeEntity {
    pub id: SpeId,
    pub name: String,
    pub hidden_debt_amount: f64,
    pub trigger_stock_price: f64,
    status: SpeStatus,
}

impl SpecialPurposeEntity {
    pub fn new(id: SpeId, name: String, hidden_debt_amount: f64, trigger_stock_price: f64) -> Self {
        Self {
            id,
            name,
            hidden_debt_amount,
            trigger_stock_price,
            status: SpeStatus::Active,
        }
    }

    pub fn status(&self) -> SpeStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SpeStatus::Active
    }

    /// Collapse an active entity, returning the debt that comes back onto the
    /// books. A collapsed entity stays collapsed.
    pub fn collapse(&mut self, tick: Tick) -> Option<f64> {
        match self.status {
            SpeStatus::Active => {
                self.status = SpeStatus::Collapsed { tick };
                Some(self.hidden_debt_amount)
            }
            SpeStatus::Collapsed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorState {
    /// °C
    pub core_temperature: f64,
    /// PSI
    pub pressure: f64,
    pub radiation_level: f64,
    /// 0-100, 100 = fully inserted
    pub control_rod_insertion: f64,
    /// 0-100
    pub steam_valve_opening: f64,
    pub coolant_pump_on: bool,
    pub pump_health: f64,
    pub turbine_health: f64,
    pub condenser_health: f64,
    pub xenon_poison_level: f64,
    pub coolant_flow_rate: f64,
    pub net_reactivity: f64,
    pub meltdown_progress: f64,
    pub fuel_remaining: f64,
    /// 1-5
    pub pump_level: u8,
    pub has_auto_scram: bool,
    pub phase: ReactorPhase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridState {
    /// MW
    pub electrical_power_output: f64,
    /// MW before chapter and weather scaling
    pub grid_demand: f64,
    pub grid_frequency_hz: f64,
    pub brownout_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceState {
    pub stock_score: f64,
    pub operating_cash: f64,
    pub outstanding_loan: f64,
    pub credit_score: f64,
    pub offshore_holdings: f64,
    pub audit_risk_percent: f64,
    pub political_capital: f64,
    pub lobbying_shield_ticks_remaining: u32,
    /// Consecutive ticks the stock score has been pinned at zero
    pub ticks_at_zero_score: u32,
}

impl FinanceState {
    pub fn shield_active(&self) -> bool {
        self.lobbying_shield_ticks_remaining > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FraudState {
    pub special_purpose_entities: Vec<SpecialPurposeEntity>,
    /// Cumulative debt ever hidden; never decremented
    pub total_hidden_debt: f64,
    next_id: u32,
}

impl FraudState {
    pub fn active_count(&self) -> usize {
        self.special_purpose_entities
            .iter()
            .filter(|spe| spe.is_active())
            .count()
    }

    /// Register a new entity and account for its hidden debt
    pub fn open(&mut self, name: String, hidden_debt: f64, trigger_stock_price: f64) -> SpeId {
        let id = SpeId::new(self.next_id);
        self.next_id += 1;
        self.total_hidden_debt += hidden_debt;
        self.special_purpose_entities.push(SpecialPurposeEntity::new(
            id,
            name,
            hidden_debt,
            trigger_stock_price,
        ));
        id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub calendar: Calendar,
    /// Derived display string, e.g. "Jan 2000"
    pub calendar_date: String,
    pub current_weather: Weather,
    pub weather_demand_modifier: f64,
    pub weather_temperature_modifier: f64,
    /// Name of the scripted weather pattern in force, if any
    pub weather_pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaState {
    pub session: SessionPhase,
    pub difficulty_level: Difficulty,
    pub current_chapter_index: usize,
}

/// The complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub reactor: ReactorState,
    pub grid: GridState,
    pub finance: FinanceState,
    pub fraud: FraudState,
    pub timeline: Timeline,
    pub meta: MetaState,
}

impl SimulationState {
    /// Fresh state for a new session
    pub fn initial(difficulty: Difficulty, profile: &DifficultyProfile) -> Self {
        let calendar = Calendar::default();
        let calendar_date = calendar.display();

        Self {
            reactor: ReactorState {
                core_temperature: 300.0,
                pressure: 0.0,
                radiation_level: 0.0,
                control_rod_insertion: 100.0,
                steam_valve_opening: 0.0,
                coolant_pump_on: true,
                pump_health: 100.0,
                turbine_health: 100.0,
                condenser_health: 100.0,
                xenon_poison_level: 0.0,
                coolant_flow_rate: 100.0,
                net_reactivity: 0.0,
                meltdown_progress: 0.0,
                fuel_remaining: 100.0,
                pump_level: 1,
                has_auto_scram: false,
                phase: ReactorPhase::Running,
            },
            grid: GridState {
                electrical_power_output: 0.0,
                grid_demand: 600.0,
                grid_frequency_hz: 60.0,
                brownout_active: false,
            },
            finance: FinanceState {
                stock_score: profile.starting_stock_score,
                operating_cash: profile.starting_cash,
                outstanding_loan: 0.0,
                credit_score: 50.0,
                offshore_holdings: 0.0,
                audit_risk_percent: 0.0,
                political_capital: 10.0,
                lobbying_shield_ticks_remaining: 0,
                ticks_at_zero_score: 0,
            },
            fraud: FraudState::default(),
            timeline: Timeline {
                calendar,
                calendar_date,
                current_weather: Weather::Sunny,
                weather_demand_modifier: 1.0,
                weather_temperature_modifier: 1.0,
                weather_pattern: None,
            },
            meta: MetaState {
                session: SessionPhase::Running,
                difficulty_level: difficulty,
                current_chapter_index: 0,
            },
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.meta.session, SessionPhase::GameOver { .. })
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self.meta.session {
            SessionPhase::GameOver { reason, .. } => Some(reason),
            SessionPhase::Running => None,
        }
    }

    /// Enter the terminal phase. Only the first call has any effect.
    pub(crate) fn end_session(&mut self, reason: FailureReason, tick: Tick) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.meta.session = SessionPhase::GameOver { reason, tick };
        if reason.is_reactor_failure() {
            self.reactor.phase = ReactorPhase::Destroyed;
        }
        true
    }

    /// Restore every bounded field to its documented range
    pub fn clamp_bounds(&mut self, max_radiation: f64, max_frequency: f64) {
        let r = &mut self.reactor;
        r.control_rod_insertion = clamp_percent(r.control_rod_insertion);
        r.steam_valve_opening = clamp_percent(r.steam_valve_opening);
        r.pump_health = clamp_percent(r.pump_health);
        r.turbine_health = clamp_percent(r.turbine_health);
        r.condenser_health = clamp_percent(r.condenser_health);
        r.xenon_poison_level = clamp_percent(r.xenon_poison_level);
        r.meltdown_progress = clamp_percent(r.meltdown_progress);
        r.fuel_remaining = clamp_percent(r.fuel_remaining);
        r.radiation_level = clamp_to(r.radiation_level, max_radiation);
        r.pressure = clamp_to(r.pressure, f64::MAX);
        r.coolant_flow_rate = clamp_to(r.coolant_flow_rate, f64::MAX);

        let g = &mut self.grid;
        g.electrical_power_output = clamp_to(g.electrical_power_output, f64::MAX);
        g.grid_demand = clamp_to(g.grid_demand, f64::MAX);
        g.grid_frequency_hz = clamp_to(g.grid_frequency_hz, max_frequency);

        let f = &mut self.finance;
        f.stock_score = clamp_to(f.stock_score, f64::MAX);
        f.operating_cash = clamp_to(f.operating_cash, f64::MAX);
        f.outstanding_loan = clamp_to(f.outstanding_loan, f64::MAX);
        f.offshore_holdings = clamp_to(f.offshore_holdings, f64::MAX);
        f.credit_score = clamp_percent(f.credit_score);
        f.audit_risk_percent = clamp_percent(f.audit_risk_percent);
        f.political_capital = clamp_percent(f.political_capital);
    }
}
