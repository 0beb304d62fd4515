//! Simulation configuration with documented constants
//!
//! Every tunable number of the reactor, grid and fraud model lives here.
//! Values can be overridden from a TOML file; any key that is left out
//! keeps its default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{MeltdownError, Result};

/// Configuration for the simulation systems
///
/// With the defaults a fully withdrawn rod bank overshoots base grid
/// demand while the xenon inventory builds up. Rods left out overspeed the
/// turbine, and the wear drags output back under demand. Trimming the rods
/// against grid frequency holds 60 Hz in the first chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the engine's random source
    pub seed: u64,
    pub reactor: ReactorTuning,
    pub grid: GridTuning,
    pub meltdown: MeltdownTuning,
    pub finance: FinanceTuning,
    pub fraud: FraudTuning,
    pub lobbying: LobbyTuning,
    pub session: SessionTuning,
}

/// Neutronics and thermal-hydraulics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorTuning {
    // === CLOCK ===
    /// Hours added to the dial per tick
    ///
    /// At 0.05 the dial wraps every 480 ticks (24 s of wall clock at 20 Hz),
    /// and each wrap is one simulated week.
    pub hours_per_tick: f64,

    // === NEUTRONICS ===
    /// Temperature at which the temperature feedback term is zero (°C)
    pub reference_temperature: f64,
    /// Reactivity lost per point of xenon
    pub xenon_poison_coefficient: f64,
    /// Reactivity lost per °C above the reference temperature
    pub temperature_feedback_coefficient: f64,
    /// Net reactivity is clamped to `[-limit, limit]`
    pub reactivity_limit: f64,
    /// Xenon produced per MW of output
    pub xenon_production: f64,
    /// Xenon burned per (xenon point × MW)
    pub xenon_burn: f64,
    /// Fraction of xenon that decays each tick
    pub xenon_decay: f64,
    /// Fuel below this level starts starving the reaction
    pub fuel_starvation_level: f64,
    /// Fuel consumed per MW of output per tick
    pub fuel_burn_per_mw: f64,

    // === THERMAL ===
    /// Fraction of the gap to the target flow closed each tick
    pub flow_inertia: f64,
    /// Extra coolant flow per pump upgrade level, as a fraction of base
    pub pump_level_bonus: f64,
    /// Heat added per unit of positive reactivity
    pub heat_coefficient: f64,
    /// Residual (decay) heat added per MW of output
    pub residual_heat_coefficient: f64,
    /// Ambient heat loss per °C above the ambient temperature
    pub ambient_loss_coefficient: f64,
    pub ambient_temperature: f64,
    /// Forced-convection heat removal at full flow and a healthy condenser
    pub convection_coefficient: f64,
    /// Coolant return temperature used by the convection term (°C)
    pub coolant_inlet_temperature: f64,
    /// Core temperature never drops below this (°C)
    pub min_temperature: f64,
    /// Peak-to-peak amplitude of the per-tick process noise (°C)
    pub noise_amplitude: f64,

    // === PRESSURE ===
    /// Steam starts forming above this temperature (°C)
    pub boiling_point: f64,
    /// Pressure gained per °C above the boiling point
    pub pressure_build_coefficient: f64,
    /// Fraction of pressure released through a fully open valve per tick
    pub pressure_release_coefficient: f64,

    // === RADIATION ===
    /// Radiation target per MW of output
    pub radiation_per_mw: f64,
    /// Radiation target per point of meltdown progress
    pub radiation_per_meltdown_point: f64,
    /// Fraction of the gap to the radiation target closed each tick
    pub radiation_inertia: f64,
    pub max_radiation: f64,

    // === SAFETY SYSTEMS ===
    /// Auto-SCRAM drops the rods above this temperature (°C)
    pub auto_scram_temperature: f64,
    /// ...or above this pressure (PSI)
    pub auto_scram_pressure: f64,
}

/// Turbine, grid frequency and component wear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTuning {
    /// MW produced per unit of released steam at full turbine health
    pub torque_coefficient: f64,
    /// Fraction of the gap to the turbine output closed each tick
    pub power_inertia: f64,
    pub nominal_frequency: f64,
    /// Fraction of the gap to the target frequency closed each tick
    pub frequency_inertia: f64,
    pub max_frequency: f64,
    pub brownout_frequency: f64,
    pub overspeed_frequency: f64,
    /// Political capital lost when a brownout starts
    pub brownout_political_penalty: f64,
    /// Cash earned per brownout tick in chapters that allow price gouging
    pub brownout_price_premium: f64,
    /// Turbine health lost per overspeed tick
    pub overspeed_turbine_wear: f64,
    /// Probability per overspeed tick of logging a warning
    pub overspeed_warning_chance: f64,
    /// Output above which pump and condenser wear out (MW)
    pub high_output_threshold: f64,
    pub high_output_wear: f64,
    /// Temperature above which the condenser wears out (°C)
    pub high_temperature_threshold: f64,
    pub high_temperature_wear: f64,
    /// Turbine and pump wear per MW of output per tick
    pub baseline_wear_per_mw: f64,
}

/// Meltdown accumulator and absolute physical ceilings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeltdownTuning {
    pub danger_temperature: f64,
    pub danger_pressure: f64,
    /// Meltdown progress gained per tick in the danger zone
    ///
    /// At 0.5 a core held in the danger zone melts in exactly 200 ticks.
    pub progress_rate: f64,
    /// Meltdown progress recovered per tick outside the danger zone
    pub recovery_rate: f64,
    /// Instant core breach at or above this temperature (°C)
    pub max_temperature: f64,
    /// Instant vessel rupture at or above this pressure (PSI)
    pub max_pressure: f64,
}

/// Revenue, stock score and audit exposure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceTuning {
    /// Passive audit risk added every tick
    pub base_audit_creep: f64,
    /// Passive audit risk added every tick per active SPE
    pub per_spe_audit_creep: f64,
    /// Stock points per unit of revenue booked
    pub revenue_bonus_coefficient: f64,
    /// Stock points lost per Hz of deviation from nominal
    pub stability_penalty_coefficient: f64,
    /// Stock points lost per point of audit risk
    pub risk_penalty_coefficient: f64,
    /// Stock noise amplitude per unit of chapter volatility
    pub volatility_noise: f64,
    /// Consecutive ticks at zero stock score before bankruptcy
    pub bankruptcy_grace_ticks: u32,
    /// Loan ceiling per point of credit score
    pub credit_line_per_point: f64,
    /// Loaned cash per point of credit score lost
    pub credit_cost_per_point: f64,
}

/// Special Purpose Entities and the bookkeeping levers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudTuning {
    pub spe_min_hidden_debt: f64,
    pub spe_max_hidden_debt: f64,
    /// Stock boost is hidden debt divided by this
    pub spe_score_divisor: f64,
    /// Collapse trigger as a fraction of the post-creation stock score
    pub spe_trigger_ratio: f64,
    /// Instant audit risk added by each new SPE
    pub spe_audit_risk: f64,
    /// Stock penalty on collapse is hidden debt divided by this
    pub spe_collapse_divisor: f64,
    pub cook_books_score: f64,
    pub cook_books_audit_risk: f64,
    pub shred_audit_relief: f64,
    /// Audit risk added per dollar moved offshore
    pub siphon_audit_risk_per_dollar: f64,
}

/// Lobbying shield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LobbyTuning {
    /// Audit risk removed immediately by a donation
    pub audit_relief: f64,
    /// Shield duration in ticks
    ///
    /// At 600 ticks the shield lasts 30 s of wall clock.
    pub shield_ticks: u32,
    /// Passive relief is applied every this many shield ticks
    pub relief_interval: u32,
    pub passive_relief: f64,
}

/// Cadences of the real-time session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    pub tick_interval_ms: u64,
    pub chart_interval_ms: u64,
    pub headline_interval_ms: u64,
    /// Points kept in the stock chart ring buffer
    pub chart_capacity: usize,
    /// Entries kept in the event log
    pub log_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 1999,
            reactor: ReactorTuning::default(),
            grid: GridTuning::default(),
            meltdown: MeltdownTuning::default(),
            finance: FinanceTuning::default(),
            fraud: FraudTuning::default(),
            lobbying: LobbyTuning::default(),
            session: SessionTuning::default(),
        }
    }
}

impl Default for ReactorTuning {
    fn default() -> Self {
        Self {
            hours_per_tick: 0.05,

            reference_temperature: 300.0,
            xenon_poison_coefficient: 0.005,
            temperature_feedback_coefficient: 0.0001,
            reactivity_limit: 1.0,
            xenon_production: 0.001,
            xenon_burn: 0.00002,
            xenon_decay: 0.002,
            fuel_starvation_level: 10.0,
            fuel_burn_per_mw: 0.00002,

            flow_inertia: 0.05,
            pump_level_bonus: 0.25,
            heat_coefficient: 60.0,
            residual_heat_coefficient: 0.0005,
            ambient_loss_coefficient: 0.005,
            ambient_temperature: 20.0,
            convection_coefficient: 0.4,
            coolant_inlet_temperature: 80.0,
            min_temperature: 20.0,
            noise_amplitude: 1.0,

            boiling_point: 100.0,
            pressure_build_coefficient: 0.7,
            pressure_release_coefficient: 0.2,

            radiation_per_mw: 0.05,
            radiation_per_meltdown_point: 8.0,
            radiation_inertia: 0.05,
            max_radiation: 1000.0,

            auto_scram_temperature: 2400.0,
            auto_scram_pressure: 1600.0,
        }
    }
}

impl Default for GridTuning {
    fn default() -> Self {
        Self {
            torque_coefficient: 10.0,
            power_inertia: 0.1,
            nominal_frequency: 60.0,
            frequency_inertia: 0.05,
            max_frequency: 120.0,
            brownout_frequency: 59.0,
            overspeed_frequency: 61.0,
            brownout_political_penalty: 1.0,
            brownout_price_premium: 50.0,
            overspeed_turbine_wear: 0.1,
            overspeed_warning_chance: 0.05,
            high_output_threshold: 1000.0,
            high_output_wear: 0.01,
            high_temperature_threshold: 2000.0,
            high_temperature_wear: 0.05,
            baseline_wear_per_mw: 0.000001,
        }
    }
}

impl Default for MeltdownTuning {
    fn default() -> Self {
        Self {
            danger_temperature: 2600.0,
            danger_pressure: 1800.0,
            progress_rate: 0.5,
            recovery_rate: 0.5,
            max_temperature: 3000.0,
            max_pressure: 2500.0,
        }
    }
}

impl Default for FinanceTuning {
    fn default() -> Self {
        Self {
            base_audit_creep: 0.005,
            per_spe_audit_creep: 0.03,
            revenue_bonus_coefficient: 0.0002,
            stability_penalty_coefficient: 0.002,
            risk_penalty_coefficient: 0.0005,
            volatility_noise: 0.02,
            bankruptcy_grace_ticks: 600,
            credit_line_per_point: 1000.0,
            credit_cost_per_point: 5000.0,
        }
    }
}

impl Default for FraudTuning {
    fn default() -> Self {
        Self {
            spe_min_hidden_debt: 15_000.0,
            spe_max_hidden_debt: 25_000.0,
            spe_score_divisor: 200.0,
            spe_trigger_ratio: 0.7,
            spe_audit_risk: 7.0,
            spe_collapse_divisor: 50.0,
            cook_books_score: 20.0,
            cook_books_audit_risk: 15.0,
            shred_audit_relief: 100.0,
            siphon_audit_risk_per_dollar: 0.0005,
        }
    }
}

impl Default for LobbyTuning {
    fn default() -> Self {
        Self {
            audit_relief: 15.0,
            shield_ticks: 600,
            relief_interval: 10,
            passive_relief: 0.5,
        }
    }
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            chart_interval_ms: 1000,
            headline_interval_ms: 15_000,
            chart_capacity: 40,
            log_capacity: 5,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate().map_err(MeltdownError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        let m = &self.meltdown;
        if m.danger_temperature >= m.max_temperature {
            return Err(format!(
                "danger_temperature ({}) should be < max_temperature ({})",
                m.danger_temperature, m.max_temperature
            ));
        }
        if m.danger_pressure >= m.max_pressure {
            return Err(format!(
                "danger_pressure ({}) should be < max_pressure ({})",
                m.danger_pressure, m.max_pressure
            ));
        }
        if self.reactor.auto_scram_pressure >= m.max_pressure {
            return Err("auto_scram_pressure should be below max_pressure".into());
        }
        if m.progress_rate <= 0.0 {
            return Err("meltdown progress_rate must be positive".into());
        }

        let g = &self.grid;
        if g.brownout_frequency >= g.nominal_frequency
            || g.overspeed_frequency <= g.nominal_frequency
        {
            return Err(format!(
                "brownout ({}) < nominal ({}) < overspeed ({}) must hold",
                g.brownout_frequency, g.nominal_frequency, g.overspeed_frequency
            ));
        }

        let inertias = [
            ("flow_inertia", self.reactor.flow_inertia),
            ("radiation_inertia", self.reactor.radiation_inertia),
            ("power_inertia", g.power_inertia),
            ("frequency_inertia", g.frequency_inertia),
        ];
        for (name, value) in inertias {
            if !(0.0..=1.0).contains(&value) || value == 0.0 {
                return Err(format!("{} ({}) must be in (0, 1]", name, value));
            }
        }

        let starvation = self.reactor.fuel_starvation_level;
        if starvation.is_nan() || starvation <= 0.0 {
            return Err(format!("fuel_starvation_level ({}) must be positive", starvation));
        }
        if !(0.0..=1.0).contains(&g.overspeed_warning_chance) {
            return Err(format!(
                "overspeed_warning_chance ({}) must be in [0, 1]",
                g.overspeed_warning_chance
            ));
        }

        if self.reactor.hours_per_tick <= 0.0 || self.reactor.hours_per_tick >= 24.0 {
            return Err("hours_per_tick must be in (0, 24)".into());
        }

        let f = &self.fraud;
        if f.spe_min_hidden_debt > f.spe_max_hidden_debt {
            return Err(format!(
                "spe_min_hidden_debt ({}) should be <= spe_max_hidden_debt ({})",
                f.spe_min_hidden_debt, f.spe_max_hidden_debt
            ));
        }
        if f.spe_score_divisor <= 0.0 || f.spe_collapse_divisor <= 0.0 {
            return Err("SPE divisors must be positive".into());
        }

        if self.session.tick_interval_ms == 0 || self.session.chart_capacity == 0 {
            return Err("session tick interval and chart capacity must be non-zero".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::parse_toml(
            r#"
            seed = 42

            [meltdown]
            progress_rate = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.meltdown.progress_rate, 1.0);
        assert_eq!(config.meltdown.danger_temperature, 2600.0);
        assert_eq!(config.reactor, ReactorTuning::default());
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut config = SimulationConfig::default();
        config.meltdown.danger_temperature = 3500.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.grid.brownout_frequency = 61.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_rates() {
        let mut config = SimulationConfig::default();
        config.reactor.fuel_starvation_level = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.grid.overspeed_warning_chance = f64::NAN;
        assert!(config.validate().is_err());

        let result = SimulationConfig::parse_toml("[grid]\noverspeed_warning_chance = 1.5");
        assert!(matches!(result, Err(MeltdownError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = SimulationConfig::parse_toml("[meltdown]\nprogress_rate = -1.0");
        assert!(matches!(result, Err(MeltdownError::InvalidConfig(_))));
    }
}
