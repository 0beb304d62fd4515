//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter (one fixed physics step)
pub type Tick = u64;

/// Identifier for a Special Purpose Entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeId(pub u32);

impl SpeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SpeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SPE#{}", self.0)
    }
}

/// Severity attached to notable events and scenario entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    /// One step less severe (danger -> warning), used by lobbying mitigation
    pub fn downgraded(self) -> Self {
        match self {
            Severity::Danger => Severity::Warning,
            other => other,
        }
    }
}

/// Player-selected difficulty, ordered from mildest to harshest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Difficulty {
    Ethical = 1,
    Aggressive = 2,
    Skilling = 3,
    Fastow = 4,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Ethical,
        Difficulty::Aggressive,
        Difficulty::Skilling,
        Difficulty::Fastow,
    ];

    pub fn level(self) -> u8 {
        self as u8
    }

    /// Convert a 1-4 level, clamping out-of-range input
    pub fn from_level(level: u8) -> Self {
        match level {
            0 | 1 => Difficulty::Ethical,
            2 => Difficulty::Aggressive,
            3 => Difficulty::Skilling,
            _ => Difficulty::Fastow,
        }
    }

    /// Next harsher level; Fastow is the ceiling
    pub fn escalated(self) -> Self {
        Self::from_level(self.level() + 1)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Ethical
    }
}

/// Plant components that wear out and can be repaired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Pump,
    Turbine,
    Condenser,
}

impl Component {
    pub fn name(self) -> &'static str {
        match self {
            Component::Pump => "pump",
            Component::Turbine => "turbine",
            Component::Condenser => "condenser",
        }
    }
}

impl std::str::FromStr for Component {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pump" => Ok(Component::Pump),
            "turbine" | "turb" => Ok(Component::Turbine),
            "condenser" => Ok(Component::Condenser),
            other => Err(format!("unknown component '{}'", other)),
        }
    }
}

/// Clamp a percentage-style quantity into `[0, max]`
pub fn clamp_to(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

/// Clamp into the canonical `[0, 100]` percent range
pub fn clamp_percent(value: f64) -> f64 {
    clamp_to(value, 100.0)
}
