//! Difficulty profiles

use serde::{Deserialize, Serialize};

use crate::core::types::Difficulty;

/// Starting conditions and pressure multipliers for one difficulty level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    pub starting_cash: f64,
    pub starting_stock_score: f64,
    /// Multiplier on passive audit-risk creep
    pub audit_creep_multiplier: f64,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Ethical,
            starting_cash: 5000.0,
            starting_stock_score: 40.0,
            audit_creep_multiplier: 1.0,
        }
    }
}

pub fn builtin_profiles() -> Vec<DifficultyProfile> {
    vec![
        DifficultyProfile::default(),
        DifficultyProfile {
            difficulty: Difficulty::Aggressive,
            starting_cash: 4500.0,
            starting_stock_score: 40.0,
            audit_creep_multiplier: 1.25,
        },
        DifficultyProfile {
            difficulty: Difficulty::Skilling,
            starting_cash: 4000.0,
            starting_stock_score: 35.0,
            audit_creep_multiplier: 1.5,
        },
        DifficultyProfile {
            difficulty: Difficulty::Fastow,
            starting_cash: 3000.0,
            starting_stock_score: 30.0,
            audit_creep_multiplier: 2.0,
        },
    ]
}
