//! Scenario data: the static tables a session is played against
//!
//! Historic events, weather patterns, chapters, difficulty profiles and the
//! price table. Loaded once at session start and never mutated.

pub mod chapters;
pub mod difficulty;
pub mod events;
pub mod prices;
pub mod weather;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{MeltdownError, Result};
use crate::core::types::Difficulty;

pub use chapters::{Chapter, ChapterGoal, ChapterModifiers};
pub use difficulty::DifficultyProfile;
pub use events::{HistoricEvent, StateEffect};
pub use prices::{PriceTable, PricedAction};
pub use weather::{Weather, WeatherPattern};

/// Current format version of scenario files
pub const SCENARIO_VERSION: u32 = 1;

/// The complete, versioned scenario table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioData {
    pub version: u32,
    #[serde(default)]
    pub events: Vec<HistoricEvent>,
    #[serde(default)]
    pub weather: Vec<WeatherPattern>,
    pub chapters: Vec<Chapter>,
    #[serde(default = "difficulty::builtin_profiles")]
    pub difficulties: Vec<DifficultyProfile>,
    #[serde(default)]
    pub prices: PriceTable,
}

impl ScenarioData {
    /// The 2000-2001 campaign
    pub fn builtin() -> Self {
        Self {
            version: SCENARIO_VERSION,
            events: events::builtin_events(),
            weather: weather::builtin_weather(),
            chapters: chapters::builtin_chapters(),
            difficulties: difficulty::builtin_profiles(),
            prices: PriceTable::default(),
        }
    }

    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a scenario from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let scenario: ScenarioData = toml::from_str(content)?;
        scenario.validate().map_err(MeltdownError::InvalidScenario)?;
        Ok(scenario)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.version != SCENARIO_VERSION {
            return Err(format!(
                "unsupported scenario version {} (expected {})",
                self.version, SCENARIO_VERSION
            ));
        }
        if self.chapters.is_empty() {
            return Err("scenario needs at least one chapter".into());
        }
        for event in &self.events {
            if !(1..=12).contains(&event.month) {
                return Err(format!("event '{}' has invalid month {}", event.title, event.month));
            }
        }
        for pattern in &self.weather {
            if !(1..=12).contains(&pattern.month) {
                return Err(format!(
                    "weather '{}' has invalid month {}",
                    pattern.name, pattern.month
                ));
            }
        }
        for chapter in &self.chapters {
            if chapter.modifiers.demand_scale <= 0.0 {
                return Err(format!("chapter '{}' needs a positive demand scale", chapter.title));
            }
        }
        for (action, price) in self.prices.all() {
            if price < 0.0 {
                return Err(format!("price for {:?} is negative", action));
            }
        }
        Ok(())
    }

    /// Index of the first event scheduled for the given month
    pub fn event_index_for(&self, month: u32, year: i32) -> Option<usize> {
        self.events.iter().position(|e| e.matches(month, year))
    }

    pub fn weather_for(&self, month: u32, year: i32) -> Option<&WeatherPattern> {
        self.weather.iter().find(|p| p.matches(month, year))
    }

    /// Chapter by index; out-of-range indices resolve to the last chapter
    pub fn chapter(&self, index: usize) -> &Chapter {
        let last = self.chapters.len().saturating_sub(1);
        &self.chapters[index.min(last)]
    }

    pub fn is_final_chapter(&self, index: usize) -> bool {
        index + 1 >= self.chapters.len()
    }

    pub fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        self.difficulties
            .iter()
            .find(|p| p.difficulty == difficulty)
            .cloned()
            .unwrap_or_else(|| DifficultyProfile {
                difficulty,
                ..DifficultyProfile::default()
            })
    }
}

impl Default for ScenarioData {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenario_is_valid() {
        let scenario = ScenarioData::builtin();
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.chapters.len(), 4);
        assert_eq!(scenario.events.len(), 9);
    }

    #[test]
    fn test_event_lookup_by_month() {
        let scenario = ScenarioData::builtin();
        let idx = scenario.event_index_for(10, 2001).unwrap();
        assert_eq!(scenario.events[idx].title, "SEC INQUIRY OPENED");
        assert!(scenario.event_index_for(2, 2000).is_none());
    }

    #[test]
    fn test_weather_lookup_by_month() {
        let scenario = ScenarioData::builtin();
        assert_eq!(scenario.weather_for(5, 2000).unwrap().weather, Weather::Sunny);
        assert_eq!(scenario.weather_for(1, 2001).unwrap().weather, Weather::Snowy);
        assert!(scenario.weather_for(2, 2000).is_none());
    }

    #[test]
    fn test_chapter_index_saturates() {
        let scenario = ScenarioData::builtin();
        assert_eq!(scenario.chapter(99).id, 3);
        assert!(scenario.is_final_chapter(3));
        assert!(!scenario.is_final_chapter(2));
    }

    #[test]
    fn test_profile_lookup() {
        let scenario = ScenarioData::builtin();
        assert_eq!(scenario.profile(Difficulty::Fastow).starting_cash, 3000.0);
    }

    #[test]
    fn test_minimal_toml_scenario() {
        let scenario = ScenarioData::parse_toml(
            r#"
            version = 1

            [[chapters]]
            id = 0
            title = "Only Chapter"
            year = "2000"
            description = "Survive."
            goal = { min_stock_score = 500.0 }
            modifiers = { demand_scale = 1.0, volatility = 0.0, regulator_aggression = 1.0, revenue_rate = 0.02 }

            [[events]]
            month = 2
            year = 2000
            title = "AUDITOR VISIT"
            description = "Smile."
            severity = "danger"
            lobbyable = true
            effects = [{ kind = "audit_risk_delta", value = 25.0 }]
            "#,
        )
        .unwrap();

        assert_eq!(scenario.chapters.len(), 1);
        assert_eq!(scenario.events[0].effects, vec![StateEffect::AuditRiskDelta(25.0)]);
        assert_eq!(scenario.prices, PriceTable::default());
        assert_eq!(scenario.difficulties.len(), 4);
    }

    #[test]
    fn test_scenario_rejects_bad_version() {
        let mut scenario = ScenarioData::builtin();
        scenario.version = 7;
        assert!(scenario.validate().is_err());
    }
}
