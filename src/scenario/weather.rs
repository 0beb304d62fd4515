//! Weather for the scenario timeline
//!
//! Weather is scripted rather than rolled: each weekly rollover looks up a
//! pattern for the current month and year and falls back to sunny skies.

use serde::{Deserialize, Serialize};

/// Current weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Thunderstorm,
}

impl Weather {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::Thunderstorm => "thunderstorm",
        }
    }
}

impl Default for Weather {
    fn default() -> Self {
        Self::Sunny
    }
}

/// A scripted weather pattern for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPattern {
    pub month: u32,
    pub year: i32,
    pub weather: Weather,
    /// Ambient heat multiplier; above 1.0 weakens ambient core cooling
    #[serde(default = "unit_modifier")]
    pub temperature_modifier: f64,
    /// Multiplier on grid demand while the pattern holds
    #[serde(default = "unit_modifier")]
    pub demand_modifier: f64,
    pub name: String,
}

fn unit_modifier() -> f64 {
    1.0
}

impl WeatherPattern {
    pub fn matches(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }
}

/// The canonical 2000-2001 weather timeline
pub fn builtin_weather() -> Vec<WeatherPattern> {
    let pattern = |month, year, weather, temperature_modifier, demand_modifier, name: &str| {
        WeatherPattern {
            month,
            year,
            weather,
            temperature_modifier,
            demand_modifier,
            name: name.to_string(),
        }
    };

    vec![
        pattern(5, 2000, Weather::Sunny, 1.3, 1.4, "CALIFORNIA HEATWAVE"),
        pattern(6, 2000, Weather::Sunny, 1.4, 1.5, "SF BAY AREA HEAT SPIKE"),
        pattern(11, 2000, Weather::Snowy, 0.6, 1.3, "EARLY WINTER CHILL"),
        pattern(1, 2001, Weather::Snowy, 0.5, 1.4, "ROLLING BLACKOUT WINTER"),
        pattern(3, 2001, Weather::Rainy, 1.0, 1.1, "SPRING STORMS"),
        pattern(8, 2001, Weather::Thunderstorm, 1.2, 1.3, "LATE SUMMER STORM"),
    ]
}
