//! Chapters of the campaign
//!
//! Each chapter carries its own economic modifiers and a goal. When the
//! goal is met the campaign advances to the next chapter automatically.

use serde::{Deserialize, Serialize};

use crate::simulation::state::SimulationState;

/// Economic modifiers active during a chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterModifiers {
    /// Multiplier on grid demand
    pub demand_scale: f64,
    /// Amplitude of stock-score noise
    pub volatility: f64,
    /// Multiplier on passive audit-risk creep
    pub regulator_aggression: f64,
    /// Cash earned per MW sold per tick
    pub revenue_rate: f64,
    /// Brownouts pay a price premium during this chapter
    #[serde(default)]
    pub brownout_premium: bool,
}

/// Win predicate of a chapter: every threshold that is set must be exceeded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterGoal {
    pub min_stock_score: Option<f64>,
    pub min_cash: Option<f64>,
    pub min_offshore: Option<f64>,
    /// SPEs created so far, collapsed ones included
    pub min_spe_count: Option<usize>,
}

impl ChapterGoal {
    pub fn is_met(&self, state: &SimulationState) -> bool {
        let above = |threshold: Option<f64>, value: f64| threshold.map_or(true, |t| value > t);

        above(self.min_stock_score, state.finance.stock_score)
            && above(self.min_cash, state.finance.operating_cash)
            && above(self.min_offshore, state.finance.offshore_holdings)
            && self
                .min_spe_count
                .map_or(true, |n| state.fraud.special_purpose_entities.len() >= n)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u32,
    pub title: String,
    pub year: String,
    pub description: String,
    pub goal: ChapterGoal,
    pub modifiers: ChapterModifiers,
}

/// The four chapters of the 2000-2001 campaign
pub fn builtin_chapters() -> Vec<Chapter> {
    vec![
        Chapter {
            id: 0,
            title: "Chapter 1: The Vision".into(),
            year: "Early 2000".into(),
            description:
                "Establish Enron Energy Services. Keep the lights on and the stock moving up."
                    .into(),
            goal: ChapterGoal {
                min_stock_score: Some(60.0),
                min_cash: Some(8000.0),
                ..Default::default()
            },
            modifiers: ChapterModifiers {
                demand_scale: 1.0,
                volatility: 0.5,
                regulator_aggression: 0.2,
                revenue_rate: 0.02,
                brownout_premium: false,
            },
        },
        Chapter {
            id: 1,
            title: "Chapter 2: The California Crisis".into(),
            year: "Late 2000".into(),
            description:
                "Demand is skyrocketing. Create artificial shortages (brownouts) to spike prices."
                    .into(),
            goal: ChapterGoal {
                min_stock_score: Some(100.0),
                min_offshore: Some(5000.0),
                ..Default::default()
            },
            modifiers: ChapterModifiers {
                demand_scale: 1.5,
                volatility: 1.2,
                regulator_aggression: 0.4,
                revenue_rate: 0.05,
                brownout_premium: true,
            },
        },
        Chapter {
            id: 2,
            title: "Chapter 3: Creative Accounting".into(),
            year: "2001".into(),
            description: "The debt is piling up. Use SPEs to hide losses. Avoid the SEC.".into(),
            goal: ChapterGoal {
                min_stock_score: Some(150.0),
                min_spe_count: Some(3),
                ..Default::default()
            },
            modifiers: ChapterModifiers {
                demand_scale: 0.8,
                volatility: 2.0,
                regulator_aggression: 0.9,
                revenue_rate: 0.02,
                brownout_premium: false,
            },
        },
        Chapter {
            id: 3,
            title: "Chapter 4: The Collapse".into(),
            year: "Late 2001".into(),
            description:
                "It's all over. Extract as much personal wealth as possible before the indictment."
                    .into(),
            goal: ChapterGoal {
                min_offshore: Some(50_000.0),
                ..Default::default()
            },
            modifiers: ChapterModifiers {
                demand_scale: 0.5,
                volatility: 3.0,
                regulator_aggression: 1.5,
                revenue_rate: 0.02,
                brownout_premium: false,
            },
        },
    ]
}
