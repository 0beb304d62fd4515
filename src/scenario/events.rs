//! Scripted historic events
//!
//! Events are keyed on a calendar month. When the weekly rollover lands in
//! a matching month the event fires once, emitting an alert and applying
//! its state effects.

use serde::{Deserialize, Serialize};

use crate::core::types::Severity;
use crate::simulation::state::SimulationState;

/// A single mutation applied to the state by a scenario event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StateEffect {
    GridDemandDelta(f64),
    GridDemandScale(f64),
    /// Raise the stock score to at least this value
    ScoreFloor(f64),
    ScoreScale(f64),
    ScoreSet(f64),
    AuditRiskDelta(f64),
    AuditRiskSet(f64),
    EscalateDifficulty,
}

impl StateEffect {
    /// Apply the effect. Bounds are restored by the caller's clamp pass.
    pub fn apply(&self, state: &mut SimulationState) {
        match *self {
            StateEffect::GridDemandDelta(delta) => state.grid.grid_demand += delta,
            StateEffect::GridDemandScale(factor) => state.grid.grid_demand *= factor,
            StateEffect::ScoreFloor(floor) => {
                state.finance.stock_score = state.finance.stock_score.max(floor)
            }
            StateEffect::ScoreScale(factor) => state.finance.stock_score *= factor,
            StateEffect::ScoreSet(value) => state.finance.stock_score = value,
            StateEffect::AuditRiskDelta(delta) => state.finance.audit_risk_percent += delta,
            StateEffect::AuditRiskSet(value) => state.finance.audit_risk_percent = value,
            StateEffect::EscalateDifficulty => {
                state.meta.difficulty_level = state.meta.difficulty_level.escalated()
            }
        }
    }
}

/// A historic event on the scenario timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricEvent {
    pub month: u32,
    pub year: i32,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// Lobbying can suppress the effects of this event when it is dangerous
    #[serde(default)]
    pub lobbyable: bool,
    #[serde(default)]
    pub effects: Vec<StateEffect>,
}

impl HistoricEvent {
    pub fn matches(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }

    pub fn is_dangerous(&self) -> bool {
        self.severity == Severity::Danger
    }
}

/// The canonical 2000-2001 event timeline
pub fn builtin_events() -> Vec<HistoricEvent> {
    use StateEffect::*;

    let event = |month,
                 year,
                 title: &str,
                 description: &str,
                 severity,
                 lobbyable,
                 effects: Vec<StateEffect>| HistoricEvent {
        month,
        year,
        title: title.to_string(),
        description: description.to_string(),
        severity,
        lobbyable,
        effects,
    };

    vec![
        event(
            5,
            2000,
            "CALIFORNIA ENERGY CRISIS BEGINS",
            "Prices uncapped. Market volatility extreme.",
            Severity::Warning,
            false,
            vec![GridDemandDelta(200.0)],
        ),
        event(
            8,
            2000,
            "STOCK HITS $90 PEAK",
            "Wall Street loves us. Expectations are impossible to meet.",
            Severity::Info,
            false,
            vec![ScoreFloor(90.0)],
        ),
        event(
            11,
            2000,
            "ELECTION CHAOS",
            "Bush vs Gore. Uncertainty roils markets. Lobbying costs increase.",
            Severity::Warning,
            false,
            vec![],
        ),
        event(
            1,
            2001,
            "JEFF SKILLING TAKES OVER",
            "Named CEO. Aggressive accounting is now mandatory policy.",
            Severity::Info,
            false,
            vec![EscalateDifficulty],
        ),
        event(
            3,
            2001,
            "ROLLING BLACKOUTS",
            "California goes dark. Public outrage growing.",
            Severity::Danger,
            false,
            vec![AuditRiskDelta(10.0)],
        ),
        event(
            8,
            2001,
            "SKILLING RESIGNS",
            "Stock plummets. Panic in the boardroom.",
            Severity::Danger,
            true,
            vec![ScoreScale(0.7), AuditRiskDelta(20.0)],
        ),
        event(
            9,
            2001,
            "SEPTEMBER 11 ATTACKS",
            "National tragedy. Regulators distracted.",
            Severity::Danger,
            false,
            vec![AuditRiskSet(0.0), GridDemandScale(0.5), ScoreScale(0.8)],
        ),
        event(
            10,
            2001,
            "SEC INQUIRY OPENED",
            "They are asking about the partnerships. Shred everything.",
            Severity::Danger,
            true,
            vec![AuditRiskSet(90.0)],
        ),
        event(
            11,
            2001,
            "DYNEGY MERGER FAILS",
            "Nobody wants to buy us. Cash reserves critical.",
            Severity::Danger,
            false,
            vec![ScoreSet(1.0)],
        ),
    ]
}
