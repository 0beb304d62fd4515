//! Snapshot summaries for advisory prompts

use crate::simulation::snapshot::Snapshot;

/// The handful of figures the advisor is allowed to see
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryContext {
    pub stock_score: f64,
    pub core_temperature: f64,
    pub audit_risk_percent: f64,
    pub total_hidden_debt: f64,
    pub calendar_date: String,
}

impl AdvisoryContext {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let state = &snapshot.state;
        Self {
            stock_score: state.finance.stock_score,
            core_temperature: state.reactor.core_temperature,
            audit_risk_percent: state.finance.audit_risk_percent,
            total_hidden_debt: state.fraud.total_hidden_debt,
            calendar_date: state.timeline.calendar_date.clone(),
        }
    }

    /// Multi-line block embedded in prompts
    pub fn to_prompt_string(&self) -> String {
        format!(
            "Date: {}\nStock Price: ${:.2}\nCore Temp: {:.0}C\nAudit Risk: {:.0}%\nTotal SPE Hidden Debt: ${:.0}",
            self.calendar_date,
            self.stock_score,
            self.core_temperature,
            self.audit_risk_percent,
            self.total_hidden_debt
        )
    }
}
