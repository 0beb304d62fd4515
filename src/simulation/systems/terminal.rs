//! Terminal conditions
//!
//! Checked after every tick in a fixed order, reactor before finance. The
//! first satisfied condition names the failure.

use crate::core::config::SimulationConfig;
use crate::core::types::Severity;
use crate::simulation::events::EventKind;
use crate::simulation::state::{FailureReason, SimulationState};
use crate::simulation::systems::TickContext;

/// First terminal condition met by `state`, if any
pub fn first_failure(state: &SimulationState, config: &SimulationConfig) -> Option<FailureReason> {
    let r = &state.reactor;
    let f = &state.finance;

    if r.meltdown_progress >= 100.0 {
        Some(FailureReason::CriticalMass)
    } else if r.core_temperature >= config.meltdown.max_temperature {
        Some(FailureReason::CoreBreach)
    } else if r.pressure >= config.meltdown.max_pressure {
        Some(FailureReason::VesselRupture)
    } else if f.audit_risk_percent >= 100.0 {
        Some(FailureReason::FraudExposed)
    } else if f.ticks_at_zero_score >= config.finance.bankruptcy_grace_ticks {
        Some(FailureReason::Bankruptcy)
    } else {
        None
    }
}

/// End the session if a terminal condition holds
pub fn check(ctx: &mut TickContext<'_>) {
    let Some(reason) = first_failure(ctx.state, ctx.config) else {
        return;
    };
    if !ctx.state.end_session(reason, ctx.tick) {
        return;
    }

    tracing::info!(
        tick = ctx.tick,
        reason = %reason,
        stock_score = ctx.state.finance.stock_score,
        offshore = ctx.state.finance.offshore_holdings,
        "Session over"
    );
    ctx.events.emit(
        ctx.tick,
        EventKind::GameOver,
        Severity::Danger,
        reason.headline(),
        format!("Final stock score {:.1}", ctx.state.finance.stock_score),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::testing::Harness;

    #[test]
    fn test_no_failure_on_fresh_state() {
        let harness = Harness::new();
        assert_eq!(first_failure(&harness.state, &harness.config), None);
    }

    #[test]
    fn test_reactor_conditions_win_ties() {
        let mut harness = Harness::new();
        harness.state.finance.audit_risk_percent = 100.0;
        harness.state.reactor.pressure = 5000.0;
        assert_eq!(
            first_failure(&harness.state, &harness.config),
            Some(FailureReason::VesselRupture)
        );

        harness.state.reactor.meltdown_progress = 100.0;
        assert_eq!(
            first_failure(&harness.state, &harness.config),
            Some(FailureReason::CriticalMass)
        );
    }

    #[test]
    fn test_bankruptcy_after_grace_period() {
        let mut harness = Harness::new();
        harness.state.finance.ticks_at_zero_score = 599;
        assert_eq!(first_failure(&harness.state, &harness.config), None);
        harness.state.finance.ticks_at_zero_score = 600;
        assert_eq!(
            first_failure(&harness.state, &harness.config),
            Some(FailureReason::Bankruptcy)
        );
    }

    #[test]
    fn test_check_emits_once() {
        let mut harness = Harness::new();
        harness.state.finance.audit_risk_percent = 100.0;
        harness.with(|ctx| check(ctx));
        harness.with(|ctx| check(ctx));
        assert_eq!(harness.events.len(), 1);
        assert_eq!(harness.state.failure_reason(), Some(FailureReason::FraudExposed));
    }
}
