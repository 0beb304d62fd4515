//! Lobbying shield decay

use crate::simulation::systems::TickContext;

/// Step 8: count the shield down, trickling audit relief while it lasts
pub fn decay_shield(ctx: &mut TickContext<'_>) {
    let tuning = &ctx.config.lobbying;
    let finance = &mut ctx.state.finance;
    if !finance.shield_active() {
        return;
    }

    finance.lobbying_shield_ticks_remaining -= 1;
    let interval = u64::from(tuning.relief_interval.max(1));
    if ctx.tick % interval == 0 {
        finance.audit_risk_percent = (finance.audit_risk_percent - tuning.passive_relief).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::testing::Harness;

    #[test]
    fn test_shield_counts_down() {
        let mut harness = Harness::new();
        harness.state.finance.lobbying_shield_ticks_remaining = 2;
        harness.with(|ctx| decay_shield(ctx));
        harness.with(|ctx| decay_shield(ctx));
        harness.with(|ctx| decay_shield(ctx));
        assert_eq!(harness.state.finance.lobbying_shield_ticks_remaining, 0);
    }

    #[test]
    fn test_periodic_relief() {
        let mut harness = Harness::new();
        harness.state.finance.lobbying_shield_ticks_remaining = 100;
        harness.state.finance.audit_risk_percent = 20.0;
        harness.tick = 10;
        harness.with(|ctx| decay_shield(ctx));
        assert_eq!(harness.state.finance.audit_risk_percent, 19.5);

        harness.tick = 11;
        harness.with(|ctx| decay_shield(ctx));
        assert_eq!(harness.state.finance.audit_risk_percent, 19.5);
    }
}
