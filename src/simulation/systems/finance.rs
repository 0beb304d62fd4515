//! Revenue, passive audit creep and the stock score

use crate::simulation::systems::TickContext;

/// Step 6: book revenue, accrue audit risk and move the stock score
pub fn update(ctx: &mut TickContext<'_>) {
    let config = ctx.config;
    let tuning = &config.finance;
    let modifiers = ctx.chapter().modifiers.clone();
    let demand = ctx.effective_demand();
    let creep_multiplier = ctx
        .scenario
        .profile(ctx.state.meta.difficulty_level)
        .audit_creep_multiplier;
    let noise = ctx.centred_noise(tuning.volatility_noise * modifiers.volatility);

    let power = ctx.state.grid.electrical_power_output;
    let frequency_deviation =
        (ctx.state.grid.grid_frequency_hz - ctx.config.grid.nominal_frequency).abs();
    let active_spes = ctx.state.fraud.active_count() as f64;
    let finance = &mut ctx.state.finance;

    let revenue = power.min(demand).max(0.0) * modifiers.revenue_rate;
    finance.operating_cash += revenue;

    if !finance.shield_active() {
        let creep = (tuning.base_audit_creep + tuning.per_spe_audit_creep * active_spes)
            * creep_multiplier
            * modifiers.regulator_aggression;
        finance.audit_risk_percent = (finance.audit_risk_percent + creep).min(100.0);
    }

    let delta = revenue * tuning.revenue_bonus_coefficient
        - frequency_deviation * tuning.stability_penalty_coefficient
        - finance.audit_risk_percent * tuning.risk_penalty_coefficient
        + noise;
    finance.stock_score = (finance.stock_score + delta).max(0.0);

    if finance.stock_score <= 0.0 {
        finance.ticks_at_zero_score = finance.ticks_at_zero_score.saturating_add(1);
    } else {
        finance.ticks_at_zero_score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SpeId;
    use crate::simulation::state::SpecialPurposeEntity;
    use crate::simulation::testing::Harness;

    #[test]
    fn test_revenue_capped_by_demand() {
        let mut harness = Harness::new();
        harness.state.grid.electrical_power_output = 5000.0;
        let cash = harness.state.finance.operating_cash;
        harness.with(|ctx| update(ctx));
        // 600 MW demand at 0.02 per MW
        assert!((harness.state.finance.operating_cash - cash - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_bonus_follows_revenue() {
        let mut idle = Harness::new();
        idle.with(|ctx| update(ctx));

        let mut selling = Harness::new();
        selling.state.grid.electrical_power_output = 5000.0;
        selling.with(|ctx| update(ctx));

        // Only the 600 MW of demand are sold, at 0.02 per MW
        let bonus = 12.0 * selling.config.finance.revenue_bonus_coefficient;
        let gained = selling.state.finance.stock_score - idle.state.finance.stock_score;
        assert!((gained - bonus).abs() < 1e-9);
    }

    #[test]
    fn test_passive_creep_grows_with_active_spes() {
        let mut bare = Harness::new();
        bare.with(|ctx| update(ctx));

        let mut exposed = Harness::new();
        exposed.state.fraud.open("LJM-1".into(), 20_000.0, 10.0);
        exposed.with(|ctx| update(ctx));

        assert!(exposed.state.finance.audit_risk_percent > bare.state.finance.audit_risk_percent);
    }

    #[test]
    fn test_collapsed_spes_stop_creeping() {
        let mut bare = Harness::new();
        bare.with(|ctx| update(ctx));

        let mut harness = Harness::new();
        let mut spe = SpecialPurposeEntity::new(SpeId(0), "LJM-0".into(), 1.0, 1.0);
        spe.collapse(1);
        harness.state.fraud.special_purpose_entities.push(spe);
        harness.with(|ctx| update(ctx));
        assert_eq!(
            harness.state.finance.audit_risk_percent,
            bare.state.finance.audit_risk_percent
        );
    }

    #[test]
    fn test_shield_pauses_creep() {
        let mut harness = Harness::new();
        harness.state.finance.lobbying_shield_ticks_remaining = 10;
        harness.with(|ctx| update(ctx));
        assert_eq!(harness.state.finance.audit_risk_percent, 0.0);
    }

    #[test]
    fn test_zero_score_counter() {
        let mut harness = Harness::new();
        harness.state.finance.stock_score = 0.0;
        harness.state.finance.audit_risk_percent = 90.0;
        harness.with(|ctx| update(ctx));
        harness.with(|ctx| update(ctx));
        assert_eq!(harness.state.finance.stock_score, 0.0);
        assert_eq!(harness.state.finance.ticks_at_zero_score, 2);
    }
}
