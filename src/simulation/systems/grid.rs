//! Turbine, grid frequency and component wear

use rand::Rng;

use crate::core::types::Severity;
use crate::simulation::events::EventKind;
use crate::simulation::systems::TickContext;

/// Step 4: turbine output and grid frequency
pub fn turbine(ctx: &mut TickContext<'_>) {
    let tuning = &ctx.config.grid;
    let demand = ctx.effective_demand().max(1.0);
    let release = ctx.scratch.steam_release;
    let turbine_health = ctx.state.reactor.turbine_health;
    let grid = &mut ctx.state.grid;

    let target_power = release * tuning.torque_coefficient * (turbine_health / 100.0);
    grid.electrical_power_output +=
        (target_power - grid.electrical_power_output) * tuning.power_inertia;
    grid.electrical_power_output = grid.electrical_power_output.max(0.0);

    let target_hz = tuning.nominal_frequency * (grid.electrical_power_output / demand);
    grid.grid_frequency_hz += (target_hz - grid.grid_frequency_hz) * tuning.frequency_inertia;
    grid.grid_frequency_hz = grid.grid_frequency_hz.clamp(0.0, tuning.max_frequency);
}

/// Under-frequency: brownout flag, political fallout and optional price premium
///
/// Political capital is charged once when a brownout starts. The premium
/// is paid on every tick spent below the brownout line.
pub fn brownout(ctx: &mut TickContext<'_>) {
    let tuning = &ctx.config.grid;
    let premium = ctx.chapter().modifiers.brownout_premium;
    let below = ctx.state.grid.grid_frequency_hz < tuning.brownout_frequency;

    if !below {
        ctx.state.grid.brownout_active = false;
        return;
    }

    if !ctx.state.grid.brownout_active {
        ctx.state.grid.brownout_active = true;
        let finance = &mut ctx.state.finance;
        finance.political_capital =
            (finance.political_capital - tuning.brownout_political_penalty).max(0.0);
        ctx.events.emit(
            ctx.tick,
            EventKind::Brownout,
            Severity::Warning,
            "BROWNOUT DETECTED",
            "Low Frequency",
        );
    }

    if premium {
        ctx.state.finance.operating_cash += tuning.brownout_price_premium;
    }
}

/// Over-frequency damages the turbine
pub fn overspeed(ctx: &mut TickContext<'_>) {
    let tuning = &ctx.config.grid;
    if ctx.state.grid.grid_frequency_hz <= tuning.overspeed_frequency {
        return;
    }

    let reactor = &mut ctx.state.reactor;
    reactor.turbine_health = (reactor.turbine_health - tuning.overspeed_turbine_wear).max(0.0);

    let chance = tuning.overspeed_warning_chance;
    let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
    if ctx.rng.gen_bool(chance) {
        let hz = ctx.state.grid.grid_frequency_hz;
        ctx.events.emit(
            ctx.tick,
            EventKind::TurbineOverspeed,
            Severity::Warning,
            "TURBINE OVERSPEED",
            format!("Grid at {:.1} Hz", hz),
        );
    }
}

/// Slow degradation from sustained output and heat. Never restores health.
pub fn wear(ctx: &mut TickContext<'_>) {
    let tuning = &ctx.config.grid;
    let power = ctx.state.grid.electrical_power_output;
    let r = &mut ctx.state.reactor;

    let turbine_wear = power * tuning.baseline_wear_per_mw;
    let mut pump_wear = power * tuning.baseline_wear_per_mw;
    let mut condenser_wear = 0.0;

    if power > tuning.high_output_threshold {
        pump_wear += tuning.high_output_wear;
        condenser_wear += tuning.high_output_wear;
    }
    if r.core_temperature > tuning.high_temperature_threshold {
        condenser_wear += tuning.high_temperature_wear;
    }

    r.turbine_health = (r.turbine_health - turbine_wear).max(0.0);
    r.pump_health = (r.pump_health - pump_wear).max(0.0);
    r.condenser_health = (r.condenser_health - condenser_wear).max(0.0);
}
