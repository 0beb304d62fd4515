//! Reactor neutronics and thermal-hydraulics
//!
//! Neutronics: net reactivity from rod withdrawal, xenon poisoning and
//! temperature feedback; xenon follows a first-order production/burn/decay
//! balance. Thermal: coolant flow relaxes toward the pump's capacity, core
//! temperature integrates heat generation minus ambient and forced-convection
//! losses, and steam pressure integrates boil-off minus valve release.

use crate::core::types::{clamp_percent, Severity};
use crate::simulation::events::EventKind;
use crate::simulation::systems::TickContext;

/// Step 2: reactivity, xenon and fuel
pub fn neutronics(ctx: &mut TickContext<'_>) {
    let config = ctx.config;
    let tuning = &config.reactor;
    let power = ctx.state.grid.electrical_power_output;
    let r = &mut ctx.state.reactor;

    let withdrawal = 1.0 - r.control_rod_insertion / 100.0;
    let fuel_factor = (r.fuel_remaining / tuning.fuel_starvation_level).min(1.0);
    let xenon_term = r.xenon_poison_level * tuning.xenon_poison_coefficient;
    let feedback_term = (r.core_temperature - tuning.reference_temperature)
        * tuning.temperature_feedback_coefficient;

    r.net_reactivity = (withdrawal * fuel_factor - xenon_term - feedback_term)
        .clamp(-tuning.reactivity_limit, tuning.reactivity_limit);

    let xenon = r.xenon_poison_level;
    let production = power * tuning.xenon_production;
    let burn = xenon * power * tuning.xenon_burn;
    let decay = xenon * tuning.xenon_decay;
    r.xenon_poison_level = clamp_percent(xenon + production - burn - decay);

    r.fuel_remaining = clamp_percent(r.fuel_remaining - power * tuning.fuel_burn_per_mw);
}

/// Step 3: coolant flow, core temperature and steam pressure
pub fn thermal_hydraulics(ctx: &mut TickContext<'_>) {
    let config = ctx.config;
    let tuning = &config.reactor;
    let noise = ctx.centred_noise(tuning.noise_amplitude);
    let power = ctx.state.grid.electrical_power_output;
    let ambient_modifier = ctx.state.timeline.weather_temperature_modifier.max(0.1);
    let r = &mut ctx.state.reactor;

    let pump_efficiency = if r.coolant_pump_on {
        r.pump_health / 100.0
    } else {
        0.0
    };
    let level_bonus = 1.0 + tuning.pump_level_bonus * f64::from(r.pump_level.saturating_sub(1));
    let target_flow = pump_efficiency * 100.0 * level_bonus;
    r.coolant_flow_rate += (target_flow - r.coolant_flow_rate) * tuning.flow_inertia;

    let heat = r.net_reactivity.max(0.0) * tuning.heat_coefficient
        + power * tuning.residual_heat_coefficient;
    let ambient_loss = (r.core_temperature - tuning.ambient_temperature)
        * tuning.ambient_loss_coefficient
        / ambient_modifier;
    let convection = (r.core_temperature - tuning.coolant_inlet_temperature)
        * tuning.convection_coefficient
        * (r.coolant_flow_rate / 100.0)
        * (r.condenser_health / 100.0);

    r.core_temperature =
        (r.core_temperature + heat - ambient_loss - convection + noise).max(tuning.min_temperature);

    let build = ((r.core_temperature - tuning.boiling_point) * tuning.pressure_build_coefficient)
        .max(0.0);
    let release =
        (r.steam_valve_opening / 100.0) * r.pressure * tuning.pressure_release_coefficient;
    r.pressure = (r.pressure + build - release).max(0.0);

    ctx.scratch.steam_release = release;
}

/// Drop the rods when an installed auto-SCRAM sees an overheating core or
/// an over-pressure vessel
pub fn auto_scram(ctx: &mut TickContext<'_>) {
    let tuning = &ctx.config.reactor;
    let r = &mut ctx.state.reactor;
    let tripped = r.core_temperature > tuning.auto_scram_temperature
        || r.pressure > tuning.auto_scram_pressure;
    if !r.has_auto_scram || !tripped || r.control_rod_insertion >= 100.0 {
        return;
    }

    r.control_rod_insertion = 100.0;
    let message = format!(
        "Rods fully inserted at {:.0}°C / {:.0} PSI",
        r.core_temperature, r.pressure
    );
    ctx.events.emit(
        ctx.tick,
        EventKind::AutoScram,
        Severity::Warning,
        "AUTO-SCRAM ENGAGED",
        message,
    );
}

/// Radiation relaxes toward a level set by output and core damage
pub fn radiation(ctx: &mut TickContext<'_>) {
    let config = ctx.config;
    let tuning = &config.reactor;
    let power = ctx.state.grid.electrical_power_output;
    let r = &mut ctx.state.reactor;

    let target = power * tuning.radiation_per_mw
        + r.meltdown_progress * tuning.radiation_per_meltdown_point;
    r.radiation_level += (target - r.radiation_level) * tuning.radiation_inertia;
    r.radiation_level = r.radiation_level.clamp(0.0, tuning.max_radiation);
}
