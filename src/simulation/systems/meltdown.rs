//! Meltdown accumulator

use crate::simulation::state::ReactorPhase;
use crate::simulation::systems::TickContext;

/// Step 5: grow progress while over a danger threshold, otherwise decay it
pub fn accumulate(ctx: &mut TickContext<'_>) {
    let tuning = &ctx.config.meltdown;
    let r = &mut ctx.state.reactor;

    let in_danger =
        r.core_temperature > tuning.danger_temperature || r.pressure > tuning.danger_pressure;
    r.meltdown_progress = if in_danger {
        (r.meltdown_progress + tuning.progress_rate).min(100.0)
    } else {
        (r.meltdown_progress - tuning.recovery_rate).max(0.0)
    };

    if r.phase != ReactorPhase::Destroyed {
        r.phase = if r.meltdown_progress > 0.0 {
            ReactorPhase::Melting
        } else {
            ReactorPhase::Running
        };
    }
}
