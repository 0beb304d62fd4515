//! One fixed-timestep update
//!
//! Execution order within a tick:
//! 1. clock, calendar, scripted events, weather
//! 2. reactor neutronics
//! 3. thermal-hydraulics, auto-SCRAM, radiation
//! 4. turbine and grid coupling, brownout, overspeed, wear
//! 5. meltdown accumulator
//! 6. finance
//! 7. chapter progression
//! 8. lobbying shield decay
//! 9. SPE trigger checks
//!
//! After the systems run, bounded fields are clamped and terminal
//! conditions are evaluated in their fixed order.

use crate::simulation::systems::{
    clock, finance, fraud, grid, lobbying, meltdown, progression, reactor, terminal, TickContext,
};

/// Run every system once against `ctx`. Callers must not invoke this on a
/// finished session.
pub fn run_tick(ctx: &mut TickContext<'_>) {
    debug_assert!(!ctx.state.is_game_over());

    clock::advance(ctx);

    reactor::neutronics(ctx);
    reactor::thermal_hydraulics(ctx);
    reactor::auto_scram(ctx);
    reactor::radiation(ctx);

    grid::turbine(ctx);
    grid::brownout(ctx);
    grid::overspeed(ctx);
    grid::wear(ctx);

    meltdown::accumulate(ctx);
    finance::update(ctx);
    progression::advance_chapter(ctx);
    lobbying::decay_shield(ctx);
    fraud::check_triggers(ctx);

    ctx.state.clamp_bounds(
        ctx.config.reactor.max_radiation,
        ctx.config.grid.max_frequency,
    );
    terminal::check(ctx);
}
