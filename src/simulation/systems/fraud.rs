//! SPE trigger checks

use crate::core::types::Severity;
use crate::simulation::events::EventKind;
use crate::simulation::systems::TickContext;

/// Step 9: collapse every active SPE whose trigger price is above the score
///
/// Each collapse knocks the score down before the next SPE is checked, so
/// one failure can pull later SPEs under their triggers in the same tick.
pub fn check_triggers(ctx: &mut TickContext<'_>) {
    let divisor = ctx.config.fraud.spe_collapse_divisor.max(1.0);
    let tick = ctx.tick;
    let state = &mut *ctx.state;

    for spe in state.fraud.special_purpose_entities.iter_mut() {
        if !spe.is_active() || state.finance.stock_score >= spe.trigger_stock_price {
            continue;
        }
        let Some(debt) = spe.collapse(tick) else {
            continue;
        };

        state.finance.outstanding_loan += debt;
        state.finance.stock_score = (state.finance.stock_score - debt / divisor).max(0.0);
        tracing::debug!(tick, spe = %spe.id, debt, "SPE collapsed");
        ctx.events.emit(
            tick,
            EventKind::SpeCollapse,
            Severity::Danger,
            "SPE COLLAPSE",
            format!("{} failed. Debt returned to books.", spe.name),
        );
    }
}
