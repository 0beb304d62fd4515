//! Chapter progression

use crate::core::types::Severity;
use crate::simulation::events::EventKind;
use crate::simulation::systems::TickContext;

/// Step 7: advance to the next chapter once the current goal is met
pub fn advance_chapter(ctx: &mut TickContext<'_>) {
    let index = ctx.state.meta.current_chapter_index;
    if ctx.scenario.is_final_chapter(index) {
        return;
    }

    let scenario = ctx.scenario;
    let chapter = scenario.chapter(index);
    if !chapter.goal.is_met(ctx.state) {
        return;
    }

    ctx.state.meta.current_chapter_index = index + 1;
    let next = scenario.chapter(index + 1);
    tracing::debug!(
        tick = ctx.tick,
        from = chapter.id,
        to = next.id,
        "Chapter transition"
    );
    ctx.events.emit(
        ctx.tick,
        EventKind::ChapterComplete,
        Severity::Info,
        format!("CHAPTER COMPLETE: {}", chapter.title),
        format!("Next: {} ({})", next.title, next.year),
    );
}
