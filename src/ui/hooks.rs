//! Event hooks: sound cues and log mirroring

use crate::core::types::Severity;
use crate::simulation::events::{EventKind, NotableEvent};

/// Audio cue a front end may play for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Alarm,
    Notify,
    Buy,
    Repair,
    Cash,
    Shred,
    Error,
    Build,
}

pub fn cue_for(event: &NotableEvent) -> Cue {
    if event.severity == Severity::Danger {
        return Cue::Alarm;
    }
    match event.kind {
        EventKind::Purchased => Cue::Buy,
        EventKind::Repaired => Cue::Repair,
        EventKind::FundsMoved => Cue::Cash,
        EventKind::DocumentsShredded => Cue::Shred,
        EventKind::InsufficientResource | EventKind::Rejected => Cue::Error,
        EventKind::SpeCreated => Cue::Build,
        _ => Cue::Notify,
    }
}

/// Receives every notable event the session publishes
pub trait EventHook: Send {
    fn on_event(&mut self, event: &NotableEvent);
}

/// Mirrors events into `tracing` at a level matching their severity
#[derive(Debug, Default)]
pub struct TracingHook;

impl EventHook for TracingHook {
    fn on_event(&mut self, event: &NotableEvent) {
        match event.severity {
            Severity::Info => tracing::info!(tick = event.tick, kind = ?event.kind, "{}", event),
            Severity::Warning => tracing::warn!(tick = event.tick, kind = ?event.kind, "{}", event),
            Severity::Danger => tracing::error!(tick = event.tick, kind = ?event.kind, "{}", event),
        }
    }
}

/// Collects cues for a front end to drain
#[derive(Debug, Default)]
pub struct CueQueue {
    pending: Vec<Cue>,
}

impl CueQueue {
    pub fn drain(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.pending)
    }
}

impl EventHook for CueQueue {
    fn on_event(&mut self, event: &NotableEvent) {
        self.pending.push(cue_for(event));
    }
}
