//! Notable events emitted by ticks and commands

use serde::{Deserialize, Serialize};

use crate::core::types::{Severity, Tick};

/// What produced a notable event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ScenarioEvent,
    WeatherChange,
    LobbyMitigation,
    Brownout,
    TurbineOverspeed,
    AutoScram,
    ChapterComplete,
    SpeCreated,
    SpeCollapse,
    GameOver,
    Repaired,
    Purchased,
    FundsMoved,
    DocumentsShredded,
    InsufficientResource,
    Rejected,
}

/// An alert or log line for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotableEvent {
    pub tick: Tick,
    pub kind: EventKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl std::fmt::Display for NotableEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{}: {}", self.title, self.message)
        }
    }
}

/// Events collected since the last drain
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<NotableEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(
        &mut self,
        tick: Tick,
        kind: EventKind,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.events.push(NotableEvent {
            tick,
            kind,
            severity,
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotableEvent> {
        self.events.iter()
    }

    pub fn drain(&mut self) -> Vec<NotableEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_and_drain() {
        let mut log = EventLog::new();
        log.emit(3, EventKind::Brownout, Severity::Warning, "BROWNOUT DETECTED", "Low Frequency");
        assert_eq!(log.len(), 1);

        let drained = log.drain();
        assert!(log.is_empty());
        assert_eq!(drained[0].to_string(), "BROWNOUT DETECTED: Low Frequency");
    }
}
