//! Presentation adapters
//!
//! Thin buffers and hooks a front end builds on. The simulation pushes
//! events and snapshots here; nothing flows back.

pub mod hooks;
pub mod state;

pub use hooks::{cue_for, Cue, CueQueue, EventHook, TracingHook};
pub use state::{Dashboard, LogBook, ScoreHistory, ScorePoint};
