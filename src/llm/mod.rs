//! Optional advisory text service
//!
//! Generates display-only headlines. Nothing here reads or writes the live
//! simulation state; it only sees snapshot summaries.

pub mod advisor;
pub mod client;
pub mod context;

pub use advisor::{Advisor, AdvisoryTopic};
pub use client::LlmClient;
pub use context::AdvisoryContext;
