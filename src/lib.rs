//! Meltdown Manager - reactor, grid and creative-accounting simulation

pub mod command;
pub mod core;
pub mod llm;
pub mod scenario;
pub mod session;
pub mod simulation;
pub mod ui;
