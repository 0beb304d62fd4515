//! Player command interface
//!
//! Console text -> `parser::parse_input` -> `Command` -> `CommandExecutor`
//! -> `CommandOutcome`. Every rejection leaves the state untouched and pushes
//! a notable event.

pub mod executor;
pub mod parser;

use serde::{Deserialize, Serialize};

use crate::core::types::Component;

pub use executor::{CommandContext, CommandExecutor};
pub use parser::{parse_input, ConsoleInput};

/// The enumerated player commands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum Command {
    /// Rod insertion percent; 100 is fully inserted
    SetControlRod(f64),
    SetSteamValve(f64),
    TogglePump,
    Repair(Component),
    CreateSpe,
    Lobby,
    CookBooks,
    ShredDocuments,
    SiphonToOffshore(f64),
    Borrow(f64),
    Refuel,
    UpgradePump,
    InstallAutoScram,
}

/// Why a command did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    SessionOver,
    InsufficientCash,
    InsufficientScore,
    InvalidAmount,
    CreditLimit,
    AlreadyInstalled,
    MaxLevel,
}

impl RejectReason {
    /// Shortfalls of money or score, as opposed to invalid requests
    pub fn is_insufficient_resource(self) -> bool {
        matches!(
            self,
            RejectReason::InsufficientCash
                | RejectReason::InsufficientScore
                | RejectReason::CreditLimit
        )
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RejectReason::SessionOver => "session over",
            RejectReason::InsufficientCash => "insufficient funds",
            RejectReason::InsufficientScore => "insufficient stock score",
            RejectReason::InvalidAmount => "invalid amount",
            RejectReason::CreditLimit => "credit limit exceeded",
            RejectReason::AlreadyInstalled => "already installed",
            RejectReason::MaxLevel => "already at maximum level",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Applied,
    Rejected(RejectReason),
}

impl CommandOutcome {
    pub fn is_applied(self) -> bool {
        self == CommandOutcome::Applied
    }
}
