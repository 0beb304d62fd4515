use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeltdownError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid scenario data: {0}")]
    InvalidScenario(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Advisory service error: {0}")]
    AdvisoryError(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MeltdownError>;
