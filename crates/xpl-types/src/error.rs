use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown characteristic key: {0}")]
    UnknownCharacteristic(String),

    #[error("unknown career class: {0}")]
    UnknownCareerClass(String),

    #[error("invalid skill level: {0} (expected 0..=3)")]
    InvalidSkillLevel(u8),

    #[error("invalid entry id: {0}")]
    InvalidEntryId(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
