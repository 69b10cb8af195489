/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("entry {index} uses schema version {found}; supported versions are 1 to {supported}")]
    UnsupportedSchemaVersion {
        index: usize,
        found: u32,
        supported: u32,
    },
}
