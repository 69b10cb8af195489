use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] xpl_ledger::LedgerError),

    #[error("gate error: {0}")]
    Gate(#[from] xpl_gate::GateError),

    #[error("grant error: {0}")]
    Grant(#[from] xpl_grants::GrantError),
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
