/// Infrastructure errors for grant validation. Grant problems found in a
/// player's selections are [`crate::GrantIssue`] values, not errors.
#[derive(Debug, thiserror::Error)]
pub enum GrantError {
    /// Policy is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Selections could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GrantError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
