/// Errors raised while building a gate. Guard decisions themselves never
/// fail; rejections are values (see [`crate::GuardResult`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}
