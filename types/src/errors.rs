use thiserror::Error;

/// Errors produced while normalizing a payload before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The song title must not be empty.")]
    EmptyTitle,
    #[error("Malformed song id: {0}")]
    InvalidId(String),
}
