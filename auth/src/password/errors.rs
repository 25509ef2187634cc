use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Unsupported password algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
