use thiserror::Error;

/// Error for user-store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Store operation failed: {0}")]
    Backend(String),
}

/// Top-level error for credential operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Password mismatch or missing user. Deliberately carries no detail.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account exists but is inactive or suspended. Mapped to the same
    /// outward response as `InvalidCredentials` to avoid a state oracle.
    #[error("Account is not active")]
    AccountNotActive,

    #[error("Password does not meet security requirements")]
    WeakPassword,

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
