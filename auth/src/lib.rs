//! Authentication utilities library
//!
//! Provides the reusable authentication core for the session service:
//! - Password hashing under a closed set of algorithms
//!   (bcrypt plus the legacy SHA/MD5 family)
//! - Signed session token issuance, validation, and revocation
//!
//! Services adapt these building blocks behind their own domain traits;
//! the library itself knows nothing about HTTP or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{Algorithm, PasswordHasher};
//!
//! let hasher = PasswordHasher::new();
//! let salt = hasher.generate_salt(Algorithm::Bcrypt);
//! let hash = hasher.hash(Algorithm::Bcrypt, &salt, "my_password").unwrap();
//! assert!(hasher.verify(Algorithm::Bcrypt, &salt, "my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use std::sync::Arc;
//! use auth::{RevocationList, TokenService};
//!
//! let service = TokenService::new(
//!     b"secret_key_at_least_32_bytes_long!!!",
//!     "my-service",
//!     chrono::Duration::minutes(30),
//!     Arc::new(RevocationList::new()),
//! );
//! let token = service.issue("user123", vec!["admin".into()], vec![1]).unwrap();
//! assert!(service.validate(&token, "user123"));
//! service.revoke(&token);
//! assert!(!service.validate(&token, "user123"));
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::Algorithm;
pub use password::PasswordError;
pub use password::PasswordHashResult;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::RevocationList;
pub use token::TokenError;
pub use token::TokenService;
