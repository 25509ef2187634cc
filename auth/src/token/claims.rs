use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Serialized as the JWT payload. Carries the bearer's identity plus the
/// authorization context derived at login time. Immutable once issued;
/// re-authentication supersedes a token, it never mutates one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (identity the token asserts)
    pub sub: String,

    /// Issuer label
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp); always strictly after `iat`
    pub exp: i64,

    /// Role names granted to the subject
    pub roles: Vec<String>,

    /// Client identifiers the subject is scoped to
    pub clients: Vec<i64>,
}

impl Claims {
    /// Build claims for a new token issued now.
    ///
    /// # Arguments
    /// * `subject` - Identity string
    /// * `issuer` - Fixed issuer label
    /// * `ttl` - Time to live; added to the current time for `exp`
    /// * `roles` - Role names to embed
    /// * `clients` - Client scope to embed
    pub fn new(
        subject: impl Into<String>,
        issuer: impl Into<String>,
        ttl: Duration,
        roles: Vec<String>,
        clients: Vec<i64>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            iss: issuer.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            roles,
            clients,
        }
    }

    /// Check whether the token is expired at the given instant.
    ///
    /// Expiry is inclusive: a token whose `exp` equals the current time is
    /// already expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
