use auth::Algorithm;
use serde::Deserialize;
use serde::Serialize;

/// Account lifecycle status.
///
/// Only active accounts may authenticate; inactive and suspended accounts
/// are rejected at login without revealing which state they are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    Active,
    Inactive,
    Suspended,
}

/// Credential record, owned by the external user store.
///
/// The core reads it for verification and hands back a replacement
/// hash + salt pair on password change; it never persists the record
/// itself. The algorithm tag is fixed per record — a record hashed under
/// one tag is always verified under the same tag.
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub algorithm: Algorithm,
    pub status: AccountStatus,
    pub roles: Vec<String>,
    pub clients: Vec<i64>,
}

impl Credential {
    /// Whether this account is allowed to authenticate.
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(status: AccountStatus) -> Credential {
        Credential {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            password_salt: "salt".to_string(),
            algorithm: Algorithm::Bcrypt,
            status,
            roles: vec![],
            clients: vec![],
        }
    }

    #[test]
    fn test_only_active_accounts_may_authenticate() {
        assert!(credential(AccountStatus::Active).is_active());
        assert!(!credential(AccountStatus::Inactive).is_active());
        assert!(!credential(AccountStatus::Suspended).is_active());
    }
}
