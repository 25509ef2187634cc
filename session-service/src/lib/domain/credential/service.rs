use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenService;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::ports::UserStore;

/// Credential verification glue between the user store, the password
/// hasher, and the token service.
///
/// Owns the full login/logout/password-change flows; the store behind the
/// port is the single source of truth for credential records.
pub struct CredentialVerifier<S>
where
    S: UserStore,
{
    store: Arc<S>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl<S> CredentialVerifier<S>
where
    S: UserStore,
{
    /// Create a new credential verifier with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User store implementation
    /// * `tokens` - Shared token service
    pub fn new(store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            tokens,
        }
    }

    /// Verify credentials and issue a session token.
    ///
    /// The identity is looked up by email when it contains `@`, by
    /// username otherwise. Roles and client scope from the credential
    /// record are embedded into the issued token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identity or password mismatch
    /// * `AccountNotActive` - Account is inactive or suspended
    /// * `Store` - Store lookup failed
    /// * `Token` - Token issuance failed
    pub async fn login(&self, identity: &str, password: &str) -> Result<String, CredentialError> {
        let credential = self
            .lookup(identity)
            .await?
            .ok_or(CredentialError::InvalidCredentials)?;

        if !credential.is_active() {
            tracing::debug!(subject = %credential.username, "Login rejected for non-active account");
            return Err(CredentialError::AccountNotActive);
        }

        if !self.hasher.verify(
            credential.algorithm,
            &credential.password_salt,
            password,
            &credential.password_hash,
        ) {
            return Err(CredentialError::InvalidCredentials);
        }

        let token = self.tokens.issue(
            &credential.username,
            credential.roles.clone(),
            credential.clients.clone(),
        )?;

        tracing::info!(subject = %credential.username, "Login succeeded");
        Ok(token)
    }

    /// Revoke a session token.
    ///
    /// Always succeeds: revoking an unparsable token is a no-op, since such
    /// a token could never validate anyway.
    pub fn logout(&self, token: &str) {
        self.tokens.revoke(token);
    }

    /// Replace a subject's password after verifying the current one.
    ///
    /// The replacement hash + salt pair is computed under the record's
    /// existing algorithm tag and handed back to the store.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown subject or current password mismatch
    /// * `WeakPassword` - New password fails the strength policy
    /// * `Password` - Hash computation failed
    /// * `Store` - Store lookup or save failed
    pub async fn change_password(
        &self,
        subject: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), CredentialError> {
        let mut credential = self
            .store
            .find_by_username(subject)
            .await?
            .ok_or(CredentialError::InvalidCredentials)?;

        if !self.hasher.verify(
            credential.algorithm,
            &credential.password_salt,
            current_password,
            &credential.password_hash,
        ) {
            return Err(CredentialError::InvalidCredentials);
        }

        if !self.hasher.is_password_secure(new_password) {
            return Err(CredentialError::WeakPassword);
        }

        let replacement = self.hasher.generate(credential.algorithm, new_password)?;
        credential.password_salt = replacement.salt;
        credential.password_hash = replacement.hash;
        self.store.save(credential).await?;

        tracing::info!(subject = %subject, "Password changed");
        Ok(())
    }

    async fn lookup(&self, identity: &str) -> Result<Option<Credential>, CredentialError> {
        let found = if identity.contains('@') {
            self.store.find_by_email(identity).await?
        } else {
            self.store.find_by_username(identity).await?
        };
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use auth::Algorithm;
    use auth::RevocationList;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::credential::errors::StoreError;
    use crate::credential::models::AccountStatus;
    use async_trait::async_trait;

    mock! {
        pub TestUserStore {}

        #[async_trait]
        impl UserStore for TestUserStore {
            async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError>;
            async fn save(&self, credential: Credential) -> Result<(), StoreError>;
        }
    }

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            b"test-secret-key-for-jwt-signing-at-least-32-bytes",
            "session-service",
            Duration::minutes(30),
            Arc::new(RevocationList::new()),
        ))
    }

    fn credential(algorithm: Algorithm, password: &str, status: AccountStatus) -> Credential {
        let hasher = PasswordHasher::new();
        let pair = hasher.generate(algorithm, password).unwrap();
        Credential {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: pair.hash,
            password_salt: pair.salt,
            algorithm,
            status,
            roles: vec!["admin".to_string()],
            clients: vec![7],
        }
    }

    #[tokio::test]
    async fn test_login_success_issues_token_with_record_claims() {
        let mut store = MockTestUserStore::new();
        let stored = credential(Algorithm::Bcrypt, "Corr3ct-pass!", AccountStatus::Active);
        store
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let tokens = token_service();
        let verifier = CredentialVerifier::new(Arc::new(store), Arc::clone(&tokens));

        let token = verifier.login("alice", "Corr3ct-pass!").await.unwrap();

        assert!(tokens.validate(&token, "alice"));
        assert_eq!(tokens.extract_roles(&token).unwrap(), vec!["admin"]);
        assert_eq!(tokens.extract_clients(&token).unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn test_login_by_email_uses_email_lookup() {
        let mut store = MockTestUserStore::new();
        let stored = credential(Algorithm::Sha256, "Corr3ct-pass!", AccountStatus::Active);
        store
            .expect_find_by_email()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        store.expect_find_by_username().times(0);

        let verifier = CredentialVerifier::new(Arc::new(store), token_service());

        let result = verifier.login("alice@example.com", "Corr3ct-pass!").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut store = MockTestUserStore::new();
        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let verifier = CredentialVerifier::new(Arc::new(store), token_service());

        let result = verifier.login("nobody", "whatever").await;
        assert!(matches!(result, Err(CredentialError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut store = MockTestUserStore::new();
        let stored = credential(Algorithm::Sha512, "Corr3ct-pass!", AccountStatus::Active);
        store
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let verifier = CredentialVerifier::new(Arc::new(store), token_service());

        let result = verifier.login("alice", "wrong-password").await;
        assert!(matches!(result, Err(CredentialError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_suspended_account() {
        let mut store = MockTestUserStore::new();
        let stored = credential(Algorithm::Bcrypt, "Corr3ct-pass!", AccountStatus::Suspended);
        store
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let verifier = CredentialVerifier::new(Arc::new(store), token_service());

        let result = verifier.login("alice", "Corr3ct-pass!").await;
        assert!(matches!(result, Err(CredentialError::AccountNotActive)));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let mut store = MockTestUserStore::new();
        let stored = credential(Algorithm::Bcrypt, "Corr3ct-pass!", AccountStatus::Active);
        store
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let tokens = token_service();
        let verifier = CredentialVerifier::new(Arc::new(store), Arc::clone(&tokens));

        let token = verifier.login("alice", "Corr3ct-pass!").await.unwrap();
        assert!(tokens.validate(&token, "alice"));

        verifier.logout(&token);

        assert!(!tokens.validate(&token, "alice"));
    }

    #[tokio::test]
    async fn test_change_password_persists_new_verifiable_pair() {
        let mut store = MockTestUserStore::new();
        let stored = credential(Algorithm::Md5, "Curr3nt-pass!", AccountStatus::Active);
        store
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        store
            .expect_save()
            .withf(|saved| {
                // Tag is preserved and the new pair verifies the new password.
                saved.algorithm == Algorithm::Md5
                    && PasswordHasher::new().verify(
                        saved.algorithm,
                        &saved.password_salt,
                        "N3w-password!",
                        &saved.password_hash,
                    )
            })
            .times(1)
            .returning(|_| Ok(()));

        let verifier = CredentialVerifier::new(Arc::new(store), token_service());

        let result = verifier
            .change_password("alice", "Curr3nt-pass!", "N3w-password!")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_wrong_current() {
        let mut store = MockTestUserStore::new();
        let stored = credential(Algorithm::Bcrypt, "Curr3nt-pass!", AccountStatus::Active);
        store
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        store.expect_save().times(0);

        let verifier = CredentialVerifier::new(Arc::new(store), token_service());

        let result = verifier
            .change_password("alice", "wrong-current", "N3w-password!")
            .await;
        assert!(matches!(result, Err(CredentialError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_change_password_rejects_weak_password() {
        let mut store = MockTestUserStore::new();
        let stored = credential(Algorithm::Bcrypt, "Curr3nt-pass!", AccountStatus::Active);
        store
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        store.expect_save().times(0);

        let verifier = CredentialVerifier::new(Arc::new(store), token_service());

        let result = verifier
            .change_password("alice", "Curr3nt-pass!", "weakpass")
            .await;
        assert!(matches!(result, Err(CredentialError::WeakPassword)));
    }
}
