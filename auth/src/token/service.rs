use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::blacklist::RevocationList;
use super::claims::Claims;
use super::errors::TokenError;

/// Session token service: issuance, parsing, validation, revocation.
///
/// Tokens are compact JWTs signed with HS256 over a process-wide symmetric
/// key. Logically each token moves `Valid -> {Expired | Revoked}` and never
/// back; revocation is tracked in a [`RevocationList`] owned by the caller
/// and shared with the periodic purge task.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    ttl: Duration,
    revocations: Arc<RevocationList>,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing key (length enforced at config load)
    /// * `issuer` - Fixed issuer label stamped into every token
    /// * `ttl` - Token time to live
    /// * `revocations` - Shared revocation store
    pub fn new(
        secret: &[u8],
        issuer: impl Into<String>,
        ttl: Duration,
        revocations: Arc<RevocationList>,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
            ttl,
            revocations,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identity string
    /// * `roles` - Role names to embed
    /// * `clients` - Client scope to embed
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        roles: Vec<String>,
        clients: Vec<i64>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, self.issuer.clone(), self.ttl, roles, clients);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Parse a token and verify its signature, returning all claims.
    ///
    /// Expiry is deliberately not checked here: structural validity and
    /// expiry are separate questions, and revocation needs the expiry of
    /// tokens that may already be expired. No claim is trusted before the
    /// signature verifies.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `SignatureInvalid` - Token parses but the MAC does not match
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Extract the subject claim from a verified token.
    ///
    /// # Errors
    /// * `Malformed` / `SignatureInvalid` - Token cannot be trusted
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.parse(token)?.sub)
    }

    /// Extract the role names from a verified token.
    ///
    /// # Errors
    /// * `Malformed` / `SignatureInvalid` - Token cannot be trusted
    pub fn extract_roles(&self, token: &str) -> Result<Vec<String>, TokenError> {
        Ok(self.parse(token)?.roles)
    }

    /// Extract the client scope from a verified token.
    ///
    /// # Errors
    /// * `Malformed` / `SignatureInvalid` - Token cannot be trusted
    pub fn extract_clients(&self, token: &str) -> Result<Vec<i64>, TokenError> {
        Ok(self.parse(token)?.clients)
    }

    /// Extract the expiry timestamp from a verified token.
    ///
    /// # Errors
    /// * `Malformed` / `SignatureInvalid` - Token cannot be trusted
    pub fn extract_expiry(&self, token: &str) -> Result<i64, TokenError> {
        Ok(self.parse(token)?.exp)
    }

    /// Check whether a token's expiry is at or before the current time.
    ///
    /// # Errors
    /// * `Malformed` / `SignatureInvalid` - Token cannot be trusted
    pub fn is_expired(&self, token: &str) -> Result<bool, TokenError> {
        let claims = self.parse(token)?;
        Ok(claims.is_expired(Utc::now().timestamp()))
    }

    /// Check whether a token's literal string form has been revoked.
    pub fn is_blacklisted(&self, token: &str) -> bool {
        self.revocations.contains(token)
    }

    /// Validate a token against an expected subject.
    ///
    /// True iff the token parses and its signature verifies, the subject
    /// matches exactly, it is not expired, and it is not revoked. Any
    /// internal failure is treated as invalid — this never errors.
    pub fn validate(&self, token: &str, expected_subject: &str) -> bool {
        let claims = match self.parse(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Token failed validation");
                return false;
            }
        };

        claims.sub == expected_subject
            && !claims.is_expired(Utc::now().timestamp())
            && !self.is_blacklisted(token)
    }

    /// Revoke a token, invalidating it immediately.
    ///
    /// The token is parsed only to bound how long the revocation entry must
    /// be retained. An unparsable or unsigned token could never validate,
    /// so revoking it is a logged no-op.
    pub fn revoke(&self, token: &str) {
        match self.parse(token) {
            Ok(claims) => {
                self.revocations.insert(token, claims.exp);
                tracing::info!(subject = %claims.sub, "Token revoked");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring revocation of unparsable token");
            }
        }
    }

    /// Remove revocation entries whose expiry has already passed.
    ///
    /// Intended to run periodically to bound memory growth; safe to run
    /// concurrently with ongoing revocations and lookups.
    ///
    /// # Returns
    /// Number of entries removed
    pub fn purge_expired_revocations(&self) -> usize {
        self.revocations.purge_expired(Utc::now().timestamp())
    }
}
