use std::fmt;
use std::str::FromStr;

use md5::Md5;
use rand::RngCore;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use sha2::Sha512;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Salt length in raw bytes (32 lowercase hex characters once encoded).
const SALT_LENGTH: usize = 16;

/// bcrypt cost factor applied at hash time.
const BCRYPT_COST: u32 = 10;

/// Minimum length for a password to be considered secure.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters counted as "special" by the password policy.
const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";

/// Closed set of supported password hash algorithms.
///
/// Every credential record carries exactly one tag, and a record hashed
/// under one tag must always be verified under the same tag. The SHA
/// variants exist for compatibility with legacy stored credentials; new
/// credentials should use `Bcrypt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    Bcrypt,
    Sha256,
    Md5,
    Sha512,
}

impl Algorithm {
    /// Storage tag for this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Bcrypt => "BCRYPT",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Md5 => "MD5",
            Algorithm::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BCRYPT" => Ok(Algorithm::Bcrypt),
            "SHA256" => Ok(Algorithm::Sha256),
            "MD5" => Ok(Algorithm::Md5),
            "SHA512" => Ok(Algorithm::Sha512),
            other => Err(PasswordError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Freshly generated salt + hash pair, ready for persistence.
///
/// Opaque to everything except the hasher that produced it and the store
/// that persists it.
#[derive(Debug, Clone)]
pub struct PasswordHashResult {
    pub salt: String,
    pub hash: String,
}

/// Password hashing implementation dispatching on a closed algorithm set.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh random salt for the given algorithm.
    ///
    /// 16 bytes from a cryptographically secure source, encoded as 32
    /// lowercase hex characters. bcrypt consumes the same material; its
    /// cost factor is applied at hash time and embedded in the hash output.
    ///
    /// # Returns
    /// Hex-encoded salt string
    pub fn generate_salt(&self, _algorithm: Algorithm) -> String {
        let mut bytes = [0u8; SALT_LENGTH];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Hash a password under the given algorithm and salt.
    ///
    /// # Arguments
    /// * `algorithm` - Algorithm tag the credential record is stored under
    /// * `salt` - Hex-encoded salt from `generate_salt`
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// For bcrypt, a modular-crypt string embedding cost and salt. For the
    /// SHA family, the lowercase hex digest of (salt bytes ‖ password bytes).
    ///
    /// # Errors
    /// * `InvalidArgument` - Empty password or salt, or salt is not valid hex
    /// * `HashingFailed` - Underlying hash computation failed
    pub fn hash(
        &self,
        algorithm: Algorithm,
        salt: &str,
        password: &str,
    ) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::InvalidArgument(
                "password must not be empty".to_string(),
            ));
        }
        if salt.is_empty() {
            return Err(PasswordError::InvalidArgument(
                "salt must not be empty".to_string(),
            ));
        }

        let salt_bytes = hex::decode(salt)
            .map_err(|e| PasswordError::InvalidArgument(format!("salt is not valid hex: {}", e)))?;

        match algorithm {
            Algorithm::Bcrypt => {
                let salt_array: [u8; SALT_LENGTH] = salt_bytes.try_into().map_err(|_| {
                    PasswordError::InvalidArgument(format!(
                        "bcrypt salt must be {} bytes",
                        SALT_LENGTH
                    ))
                })?;
                bcrypt::hash_with_salt(password, BCRYPT_COST, salt_array)
                    .map(|parts| parts.to_string())
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
            Algorithm::Sha256 => Ok(Self::digest_hex::<Sha256>(&salt_bytes, password)),
            Algorithm::Md5 => Ok(Self::digest_hex::<Md5>(&salt_bytes, password)),
            Algorithm::Sha512 => Ok(Self::digest_hex::<Sha512>(&salt_bytes, password)),
        }
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Never fails: empty inputs and internal computation errors all yield
    /// `false`. bcrypt uses the algorithm's own constant-time check; the SHA
    /// family recomputes the digest and compares in constant time.
    ///
    /// # Arguments
    /// * `algorithm` - Algorithm tag the record was hashed under
    /// * `salt` - Stored hex-encoded salt
    /// * `password` - Plaintext password to check
    /// * `expected_hash` - Stored hash to compare against
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    pub fn verify(
        &self,
        algorithm: Algorithm,
        salt: &str,
        password: &str,
        expected_hash: &str,
    ) -> bool {
        if password.is_empty() || salt.is_empty() || expected_hash.is_empty() {
            return false;
        }

        match algorithm {
            Algorithm::Bcrypt => bcrypt::verify(password, expected_hash).unwrap_or(false),
            Algorithm::Sha256 | Algorithm::Md5 | Algorithm::Sha512 => {
                match self.hash(algorithm, salt, password) {
                    Ok(computed) => {
                        bool::from(computed.as_bytes().ct_eq(expected_hash.as_bytes()))
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Password verification could not recompute hash");
                        false
                    }
                }
            }
        }
    }

    /// Generate a fresh salt + hash pair for a new password.
    ///
    /// # Errors
    /// * `InvalidArgument` - Empty password
    /// * `HashingFailed` - Underlying hash computation failed
    pub fn generate(
        &self,
        algorithm: Algorithm,
        password: &str,
    ) -> Result<PasswordHashResult, PasswordError> {
        let salt = self.generate_salt(algorithm);
        let hash = self.hash(algorithm, &salt, password)?;
        Ok(PasswordHashResult { salt, hash })
    }

    /// Check whether a password satisfies the strength policy.
    ///
    /// Requires length >= 8 with at least one uppercase letter, one
    /// lowercase letter, one digit, and one special character. Purely a
    /// policy predicate, independent of hashing.
    pub fn is_password_secure(&self, password: &str) -> bool {
        password.len() >= MIN_PASSWORD_LENGTH
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
    }

    fn digest_hex<D: Digest>(salt: &[u8], password: &str) -> String {
        let mut hasher = D::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
