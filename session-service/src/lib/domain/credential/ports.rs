use async_trait::async_trait;

use crate::credential::errors::StoreError;
use crate::credential::models::Credential;

/// Narrow interface to the external user store.
///
/// The core reads credential records through this port and hands back
/// updated records after a password change. Anything else the store can
/// do — entity CRUD, pagination, migrations — is outside this surface.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Look up a credential record by username.
    ///
    /// # Returns
    /// Optional credential record (None if not found)
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError>;

    /// Look up a credential record by email address.
    ///
    /// # Returns
    /// Optional credential record (None if not found)
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError>;

    /// Persist an updated credential record.
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn save(&self, credential: Credential) -> Result<(), StoreError>;
}
