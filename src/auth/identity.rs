use async_trait::async_trait;

use crate::errors::Result;

/// External identity provider seam. The engine only needs credential
/// registration when the operator onboards a client; sign-in mechanics
/// stay entirely on the provider's side.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Registers a login credential and returns the provider's stable
    /// principal id. Duplicate emails and weak passwords must surface as
    /// `Error::Validation(ValidationError::CredentialRejected)`.
    async fn register_credential(&self, email: &str, password: &str) -> Result<String>;
}
