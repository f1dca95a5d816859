//! Identity provider traits

use std::sync::Arc;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::PasswordGrant;
use crate::domain::tenant::TenantConnection;
use crate::domain::DomainError;

/// Password authentication against one tenant's identity store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate an email/password pair
    ///
    /// Rejected credentials yield `DomainError::Authentication` carrying the
    /// provider's message; transport failures yield `DomainError::Store`.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PasswordGrant, DomainError>;
}

/// Builds an identity provider from connection details resolved at request time
#[cfg_attr(test, automock)]
pub trait IdentityProviderFactory: Send + Sync {
    fn for_tenant(
        &self,
        connection: &TenantConnection,
    ) -> Result<Arc<dyn IdentityProvider>, DomainError>;
}
