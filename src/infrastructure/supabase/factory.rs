//! Per-tenant identity provider construction

use std::sync::Arc;

use tracing::debug;

use super::gotrue::GoTrueIdentityProvider;
use crate::domain::{DomainError, IdentityProvider, IdentityProviderFactory, TenantConnection};

/// Builds a GoTrue client for whichever tenant a request resolved to
///
/// The tenant's service-role key is used as the gateway credential.
#[derive(Debug, Clone)]
pub struct SupabaseIdentityProviderFactory {
    client: reqwest::Client,
}

impl SupabaseIdentityProviderFactory {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl IdentityProviderFactory for SupabaseIdentityProviderFactory {
    fn for_tenant(
        &self,
        connection: &TenantConnection,
    ) -> Result<Arc<dyn IdentityProvider>, DomainError> {
        let url = reqwest::Url::parse(connection.url()).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid tenant database URL '{}': {}",
                connection.url(),
                e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::configuration(format!(
                "Unsupported tenant database URL scheme '{}'",
                url.scheme()
            )));
        }

        debug!(tenant_url = %connection.url(), "Building tenant identity provider");

        Ok(Arc::new(GoTrueIdentityProvider::new(
            self.client.clone(),
            connection.url(),
            connection.service_role_key().clone(),
        )))
    }
}
