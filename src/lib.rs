//! Tenant Auth Gateway
//!
//! Multi-tenant credential routing for Supabase-backed organizations:
//! - Resolves an organization slug in the central management store
//! - Checks the user is mapped to that organization
//! - Authenticates against the organization's own database
//! - Returns the session plus the tenant's URL and anon key

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::services::TenantAuthService;
use infrastructure::supabase::{
    build_http_client, PostgrestTenantDirectory, SupabaseIdentityProviderFactory,
};
use tracing::info;

/// Create the application state from configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let (management_url, service_role_key) = config
        .management
        .require()
        .map_err(|e| anyhow::anyhow!("Management store not configured: {}", e))?;

    let client = build_http_client(config.http.timeout())?;

    info!(management_url = %management_url, "Using management store");

    let directory = Arc::new(PostgrestTenantDirectory::new(
        client.clone(),
        management_url,
        service_role_key.clone(),
    ));
    let providers = Arc::new(SupabaseIdentityProviderFactory::new(client));

    let service = TenantAuthService::new(directory, providers);

    Ok(AppState::new(Arc::new(service)))
}
