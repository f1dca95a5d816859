//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::TenantAuthServiceTrait;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub tenant_auth_service: Arc<dyn TenantAuthServiceTrait>,
}

impl AppState {
    pub fn new(tenant_auth_service: Arc<dyn TenantAuthServiceTrait>) -> Self {
        Self {
            tenant_auth_service,
        }
    }
}
