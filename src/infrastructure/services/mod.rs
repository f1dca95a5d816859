//! Infrastructure services

mod tenant_auth_service;

pub use tenant_auth_service::{TenantAuthService, TenantAuthServiceTrait};
