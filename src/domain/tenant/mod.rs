//! Tenant domain
//!
//! Organizations (tenants), their per-tenant connection details, and the
//! user-to-organization mappings held by the central management store.

mod entity;
mod repository;

pub use entity::{
    Organization, OrganizationId, TenantConnection, TenantDescriptor, UserOrganization,
};
pub use repository::TenantDirectory;

#[cfg(test)]
pub use repository::MockTenantDirectory;
