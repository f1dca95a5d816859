//! Tenant directory trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Organization, OrganizationId, UserOrganization};
use crate::domain::DomainError;

/// Read access to the management store's tenant registry
///
/// Lookups that find nothing return `Ok(None)`; `Err` is reserved for
/// failures to reach or understand the store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Find the organization whose slug matches exactly
    async fn find_organization_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Organization>, DomainError>;

    /// Find the mapping between an email and an organization
    ///
    /// Callers pass the email already normalized to lower case.
    async fn find_membership(
        &self,
        email: &str,
        organization_id: &OrganizationId,
    ) -> Result<Option<UserOrganization>, DomainError>;
}
