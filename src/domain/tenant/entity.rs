//! Organization (tenant) entity and related types

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Organization identifier as stored in the management store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(String);

impl OrganizationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connection details of a tenant's own database
///
/// The service-role key bypasses row-level security on the tenant database.
/// It is only used server-side and is not serializable.
#[derive(Debug, Clone)]
pub struct TenantConnection {
    url: String,
    anon_key: String,
    service_role_key: SecretString,
}

impl TenantConnection {
    pub fn new(
        url: impl Into<String>,
        anon_key: impl Into<String>,
        service_role_key: SecretString,
    ) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            service_role_key,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub fn service_role_key(&self) -> &SecretString {
        &self.service_role_key
    }
}

/// A tenant with its own isolated database
#[derive(Debug, Clone)]
pub struct Organization {
    id: OrganizationId,
    name: String,
    slug: String,
    connection: TenantConnection,
}

impl Organization {
    pub fn new(
        id: OrganizationId,
        name: impl Into<String>,
        slug: impl Into<String>,
        connection: TenantConnection,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            connection,
        }
    }

    pub fn id(&self) -> &OrganizationId {
        &self.id
    }

    pub fn connection(&self) -> &TenantConnection {
        &self.connection
    }

    /// Client-safe view of the organization: carries the anon key, never the service-role key
    pub fn descriptor(&self) -> TenantDescriptor {
        TenantDescriptor {
            id: self.id.clone(),
            name: self.name.clone(),
            slug: self.slug.clone(),
            supabase_url: self.connection.url().to_string(),
            supabase_anon_key: self.connection.anon_key().to_string(),
        }
    }
}

/// What a client needs to open its own connection to the tenant database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDescriptor {
    pub id: OrganizationId,
    pub name: String,
    pub slug: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

/// Proof that an email may log into an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOrganization {
    pub user_email: String,
    pub organization_id: OrganizationId,
}
