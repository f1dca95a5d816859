//! Management store access through PostgREST

use async_trait::async_trait;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::http_client::{normalize_base_url, send, unexpected_status, with_api_key};
use crate::domain::{
    DomainError, Organization, OrganizationId, TenantConnection, TenantDirectory,
    UserOrganization,
};

const STORE: &str = "management";
const ORGANIZATIONS_TABLE: &str = "organizations";
const MEMBERSHIPS_TABLE: &str = "user_organizations";
const ORGANIZATION_COLUMNS: &str =
    "id,name,slug,supabase_url,supabase_anon_key,supabase_service_role_key";
const MEMBERSHIP_COLUMNS: &str = "user_email,organization_id";

/// Row of the `organizations` table
#[derive(Deserialize)]
struct OrganizationRow {
    id: OrganizationId,
    name: String,
    slug: String,
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    supabase_service_role_key: Option<SecretString>,
}

impl OrganizationRow {
    fn into_organization(self) -> Result<Organization, DomainError> {
        let (url, anon_key, service_role_key) = match (
            self.supabase_url.filter(|u| !u.is_empty()),
            self.supabase_anon_key.filter(|k| !k.is_empty()),
            self.supabase_service_role_key,
        ) {
            (Some(url), Some(anon_key), Some(service_role_key)) => {
                (url, anon_key, service_role_key)
            }
            _ => {
                return Err(DomainError::configuration(format!(
                    "Organization '{}' has no tenant database configured",
                    self.slug
                )));
            }
        };

        Ok(Organization::new(
            self.id,
            self.name,
            self.slug,
            TenantConnection::new(url, anon_key, service_role_key),
        ))
    }
}

/// Tenant directory backed by the management store's REST interface
///
/// Authenticates with the management service-role key.
#[derive(Debug, Clone)]
pub struct PostgrestTenantDirectory {
    client: reqwest::Client,
    base_url: String,
    service_role_key: SecretString,
}

impl PostgrestTenantDirectory {
    pub fn new(
        client: reqwest::Client,
        base_url: impl AsRef<str>,
        service_role_key: SecretString,
    ) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url.as_ref()),
            service_role_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Fetch at most one row matching the given filters
    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        filters: &[(&str, String)],
    ) -> Result<Option<T>, DomainError> {
        let mut query: Vec<(&str, String)> = vec![("select", columns.to_string())];
        query.extend(filters.iter().cloned());
        query.push(("limit", "1".to_string()));

        let request = self
            .client
            .get(self.table_url(table))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query);

        let response = send(STORE, with_api_key(request, &self.service_role_key)).await?;

        if !response.status().is_success() {
            return Err(unexpected_status(STORE, response).await);
        }

        let rows: Vec<T> = response.json().await.map_err(|e| {
            DomainError::store(STORE, format!("Failed to parse {} rows: {}", table, e))
        })?;

        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl TenantDirectory for PostgrestTenantDirectory {
    async fn find_organization_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Organization>, DomainError> {
        debug!(slug = %slug, "Looking up organization");

        let row: Option<OrganizationRow> = self
            .select_one(
                ORGANIZATIONS_TABLE,
                ORGANIZATION_COLUMNS,
                &[("slug", eq(slug))],
            )
            .await?;

        row.map(OrganizationRow::into_organization).transpose()
    }

    async fn find_membership(
        &self,
        email: &str,
        organization_id: &OrganizationId,
    ) -> Result<Option<UserOrganization>, DomainError> {
        debug!(email = %email, organization_id = %organization_id, "Looking up membership");

        self.select_one(
            MEMBERSHIPS_TABLE,
            MEMBERSHIP_COLUMNS,
            &[
                ("user_email", eq(email)),
                ("organization_id", eq(organization_id.as_str())),
            ],
        )
        .await
    }
}

/// PostgREST equality filter
fn eq(value: &str) -> String {
    format!("eq.{}", value)
}
