//! Tenant authentication pipeline
//!
//! Resolves the tenant, checks the user is mapped to it, and only then
//! authenticates against the tenant's own identity provider. Each step
//! short-circuits on failure so a later store is never contacted for a
//! request an earlier step rejected.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::{
    Credentials, DomainError, IdentityProviderFactory, LoginRequest, LoginStage, Organization,
    PasswordGrant, TenantDirectory, TenantLogin,
};

const ORGANIZATION_NOT_FOUND: &str = "Organization not found";
const USER_NOT_AUTHORIZED: &str = "User not authorized for this organization";

/// Trait for tenant login operations
#[async_trait]
pub trait TenantAuthServiceTrait: Send + Sync {
    async fn login(&self, request: LoginRequest) -> Result<TenantLogin, DomainError>;
}

/// Routes logins to the identity provider of the tenant they name
pub struct TenantAuthService<D: TenantDirectory, F: IdentityProviderFactory> {
    directory: Arc<D>,
    providers: Arc<F>,
}

impl<D: TenantDirectory, F: IdentityProviderFactory> TenantAuthService<D, F> {
    pub fn new(directory: Arc<D>, providers: Arc<F>) -> Self {
        Self {
            directory,
            providers,
        }
    }

    /// Run the full login pipeline for one request
    pub async fn login(&self, request: LoginRequest) -> Result<TenantLogin, DomainError> {
        let mut stage = LoginStage::Received;
        let result = self.run(request, &mut stage).await;

        match &result {
            Ok(login) => {
                advance(&mut stage);
                info!(
                    organization = %login.organization.slug,
                    user_id = %login.user.id,
                    stage = %stage,
                    "Tenant login succeeded"
                );
            }
            Err(e) if e.is_infrastructure() => {
                error!(stage = %stage, error = %e, "Tenant login failed");
            }
            Err(e) => {
                warn!(stage = %stage, error = %e, "Tenant login rejected");
            }
        }

        result
    }

    async fn run(
        &self,
        request: LoginRequest,
        stage: &mut LoginStage,
    ) -> Result<TenantLogin, DomainError> {
        let credentials = request.validate()?;
        advance(stage);

        let organization = self.resolve_tenant(&credentials).await?;
        advance(stage);

        self.authorize(&credentials, &organization).await?;
        advance(stage);

        let grant = self.authenticate(&credentials, &organization).await?;
        advance(stage);

        Ok(TenantLogin {
            session: grant.session,
            user: grant.user,
            organization: organization.descriptor(),
        })
    }

    async fn resolve_tenant(&self, credentials: &Credentials) -> Result<Organization, DomainError> {
        self.directory
            .find_organization_by_slug(credentials.organization_slug())
            .await?
            .ok_or_else(|| DomainError::not_found(ORGANIZATION_NOT_FOUND))
    }

    async fn authorize(
        &self,
        credentials: &Credentials,
        organization: &Organization,
    ) -> Result<(), DomainError> {
        let email = credentials.membership_email();

        match self.directory.find_membership(&email, organization.id()).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::forbidden(USER_NOT_AUTHORIZED)),
        }
    }

    async fn authenticate(
        &self,
        credentials: &Credentials,
        organization: &Organization,
    ) -> Result<PasswordGrant, DomainError> {
        let provider = self.providers.for_tenant(organization.connection())?;

        provider
            .sign_in_with_password(credentials.email(), credentials.password())
            .await
    }
}

#[async_trait]
impl<D, F> TenantAuthServiceTrait for TenantAuthService<D, F>
where
    D: TenantDirectory + 'static,
    F: IdentityProviderFactory + 'static,
{
    async fn login(&self, request: LoginRequest) -> Result<TenantLogin, DomainError> {
        TenantAuthService::login(self, request).await
    }
}

fn advance(stage: &mut LoginStage) {
    if let Some(next) = stage.next() {
        debug!(from = %stage, to = %next, "Login stage");
        *stage = next;
    }
}
