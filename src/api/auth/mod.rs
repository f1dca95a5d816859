//! Tenant authentication endpoint
//!
//! `POST /man-authenticate` routes a login to the identity provider of the
//! organization it names and hands back the tenant's public connection details.

use axum::{extract::State, routing::post, Router};
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{AuthenticatedUser, LoginRequest, Session, TenantDescriptor, TenantLogin};

/// Path of the authentication function
pub const AUTHENTICATE_PATH: &str = "/man-authenticate";

/// Create the authentication router
///
/// `OPTIONS` preflights are answered by the CORS layer before reaching it.
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route(AUTHENTICATE_PATH, post(authenticate))
}

/// Successful login response
#[derive(Debug, Serialize)]
pub struct AuthenticateResponse {
    pub success: bool,
    pub session: Session,
    pub user: AuthenticatedUser,
    pub organization: TenantDescriptor,
}

impl From<TenantLogin> for AuthenticateResponse {
    fn from(login: TenantLogin) -> Self {
        Self {
            success: true,
            session: login.session,
            user: login.user,
            organization: login.organization,
        }
    }
}

/// Authenticate against a tenant database
///
/// POST /man-authenticate
///
/// Body: `{email, password, organizationSlug}`. Returns the tenant session and
/// the organization's URL and anon key.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthenticateResponse>, ApiError> {
    let login = state.tenant_auth_service.login(request).await?;

    Ok(Json(AuthenticateResponse::from(login)))
}
