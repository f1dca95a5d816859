//! Session and user artifacts produced by a tenant identity provider

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User record returned by the tenant identity provider
///
/// Only the identifier and email are interpreted; everything else is relayed untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Session issued by the tenant identity provider
///
/// Opaque to this service: unknown fields are preserved so the client
/// receives the session exactly as the provider issued it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: AuthenticatedUser,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

/// Result of a successful password authentication
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordGrant {
    pub session: Session,
    pub user: AuthenticatedUser,
}

impl From<Session> for PasswordGrant {
    fn from(session: Session) -> Self {
        let user = session.user.clone();
        Self { session, user }
    }
}
