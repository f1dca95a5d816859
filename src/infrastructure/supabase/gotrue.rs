//! Tenant password authentication through GoTrue

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::{json, Value};
use tracing::debug;

use super::http_client::{normalize_base_url, send, unexpected_status, with_api_key};
use crate::domain::{DomainError, IdentityProvider, PasswordGrant, Session};

const STORE: &str = "tenant";
const DEFAULT_AUTH_FAILURE: &str = "Authentication failed";

/// Fields GoTrue uses for its error text, in order of preference
const ERROR_MESSAGE_FIELDS: [&str; 4] = ["error_description", "msg", "message", "error"];

/// Identity provider for a single tenant database
#[derive(Debug, Clone)]
pub struct GoTrueIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl GoTrueIdentityProvider {
    pub fn new(client: reqwest::Client, base_url: impl AsRef<str>, api_key: SecretString) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url.as_ref()),
            api_key,
        }
    }

    fn token_url(&self) -> String {
        format!("{}/auth/v1/token", self.base_url)
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PasswordGrant, DomainError> {
        debug!(email = %email, tenant_url = %self.base_url, "Password sign-in against tenant");

        let request = self
            .client
            .post(self.token_url())
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));

        let response = send(STORE, with_api_key(request, &self.api_key)).await?;
        let status = response.status();

        if status.is_client_error() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(DomainError::authentication(rejection_message(&body)));
        }

        if !status.is_success() {
            return Err(unexpected_status(STORE, response).await);
        }

        let session: Session = response.json().await.map_err(|e| {
            DomainError::store(STORE, format!("Failed to parse session: {}", e))
        })?;

        Ok(PasswordGrant::from(session))
    }
}

/// Extract the provider's explanation of a rejected sign-in
fn rejection_message(body: &Value) -> String {
    ERROR_MESSAGE_FIELDS
        .iter()
        .find_map(|field| body.get(field).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .unwrap_or(DEFAULT_AUTH_FAILURE)
        .to_string()
}
