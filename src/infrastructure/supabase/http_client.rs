//! Shared HTTP plumbing for Supabase endpoints

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::DomainError;

/// Build the reqwest client shared by the management and tenant adapters
pub fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, DomainError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Attach the `apikey` and bearer headers Supabase gateways expect
pub fn with_api_key(request: RequestBuilder, key: &SecretString) -> RequestBuilder {
    let key = key.expose_secret();

    request
        .header("apikey", key.as_str())
        .bearer_auth(key)
}

/// Send a request, mapping transport failures to a store error
pub async fn send(store: &str, request: RequestBuilder) -> Result<Response, DomainError> {
    request
        .send()
        .await
        .map_err(|e| DomainError::store(store, format!("Request failed: {}", e)))
}

/// Turn a non-success response into a store error carrying status and body
pub async fn unexpected_status(store: &str, response: Response) -> DomainError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    DomainError::store(store, format!("HTTP {}: {}", status, body))
}

/// Normalize a base URL so paths can be appended with `/`
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
