//! JSON extractor that reports failures in the API error format

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body extractor and response wrapper
///
/// Parses the body as JSON whatever the `Content-Type`. An unreadable or
/// malformed body is an unexpected condition and is answered with a 500.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::internal(format!("Failed to read request body: {}", e.body_text()))
        })?;

        serde_json::from_slice(&bytes)
            .map(Json)
            .map_err(|e| ApiError::internal(format!("Invalid JSON body: {}", e)))
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
