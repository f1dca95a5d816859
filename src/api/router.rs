use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Prefix under which serverless-function clients call the endpoint
pub const FUNCTIONS_PREFIX: &str = "/functions/v1";

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .merge(auth::create_auth_router())
        .nest(FUNCTIONS_PREFIX, auth::create_auth_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// CORS headers attached to every response
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::{AppConfig, ManagementStoreConfig};

    const MANAGEMENT_KEY: &str = "mgmt-service-key";

    struct Stores {
        management: MockServer,
        tenant: MockServer,
    }

    impl Stores {
        async fn start() -> Self {
            Self {
                management: MockServer::start().await,
                tenant: MockServer::start().await,
            }
        }

        fn router(&self) -> Router {
            let config = AppConfig {
                management: ManagementStoreConfig {
                    url: Some(self.management.uri()),
                    service_role_key: Some(SecretString::new(MANAGEMENT_KEY.to_string())),
                },
                ..AppConfig::default()
            };

            create_router(crate::create_app_state_with_config(&config).unwrap())
        }

        async fn organization(&self, expected_calls: u64) {
            Mock::given(method("GET"))
                .and(path("/rest/v1/organizations"))
                .and(query_param("slug", "eq.acme-corp"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                    "id": "org-1",
                    "name": "Acme Corp",
                    "slug": "acme-corp",
                    "supabase_url": self.tenant.uri(),
                    "supabase_anon_key": "acme-anon",
                    "supabase_service_role_key": "acme-service"
                }])))
                .expect(expected_calls)
                .mount(&self.management)
                .await;
        }

        async fn no_organization(&self) {
            Mock::given(method("GET"))
                .and(path("/rest/v1/organizations"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .expect(1)
                .mount(&self.management)
                .await;
        }

        async fn membership(&self, email: &str, expected_calls: u64) {
            Mock::given(method("GET"))
                .and(path("/rest/v1/user_organizations"))
                .and(query_param("user_email", format!("eq.{email}").as_str()))
                .and(query_param("organization_id", "eq.org-1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                    {"user_email": email, "organization_id": "org-1"}
                ])))
                .expect(expected_calls)
                .mount(&self.management)
                .await;
        }

        async fn no_membership(&self, expected_calls: u64) {
            Mock::given(method("GET"))
                .and(path("/rest/v1/user_organizations"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .expect(expected_calls)
                .mount(&self.management)
                .await;
        }

        async fn tenant_accepts(&self, email: &str, password: &str, token: &str) {
            Mock::given(method("POST"))
                .and(path("/auth/v1/token"))
                .and(query_param("grant_type", "password"))
                .and(body_json(json!({"email": email, "password": password})))
                .respond_with(ResponseTemplate::new(200).set_body_json(session(token)))
                .up_to_n_times(1)
                .expect(1)
                .mount(&self.tenant)
                .await;
        }

        async fn tenant_rejects(&self) {
            Mock::given(method("POST"))
                .and(path("/auth/v1/token"))
                .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid login credentials"
                })))
                .expect(1)
                .mount(&self.tenant)
                .await;
        }

        async fn tenant_untouched(&self) {
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(500))
                .expect(0)
                .mount(&self.tenant)
                .await;
        }
    }

    fn session(token: &str) -> Value {
        json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": format!("{token}-refresh"),
            "user": {"id": "user-1", "email": "user@acme.com"}
        })
    }

    fn login(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("origin", "https://console.example.com")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn acme_login(email: &str, password: &str) -> Request<Body> {
        login(
            "/man-authenticate",
            json!({"email": email, "password": password, "organizationSlug": "acme-corp"}),
        )
    }

    async fn body_json_of(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_cors(response: &Response) {
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_successful_login() {
        let stores = Stores::start().await;
        stores.organization(1).await;
        stores.membership("user@acme.com", 1).await;
        stores.tenant_accepts("User@Acme.com", "hunter2", "token-1").await;

        let response = stores
            .router()
            .oneshot(acme_login("User@Acme.com", "hunter2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);

        let body = body_json_of(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["session"]["access_token"], "token-1");
        assert_eq!(body["user"]["id"], "user-1");
        assert_eq!(body["organization"]["id"], "org-1");
        assert_eq!(body["organization"]["name"], "Acme Corp");
        assert_eq!(body["organization"]["slug"], "acme-corp");
        assert_eq!(body["organization"]["supabase_url"], stores.tenant.uri());
        assert_eq!(body["organization"]["supabase_anon_key"], "acme-anon");
        assert!(body["organization"].get("supabase_service_role_key").is_none());
        assert!(!body.to_string().contains("acme-service"));
    }

    #[tokio::test]
    async fn test_functions_prefix_route() {
        let stores = Stores::start().await;
        stores.organization(1).await;
        stores.membership("user@acme.com", 1).await;
        stores.tenant_accepts("user@acme.com", "hunter2", "token-1").await;

        let response = stores
            .router()
            .oneshot(login(
                "/functions/v1/man-authenticate",
                json!({
                    "email": "user@acme.com",
                    "password": "hunter2",
                    "organizationSlug": "acme-corp"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_fields_contact_no_store() {
        let stores = Stores::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&stores.management)
            .await;
        stores.tenant_untouched().await;

        let response = stores
            .router()
            .oneshot(login("/man-authenticate", json!({"email": "user@acme.com"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors(&response);

        let body = body_json_of(response).await;
        assert_eq!(body["error"], "Missing required fields: password, organizationSlug");
    }

    #[tokio::test]
    async fn test_unknown_organization() {
        let stores = Stores::start().await;
        stores.no_organization().await;
        stores.no_membership(0).await;
        stores.tenant_untouched().await;

        let response = stores
            .router()
            .oneshot(acme_login("user@acme.com", "hunter2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json_of(response).await;
        assert_eq!(body["error"], "Organization not found");
    }

    #[tokio::test]
    async fn test_unmapped_user_never_reaches_tenant() {
        let stores = Stores::start().await;
        stores.organization(1).await;
        stores.no_membership(1).await;
        stores.tenant_untouched().await;

        let response = stores
            .router()
            .oneshot(acme_login("stranger@evil.com", "hunter2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json_of(response).await;
        assert_eq!(body["error"], "User not authorized for this organization");
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let stores = Stores::start().await;
        stores.organization(1).await;
        stores.membership("user@acme.com", 1).await;
        stores.tenant_rejects().await;

        let response = stores
            .router()
            .oneshot(acme_login("user@acme.com", "wrong"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_cors(&response);
        let body = body_json_of(response).await;
        assert_eq!(body["error"], "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_repeated_login_yields_independent_sessions() {
        let stores = Stores::start().await;
        stores.organization(2).await;
        stores.membership("user@acme.com", 2).await;
        stores.tenant_accepts("user@acme.com", "hunter2", "token-1").await;
        stores.tenant_accepts("user@acme.com", "hunter2", "token-2").await;

        let router = stores.router();

        let first = router
            .clone()
            .oneshot(acme_login("user@acme.com", "hunter2"))
            .await
            .unwrap();
        let second = router
            .oneshot(acme_login("user@acme.com", "hunter2"))
            .await
            .unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::OK);

        let first = body_json_of(first).await;
        let second = body_json_of(second).await;
        assert_ne!(first["session"]["access_token"], second["session"]["access_token"]);
    }

    #[tokio::test]
    async fn test_management_outage_is_internal_error() {
        let stores = Stores::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/organizations"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&stores.management)
            .await;
        stores.tenant_untouched().await;

        let response = stores
            .router()
            .oneshot(acme_login("user@acme.com", "hunter2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json_of(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body["details"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_internal_error() {
        let stores = Stores::start().await;

        let request = Request::builder()
            .method("POST")
            .uri("/man-authenticate")
            .body(Body::from("{not json"))
            .unwrap();

        let response = stores.router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let body = body_json_of(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_options_preflight() {
        let stores = Stores::start().await;

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/man-authenticate")
            .header("origin", "https://console.example.com")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "apikey, content-type")
            .body(Body::empty())
            .unwrap();

        let response = stores.router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let allowed = response
            .headers()
            .get("access-control-allow-headers")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(allowed.contains("apikey"));
        assert!(allowed.contains("x-client-info"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_bare_options_request() {
        let stores = Stores::start().await;

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/man-authenticate")
            .body(Body::empty())
            .unwrap();

        let response = stores.router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
    }

    #[tokio::test]
    async fn test_health() {
        let stores = Stores::start().await;

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = stores.router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json_of(response).await;
        assert_eq!(body["status"], "healthy");
    }
}
