//! Bearer-token middleware behavior, exercised against a minimal router so
//! no database is needed.

use axum::{extract::Extension, middleware, routing::get, Router};
use axum_test::TestServer;
use medit_api::auth::{authenticate, AuthService, AuthenticatedUser};
use medit_core::config::model::AuthSettings;
use std::sync::Arc;
use uuid::Uuid;

fn auth_service() -> Arc<AuthService> {
    Arc::new(AuthService::new(&AuthSettings {
        secret_key: "integration-test-secret-key".to_string(),
        token_expire_minutes: 60,
    }))
}

fn protected_app(auth: Arc<AuthService>) -> Router {
    Router::new()
        .route(
            "/whoami",
            get(|Extension(user): Extension<AuthenticatedUser>| async move { user.login_id }),
        )
        .route_layer(middleware::from_fn_with_state(auth, authenticate))
}

#[tokio::test]
async fn test_request_without_token_is_rejected() {
    let server = TestServer::new(protected_app(auth_service())).unwrap();

    let response = server.get("/whoami").await;
    assert_eq!(response.status_code(), 401);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["type"], "missing_token");
    assert_eq!(body["error"]["code"], 401);
}

#[tokio::test]
async fn test_request_with_malformed_header_is_rejected() {
    let server = TestServer::new(protected_app(auth_service())).unwrap();

    let response = server
        .get("/whoami")
        .add_header("authorization", "Basic dXNlcjpwYXNz")
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_request_with_invalid_token_is_rejected() {
    let server = TestServer::new(protected_app(auth_service())).unwrap();

    let response = server
        .get("/whoami")
        .add_header("authorization", "Bearer not-a-real-token")
        .await;
    assert_eq!(response.status_code(), 401);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["type"], "invalid_token");
}

#[tokio::test]
async fn test_request_with_valid_token_passes_identity() {
    let auth = auth_service();
    let user_id = Uuid::new_v4();
    let (token, _) = auth.issue_token(user_id, "kim123").unwrap();

    let server = TestServer::new(protected_app(auth.clone())).unwrap();

    let response = server
        .get("/whoami")
        .add_header("authorization", format!("Bearer {token}"))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "kim123");
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() {
    let other = Arc::new(AuthService::new(&AuthSettings {
        secret_key: "a-completely-different-secret".to_string(),
        token_expire_minutes: 60,
    }));
    let (token, _) = other.issue_token(Uuid::new_v4(), "mallory").unwrap();

    let server = TestServer::new(protected_app(auth_service())).unwrap();
    let response = server
        .get("/whoami")
        .add_header("authorization", format!("Bearer {token}"))
        .await;
    assert_eq!(response.status_code(), 401);
}
