use super::jwt::AuthService;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Identity attached to the request once the bearer token checks out.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub login_id: String,
}

/// Extract and verify the bearer token, then stash the caller's identity in
/// the request extensions for the handlers.
pub async fn authenticate(
    State(auth): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => match header.strip_prefix("Bearer ") {
            Some(stripped) => stripped,
            None => return Err(unauthorized("missing_token", "Missing bearer token")),
        },
        None => return Err(unauthorized("missing_token", "Missing bearer token")),
    };

    let claims = match auth.verify_token(token) {
        Some(claims) => claims,
        None => {
            return Err(unauthorized(
                "invalid_token",
                "The provided access token is invalid or expired",
            ))
        }
    };

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
        login_id: claims.login_id,
    });

    Ok(next.run(request).await)
}

fn unauthorized(error_type: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": {
                "type": error_type,
                "message": message,
                "code": 401
            }
        })),
    )
        .into_response()
}
