use crate::app::AppState;
use crate::auth;
use crate::handlers::{contacts, conversations, diseases, family, reports, users};
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health::health_check;

/// Create the application router.
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .nest("/api/v1", create_v1_routes(&state))
        .layer(TraceLayer::new_for_http())
        // Open CORS, as the frontend is served from a separate origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// V1 API: registration and login are public, everything else requires a
/// bearer token.
fn create_v1_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(users::register))
        .route("/auth/login", post(users::login));

    let protected = Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/{id}/family",
            get(family::list_family_members).post(family::create_family_member),
        )
        .route(
            "/users/{id}/family/{member_id}",
            delete(family::delete_family_member),
        )
        .route(
            "/users/{id}/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/users/{id}/contacts/{contact_id}",
            delete(contacts::delete_contact),
        )
        .route(
            "/conversations",
            get(conversations::list_conversations).post(conversations::create_conversation),
        )
        .route(
            "/conversations/{id}",
            get(conversations::get_conversation).delete(conversations::delete_conversation),
        )
        .route(
            "/conversations/{id}/messages",
            post(conversations::post_message),
        )
        .route("/conversations/{id}/report", post(reports::create_report))
        .route(
            "/conversations/{id}/reports",
            get(reports::list_conversation_reports),
        )
        .route("/reports", get(reports::list_my_reports))
        .route("/reports/{id}", get(reports::get_report))
        .route("/diseases", get(diseases::list_diseases))
        .route("/diseases/{id}", get(diseases::get_disease))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth::authenticate,
        ));

    public.merge(protected)
}

/// Front page handler
pub async fn index() -> &'static str {
    "Medit API - AI Health Consultation Backend"
}
