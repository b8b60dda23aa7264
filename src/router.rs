use crate::handlers::{
    analytics::get_analytics,
    attendance::set_attendance_status,
    categories::{
        create_category, delete_category, get_categories, get_category, update_category,
    },
    health::health_check,
    sessions::{
        create_session, delete_session, get_sessions, register_for_session,
        unregister_from_session, update_session,
    },
    users::{create_user, delete_user, get_user, get_users, update_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User CRUD routes
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id", put(update_user))
        .route("/api/v1/users/:user_id", delete(delete_user))
        // Training session CRUD routes
        .route("/api/v1/training-sessions", post(create_session))
        .route("/api/v1/training-sessions", get(get_sessions))
        .route("/api/v1/training-sessions/:session_id", put(update_session))
        .route("/api/v1/training-sessions/:session_id", delete(delete_session))
        // Roster registration routes
        .route(
            "/api/v1/training-sessions/:session_id/register",
            post(register_for_session),
        )
        .route(
            "/api/v1/training-sessions/:session_id/register",
            delete(unregister_from_session),
        )
        // Attendance status route
        .route(
            "/api/v1/attendance-records/:record_id",
            put(set_attendance_status),
        )
        // Category CRUD routes
        .route("/api/v1/categories", post(create_category))
        .route("/api/v1/categories", get(get_categories))
        .route("/api/v1/categories/:category_id", get(get_category))
        .route("/api/v1/categories/:category_id", put(update_category))
        .route("/api/v1/categories/:category_id", delete(delete_category))
        // Analytics route
        .route("/api/v1/analytics", get(get_analytics))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
