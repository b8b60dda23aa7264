use axum::http::StatusCode;
use axum::response::Json;
use common::TrainingAnalyticsSummary;
use domain::DomainError;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Analytics(TrainingAnalyticsSummary),
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Map a domain error to its HTTP status and stable error code. The
/// boundary layer keys on `code`, never on the message text.
pub fn domain_error_response(err: DomainError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        DomainError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
        DomainError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        DomainError::CapacityExceeded { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "CAPACITY_EXCEEDED")
        }
        DomainError::InvalidStatus(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_STATUS"),
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        DomainError::LastAdminProtected => (StatusCode::CONFLICT, "LAST_ADMIN_PROTECTED"),
        DomainError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Domain operation failed: {}", err);
    } else {
        warn!(code, "Domain operation rejected: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::sessions::create_session,
        crate::handlers::sessions::get_sessions,
        crate::handlers::sessions::update_session,
        crate::handlers::sessions::delete_session,
        crate::handlers::sessions::register_for_session,
        crate::handlers::sessions::unregister_from_session,
        crate::handlers::attendance::set_attendance_status,
        crate::handlers::categories::create_category,
        crate::handlers::categories::get_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,
        crate::handlers::analytics::get_analytics,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            common::UserDto,
            common::AttendanceDto,
            common::AttendanceWithUser,
            common::SessionWithRoster,
            common::TrainingAnalyticsSummary,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UpdateUserRequest,
            crate::handlers::sessions::CreateSessionRequest,
            crate::handlers::sessions::UpdateSessionRequest,
            crate::handlers::sessions::RegisterRequest,
            crate::handlers::attendance::UpdateAttendanceRequest,
            crate::handlers::categories::CreateCategoryRequest,
            crate::handlers::categories::UpdateCategoryRequest,
            crate::handlers::categories::CategoryResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "training-sessions", description = "Training session and roster endpoints"),
        (name = "attendance", description = "Attendance record endpoints"),
        (name = "categories", description = "Training category endpoints"),
        (name = "analytics", description = "Training analytics endpoints"),
    ),
    info(
        title = "TrainRust API",
        description = "Gym Training Scheduler API - training sessions, rosters and attendance tracking",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
