use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{debug, error, instrument, trace};

use crate::schemas::{AppState, HealthResponse};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    trace!("Entering health_check function");

    match state.db.ping().await {
        Ok(_) => {
            debug!("Database ping succeeded");
            Ok(Json(HealthResponse {
                status: "healthy".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                database: "connected".to_string(),
            }))
        }
        Err(e) => {
            error!("Database ping failed: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    database: "disconnected".to_string(),
                }),
            ))
        }
    }
}
