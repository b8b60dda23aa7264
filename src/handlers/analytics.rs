use axum::{extract::State, http::StatusCode, response::Json};
use common::TrainingAnalyticsSummary;
use tracing::{debug, info, instrument, trace};

use crate::schemas::{domain_error_response, ApiResponse, AppState, CachedData, ErrorResponse};

const ANALYTICS_CACHE_KEY: &str = "analytics_summary";

/// Get the training analytics summary
///
/// The rollup touches every table, so results are served from the
/// short-lived cache between recomputations.
#[utoipa::path(
    get,
    path = "/api/v1/analytics",
    tag = "analytics",
    responses(
        (status = 200, description = "Analytics retrieved successfully", body = ApiResponse<TrainingAnalyticsSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_analytics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TrainingAnalyticsSummary>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_analytics function");

    if let Some(CachedData::Analytics(summary)) = state.cache.get(ANALYTICS_CACHE_KEY).await {
        debug!("Serving analytics summary from cache");
        return Ok(Json(ApiResponse {
            data: summary,
            message: "Analytics retrieved successfully".to_string(),
            success: true,
        }));
    }

    debug!("Cache miss, computing analytics summary");
    let summary = domain::analytics::summary(&state.db)
        .await
        .map_err(domain_error_response)?;

    state
        .cache
        .insert(
            ANALYTICS_CACHE_KEY.to_string(),
            CachedData::Analytics(summary.clone()),
        )
        .await;

    info!(
        "Analytics summary computed: {} sessions, {} participants",
        summary.total_sessions, summary.total_participants
    );
    Ok(Json(ApiResponse {
        data: summary,
        message: "Analytics retrieved successfully".to_string(),
        success: true,
    }))
}
