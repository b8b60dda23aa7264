use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::AttendanceWithUser;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use crate::schemas::{domain_error_response, ApiResponse, AppState, ErrorResponse};

/// Request body for setting the status of an attendance record
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateAttendanceRequest {
    /// ID of the user performing the update (must own the parent session)
    pub acting_user_id: i32,
    /// One of `registered`, `present`, `absent`, `late`
    pub status: String,
}

/// Set the attendance status of a record (owning trainer only)
#[utoipa::path(
    put,
    path = "/api/v1/attendance-records/{record_id}",
    tag = "attendance",
    params(
        ("record_id" = i32, Path, description = "Attendance record ID"),
    ),
    request_body = UpdateAttendanceRequest,
    responses(
        (status = 200, description = "Status updated successfully", body = ApiResponse<AttendanceWithUser>),
        (status = 403, description = "Not the owning trainer", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 422, description = "Unknown status value", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn set_attendance_status(
    Path(record_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateAttendanceRequest>,
) -> Result<Json<ApiResponse<AttendanceWithUser>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering set_attendance_status function for record_id: {}", record_id);
    debug!(
        "User {} setting record {} to status '{}'",
        request.acting_user_id, record_id, request.status
    );

    match domain::attendance::set_status(
        &state.db,
        record_id,
        request.acting_user_id,
        &request.status,
    )
    .await
    {
        Ok(view) => {
            info!(
                "Attendance record {} updated to '{}' successfully",
                record_id, view.status
            );
            Ok(Json(ApiResponse {
                data: view,
                message: "Attendance status updated successfully".to_string(),
                success: true,
            }))
        }
        Err(err) => Err(domain_error_response(err)),
    }
}
