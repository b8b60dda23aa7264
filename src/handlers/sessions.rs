use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use common::SessionWithRoster;
use domain::sessions::SessionInput;
use model::entities::training_session;
use sea_orm::{EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::schemas::{domain_error_response, ApiResponse, AppState, ErrorResponse};

/// Request body for scheduling a new training session
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateSessionRequest {
    /// ID of the trainer who owns the session
    pub trainer_id: i32,
    /// Session start (naive local time)
    pub start_time: NaiveDateTime,
    /// Session end, must be after the start
    pub end_time: NaiveDateTime,
    /// Maximum roster size
    #[validate(range(min = 1))]
    pub max_participants: i32,
    /// Free-form notes for the roster
    pub notes: Option<String>,
    /// Optional training category
    pub category_id: Option<i32>,
}

/// Request body for updating a training session
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateSessionRequest {
    /// ID of the user performing the update (must own the session)
    pub acting_user_id: i32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[validate(range(min = 1))]
    pub max_participants: i32,
    pub notes: Option<String>,
    pub category_id: Option<i32>,
}

/// Request body for joining a session's roster
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    /// ID of the user joining the roster
    pub user_id: i32,
}

/// Query parameters for leaving a session's roster
#[derive(Debug, Deserialize, IntoParams)]
pub struct UnregisterQuery {
    /// ID of the user leaving the roster
    pub user_id: i32,
}

/// Query parameters for deleting a session
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeleteSessionQuery {
    /// ID of the user performing the delete (must own the session)
    pub acting_user_id: i32,
}

fn validation_failed(errors: validator::ValidationErrors) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: errors.to_string(),
            code: "VALIDATION_ERROR".to_string(),
            success: false,
        }),
    )
}

/// Get all training sessions with their rosters, ordered by start time
#[utoipa::path(
    get,
    path = "/api/v1/training-sessions",
    tag = "training-sessions",
    responses(
        (status = 200, description = "Sessions retrieved successfully", body = ApiResponse<Vec<SessionWithRoster>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_sessions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SessionWithRoster>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_sessions function");
    debug!("Fetching all training sessions from database");

    let sessions = training_session::Entity::find()
        .order_by_asc(training_session::Column::StartTime)
        .all(&state.db)
        .await
        .map_err(|db_error| {
            error!("Failed to retrieve training sessions: {}", db_error);
            domain_error_response(db_error.into())
        })?;

    let mut views = Vec::with_capacity(sessions.len());
    for session in &sessions {
        let view = domain::views::session_with_roster(&state.db, session)
            .await
            .map_err(domain_error_response)?;
        views.push(view);
    }

    info!("Successfully retrieved {} training sessions", views.len());
    Ok(Json(ApiResponse {
        data: views,
        message: "Training sessions retrieved successfully".to_string(),
        success: true,
    }))
}

/// Schedule a new training session
#[utoipa::path(
    post,
    path = "/api/v1/training-sessions",
    tag = "training-sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created successfully", body = ApiResponse<SessionWithRoster>),
        (status = 404, description = "Trainer not found", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionWithRoster>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_session function");
    debug!("Creating training session for trainer {}", request.trainer_id);

    request.validate().map_err(validation_failed)?;

    let input = SessionInput {
        start_time: request.start_time,
        end_time: request.end_time,
        max_participants: request.max_participants,
        notes: request.notes,
        category_id: request.category_id,
    };

    match domain::sessions::create(&state.db, request.trainer_id, input).await {
        Ok(view) => {
            info!("Training session {} created successfully", view.id);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: view,
                    message: "Training session created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(err) => Err(domain_error_response(err)),
    }
}

/// Update a training session (owning trainer only)
#[utoipa::path(
    put,
    path = "/api/v1/training-sessions/{session_id}",
    tag = "training-sessions",
    params(
        ("session_id" = i32, Path, description = "Training session ID"),
    ),
    request_body = UpdateSessionRequest,
    responses(
        (status = 200, description = "Session updated successfully", body = ApiResponse<SessionWithRoster>),
        (status = 403, description = "Not the owning trainer", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_session(
    Path(session_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateSessionRequest>,
) -> Result<Json<ApiResponse<SessionWithRoster>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_session function for session_id: {}", session_id);

    request.validate().map_err(validation_failed)?;

    let input = SessionInput {
        start_time: request.start_time,
        end_time: request.end_time,
        max_participants: request.max_participants,
        notes: request.notes,
        category_id: request.category_id,
    };

    match domain::sessions::update(&state.db, session_id, request.acting_user_id, input).await {
        Ok(view) => {
            info!("Training session {} updated successfully", session_id);
            Ok(Json(ApiResponse {
                data: view,
                message: "Training session updated successfully".to_string(),
                success: true,
            }))
        }
        Err(err) => Err(domain_error_response(err)),
    }
}

/// Delete a training session and its roster (owning trainer only)
#[utoipa::path(
    delete,
    path = "/api/v1/training-sessions/{session_id}",
    tag = "training-sessions",
    params(
        ("session_id" = i32, Path, description = "Training session ID"),
        DeleteSessionQuery,
    ),
    responses(
        (status = 200, description = "Session deleted successfully", body = ApiResponse<String>),
        (status = 403, description = "Not the owning trainer", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_session(
    Path(session_id): Path<i32>,
    Query(query): Query<DeleteSessionQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_session function for session_id: {}", session_id);

    match domain::sessions::delete(&state.db, session_id, query.acting_user_id).await {
        Ok(()) => {
            info!("Training session {} deleted successfully", session_id);
            Ok(Json(ApiResponse {
                data: format!("Training session {session_id} deleted"),
                message: "Training session deleted successfully".to_string(),
                success: true,
            }))
        }
        Err(err) => Err(domain_error_response(err)),
    }
}

/// Register a user for a training session
#[utoipa::path(
    post,
    path = "/api/v1/training-sessions/{session_id}/register",
    tag = "training-sessions",
    params(
        ("session_id" = i32, Path, description = "Training session ID"),
    ),
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered (or already on the roster)", body = ApiResponse<SessionWithRoster>),
        (status = 404, description = "Session or user not found", body = ErrorResponse),
        (status = 422, description = "Session is full", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn register_for_session(
    Path(session_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<SessionWithRoster>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering register_for_session function for session_id: {}", session_id);
    debug!("Registering user {} for session {}", request.user_id, session_id);

    match domain::registration::register(&state.db, session_id, request.user_id).await {
        Ok(view) => {
            info!(
                "User {} registered for session {} ({} spots left)",
                request.user_id,
                session_id,
                view.remaining_capacity()
            );
            Ok(Json(ApiResponse {
                data: view,
                message: "User registered successfully".to_string(),
                success: true,
            }))
        }
        Err(err) => Err(domain_error_response(err)),
    }
}

/// Unregister a user from a training session
#[utoipa::path(
    delete,
    path = "/api/v1/training-sessions/{session_id}/register",
    tag = "training-sessions",
    params(
        ("session_id" = i32, Path, description = "Training session ID"),
        UnregisterQuery,
    ),
    responses(
        (status = 200, description = "User unregistered (no-op if not on the roster)", body = ApiResponse<SessionWithRoster>),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn unregister_from_session(
    Path(session_id): Path<i32>,
    Query(query): Query<UnregisterQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionWithRoster>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering unregister_from_session function for session_id: {}", session_id);
    debug!("Unregistering user {} from session {}", query.user_id, session_id);

    match domain::registration::unregister(&state.db, session_id, query.user_id).await {
        Ok(view) => {
            info!("User {} unregistered from session {}", query.user_id, session_id);
            Ok(Json(ApiResponse {
                data: view,
                message: "User unregistered successfully".to_string(),
                success: true,
            }))
        }
        Err(err) => Err(domain_error_response(err)),
    }
}
