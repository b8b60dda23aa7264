use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::UserDto;
use model::entities::user;
use model::entities::user::UserRole;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, SqlErr};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{domain_error_response, ApiResponse, AppState, ErrorResponse};

/// Request body for creating a new user
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    /// Display name
    pub name: String,
    /// Email address (must be unique)
    #[validate(email)]
    pub email: String,
    /// Password hash produced by the authentication layer
    pub password_hash: String,
    /// One of `admin`, `trainer`, `athlete`
    pub role: String,
}

/// Request body for updating a user
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    /// Display name
    pub name: Option<String>,
    /// Email address (must be unique)
    #[validate(email)]
    pub email: Option<String>,
    /// One of `admin`, `trainer`, `athlete`
    pub role: Option<String>,
}

fn parse_role(raw: &str) -> Result<UserRole, (StatusCode, Json<ErrorResponse>)> {
    match raw {
        "admin" => Ok(UserRole::Admin),
        "trainer" => Ok(UserRole::Trainer),
        "athlete" => Ok(UserRole::Athlete),
        other => {
            warn!("Rejected unknown role '{}'", other);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: format!("unknown role '{other}', expected admin, trainer or athlete"),
                    code: "VALIDATION_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> (StatusCode, Json<ErrorResponse>) {
    warn!("Request validation failed: {}", errors);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: errors.to_string(),
            code: "VALIDATION_ERROR".to_string(),
            success: false,
        }),
    )
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserDto>),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_user function");
    debug!("Creating user with email: {}", request.email);

    request.validate().map_err(validation_failed)?;
    let role = parse_role(&request.role)?;

    let new_user = user::ActiveModel {
        name: Set(request.name.clone()),
        email: Set(request.email.clone()),
        password_hash: Set(request.password_hash.clone()),
        role: Set(role),
        ..Default::default()
    };

    trace!("Attempting to insert new user into database");
    match new_user.insert(&state.db).await {
        Ok(user_model) => {
            info!(
                "User created successfully with ID: {}, email: {}",
                user_model.id, user_model.email
            );
            let response = ApiResponse {
                data: domain::views::user_dto(user_model),
                message: "User created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create user '{}': {}", request.email, db_error);
            if matches!(db_error.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err((
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: format!("Email '{}' is already in use", request.email),
                        code: "EMAIL_ALREADY_EXISTS".to_string(),
                        success: false,
                    }),
                ));
            }
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating user".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_users function");
    debug!("Fetching all users from database");

    match user::Entity::find().all(&state.db).await {
        Ok(users) => {
            let user_count = users.len();
            debug!("Retrieved {} users from database", user_count);

            let user_responses: Vec<UserDto> =
                users.into_iter().map(domain::views::user_dto).collect();

            info!("Successfully retrieved {} users", user_count);
            let response = ApiResponse {
                data: user_responses,
                message: "Users retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve users from database: {}", db_error);
            Err(domain_error_response(db_error.into()))
        }
    }
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserDto>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_user function for user_id: {}", user_id);

    match user::Entity::find_by_id(user_id).one(&state.db).await {
        Ok(Some(user_model)) => {
            info!(
                "Successfully retrieved user with ID: {}, email: {}",
                user_model.id, user_model.email
            );
            let response = ApiResponse {
                data: domain::views::user_dto(user_model),
                message: "User retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("User with ID {} not found", user_id);
            Err(domain_error_response(domain::DomainError::NotFound("user")))
        }
        Err(db_error) => {
            error!("Failed to retrieve user with ID {}: {}", user_id, db_error);
            Err(domain_error_response(db_error.into()))
        }
    }
}

/// Update a user's profile fields or role
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserDto>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_user function for user_id: {}", user_id);

    request.validate().map_err(validation_failed)?;
    let role = match &request.role {
        Some(raw) => Some(parse_role(raw)?),
        None => None,
    };

    let existing = match user::Entity::find_by_id(user_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("User with ID {} not found for update", user_id);
            return Err(domain_error_response(domain::DomainError::NotFound("user")));
        }
        Err(db_error) => {
            error!("Failed to load user with ID {}: {}", user_id, db_error);
            return Err(domain_error_response(db_error.into()));
        }
    };

    let mut active: user::ActiveModel = existing.into();
    if let Some(name) = request.name.clone() {
        active.name = Set(name);
    }
    if let Some(email) = request.email.clone() {
        active.email = Set(email);
    }
    if let Some(role) = role {
        active.role = Set(role);
    }

    match active.update(&state.db).await {
        Ok(user_model) => {
            info!("User with ID {} updated successfully", user_model.id);
            let response = ApiResponse {
                data: domain::views::user_dto(user_model),
                message: "User updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update user with ID {}: {}", user_id, db_error);
            if matches!(db_error.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err((
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: "Email is already in use".to_string(),
                        code: "EMAIL_ALREADY_EXISTS".to_string(),
                        success: false,
                    }),
                ));
            }
            Err(domain_error_response(db_error.into()))
        }
    }
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Cannot delete the last admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_user function for user_id: {}", user_id);

    match domain::users::delete(&state.db, user_id).await {
        Ok(()) => {
            info!("User with ID {} deleted successfully", user_id);
            let response = ApiResponse {
                data: format!("User {user_id} deleted"),
                message: "User deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(err) => Err(domain_error_response(err)),
    }
}
