use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::training_category;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set, SqlErr};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{domain_error_response, ApiResponse, AppState, ErrorResponse};

/// Request body for creating a training category
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// Category name (must be unique)
    pub name: String,
    /// Longer description shown in the schedule
    pub description: Option<String>,
    /// Display color as a hex string, e.g. `#EF4444`
    pub color: Option<String>,
}

/// Request body for updating a training category
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Training category response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl From<training_category::Model> for CategoryResponse {
    fn from(model: training_category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            color: model.color,
        }
    }
}

fn name_taken(name: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::CONFLICT,
        Json(ErrorResponse {
            error: format!("Category '{name}' already exists"),
            code: "CATEGORY_ALREADY_EXISTS".to_string(),
            success: false,
        }),
    )
}

/// Create a new training category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryResponse>),
        (status = 409, description = "Category name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_category function");
    debug!("Creating category with name: {}", request.name);

    let new_category = training_category::ActiveModel {
        name: Set(request.name.clone()),
        description: Set(request.description.clone()),
        color: Set(request.color.clone()),
        ..Default::default()
    };

    match new_category.insert(&state.db).await {
        Ok(model) => {
            info!("Category created successfully with ID: {}, name: {}", model.id, model.name);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: CategoryResponse::from(model),
                    message: "Category created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create category '{}': {}", request.name, db_error);
            if matches!(db_error.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err(name_taken(&request.name));
            }
            Err(domain_error_response(db_error.into()))
        }
    }
}

/// Get all training categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_categories function");

    match training_category::Entity::find().all(&state.db).await {
        Ok(categories) => {
            debug!("Retrieved {} categories from database", categories.len());
            let data: Vec<CategoryResponse> =
                categories.into_iter().map(CategoryResponse::from).collect();
            Ok(Json(ApiResponse {
                data,
                message: "Categories retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve categories: {}", db_error);
            Err(domain_error_response(db_error.into()))
        }
    }
}

/// Get a specific training category by ID
#[utoipa::path(
    get,
    path = "/api/v1/categories/{category_id}",
    tag = "categories",
    params(
        ("category_id" = i32, Path, description = "Category ID"),
    ),
    responses(
        (status = 200, description = "Category retrieved successfully", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_category(
    Path(category_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CategoryResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_category function for category_id: {}", category_id);

    match training_category::Entity::find_by_id(category_id).one(&state.db).await {
        Ok(Some(model)) => Ok(Json(ApiResponse {
            data: CategoryResponse::from(model),
            message: "Category retrieved successfully".to_string(),
            success: true,
        })),
        Ok(None) => {
            warn!("Category with ID {} not found", category_id);
            Err(domain_error_response(domain::DomainError::NotFound("category")))
        }
        Err(db_error) => {
            error!("Failed to retrieve category with ID {}: {}", category_id, db_error);
            Err(domain_error_response(db_error.into()))
        }
    }
}

/// Update a training category
#[utoipa::path(
    put,
    path = "/api/v1/categories/{category_id}",
    tag = "categories",
    params(
        ("category_id" = i32, Path, description = "Category ID"),
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_category(
    Path(category_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_category function for category_id: {}", category_id);

    let existing = match training_category::Entity::find_by_id(category_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Category with ID {} not found for update", category_id);
            return Err(domain_error_response(domain::DomainError::NotFound("category")));
        }
        Err(db_error) => {
            error!("Failed to load category with ID {}: {}", category_id, db_error);
            return Err(domain_error_response(db_error.into()));
        }
    };

    let mut active: training_category::ActiveModel = existing.into();
    if let Some(name) = request.name.clone() {
        active.name = Set(name);
    }
    if let Some(description) = request.description.clone() {
        active.description = Set(Some(description));
    }
    if let Some(color) = request.color.clone() {
        active.color = Set(Some(color));
    }

    match active.update(&state.db).await {
        Ok(model) => {
            info!("Category with ID {} updated successfully", model.id);
            Ok(Json(ApiResponse {
                data: CategoryResponse::from(model),
                message: "Category updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update category with ID {}: {}", category_id, db_error);
            if matches!(db_error.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err(name_taken(request.name.as_deref().unwrap_or("")));
            }
            Err(domain_error_response(db_error.into()))
        }
    }
}

/// Delete a training category. Sessions referencing it fall back to
/// having no category via the schema's SET NULL.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{category_id}",
    tag = "categories",
    params(
        ("category_id" = i32, Path, description = "Category ID"),
    ),
    responses(
        (status = 200, description = "Category deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_category(
    Path(category_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_category function for category_id: {}", category_id);

    let existing = match training_category::Entity::find_by_id(category_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Category with ID {} not found for delete", category_id);
            return Err(domain_error_response(domain::DomainError::NotFound("category")));
        }
        Err(db_error) => {
            error!("Failed to load category with ID {}: {}", category_id, db_error);
            return Err(domain_error_response(db_error.into()));
        }
    };

    match existing.delete(&state.db).await {
        Ok(_) => {
            info!("Category with ID {} deleted successfully", category_id);
            Ok(Json(ApiResponse {
                data: format!("Category {category_id} deleted"),
                message: "Category deleted successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to delete category with ID {}: {}", category_id, db_error);
            Err(domain_error_response(db_error.into()))
        }
    }
}
