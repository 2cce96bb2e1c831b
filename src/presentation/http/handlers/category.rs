//! Category Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CategoriesQueryParams, CategoryRequest};
use crate::application::dto::response::{CategoryResponse, CreatedResponse, StatusResponse};
use crate::presentation::http::extractors::{QueryParams, ValidatedJson};
use crate::shared::context::RequestContext;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create a new category
pub async fn create_category(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(body): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = state
        .category_service
        .create(&ctx, body.into_domain())
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// List categories
pub async fn list_categories(
    State(state): State<AppState>,
    ctx: RequestContext,
    QueryParams(params): QueryParams<CategoriesQueryParams>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state
        .category_service
        .get_all(&ctx, params.into_domain())
        .await?;

    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// Get category by ID
pub async fn get_category(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(category_id): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = state
        .category_service
        .get_by_id(&ctx, &category_id)
        .await?;

    Ok(Json(CategoryResponse::from(category)))
}

/// Rename a category
pub async fn update_category(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(category_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CategoryRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .category_service
        .update(&ctx, &category_id, body.into_domain())
        .await?;

    Ok(Json(StatusResponse::updated()))
}

/// Delete a category
pub async fn delete_category(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(category_id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .category_service
        .delete(&ctx, &category_id)
        .await?;

    Ok(Json(StatusResponse::deleted()))
}
