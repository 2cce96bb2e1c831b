//! Product Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{
    CreateProductRequest, ProductsQueryParams, UpdateProductRequest,
};
use crate::application::dto::response::{CreatedResponse, ProductResponse, StatusResponse};
use crate::presentation::http::extractors::{QueryParams, ValidatedJson};
use crate::shared::context::RequestContext;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(body): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = state
        .product_service
        .create(&ctx, body.into_domain())
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// List products matching the query filters
pub async fn list_products(
    State(state): State<AppState>,
    ctx: RequestContext,
    QueryParams(params): QueryParams<ProductsQueryParams>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state
        .product_service
        .get_all(&ctx, params.into_domain())
        .await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Get product by ID
pub async fn get_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(product_id): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .product_service
        .get_by_id(&ctx, &product_id)
        .await?;

    Ok(Json(ProductResponse::from(product)))
}

/// Partially update a product
pub async fn update_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(product_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .product_service
        .update(&ctx, &product_id, body.into_domain())
        .await?;

    Ok(Json(StatusResponse::updated()))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(product_id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .product_service
        .delete(&ctx, &product_id)
        .await?;

    Ok(Json(StatusResponse::deleted()))
}
