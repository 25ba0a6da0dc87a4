use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::dto::product_dto::{CreateProductRequest, UpdateProductRequest};
use crate::service::product_service::{ProductService, ProductServiceImpl};
use crate::util::error::HandlerError;

// GET /products
pub async fn list_products_handler(
    State(service): State<Arc<ProductServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let products = service.list().await?;
    Ok(Json(products))
}

// POST /products
pub async fn create_product_handler(
    State(service): State<Arc<ProductServiceImpl>>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let product = service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// GET /products/:id
pub async fn get_product_handler(
    State(service): State<Arc<ProductServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let product = service.get(&id).await?;
    Ok(Json(product))
}

// PUT /products/:id
pub async fn update_product_handler(
    State(service): State<Arc<ProductServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let product = service.update(&id, payload.into()).await?;
    Ok(Json(product))
}

// DELETE /products/:id
pub async fn delete_product_handler(
    State(service): State<Arc<ProductServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
