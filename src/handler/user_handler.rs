use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::dto::user_dto::{LoginRequest, RegisterRequest, UpdateUserRequest, UserResponse};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;

// GET /users
pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let users = service.list().await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(users))
}

// POST /users/register
pub async fn register_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let user = service.register(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// POST /users/login
pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let user = service.login(payload.email, payload.password).await?;
    Ok(Json(UserResponse::from(user)))
}

// GET /users/:id
pub async fn get_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let user = service.get(&id).await?;
    Ok(Json(UserResponse::from(user)))
}

// PUT /users/:id
pub async fn update_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let user = service.update(&id, payload.into()).await?;
    Ok(Json(UserResponse::from(user)))
}

// DELETE /users/:id
pub async fn delete_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
