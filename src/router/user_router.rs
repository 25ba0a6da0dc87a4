use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handler::user_handler::{
    delete_user_handler, get_user_handler, list_users_handler, login_handler, register_handler,
    update_user_handler,
};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/register", post(register_handler))
        .route("/users/login", post(login_handler))
        .route(
            "/users/:id",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .with_state(service)
}
