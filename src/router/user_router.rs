use crate::handler::user_handler::{
    delete_user_handler, get_user_handler, list_users_handler, update_user_handler,
};
use crate::middlewares::auth_middleware::{session_auth, SessionAuthState};
use crate::service::user_service::UserService;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;

/// All user-management routes sit behind the session-cookie middleware.
pub fn user_router(service: Arc<dyn UserService>, auth_state: Arc<SessionAuthState>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, session_auth))
        .with_state(service)
}
