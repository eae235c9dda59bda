use crate::handler::auth_handler::{sign_in_handler, sign_out_handler, sign_up_handler, AuthState};
use axum::{routing::post, Router};
use std::sync::Arc;

pub fn auth_router(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/auth/sign-up", post(sign_up_handler))
        .route("/auth/sign-in", post(sign_in_handler))
        .route("/auth/sign-out", post(sign_out_handler))
        .with_state(state)
}
