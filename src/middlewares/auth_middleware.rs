use crate::util::cookie::read_session_cookie;
use crate::util::error::{HandlerError, ServiceError};
use crate::util::jwt::{SessionTokenUtils, SessionTokenUtilsImpl};
use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::warn;

pub struct SessionAuthState {
    pub token_utils: Arc<SessionTokenUtilsImpl>,
}

/// Require a valid session cookie; on success the verified claims are
/// attached to request extensions for the handlers.
pub async fn session_auth(
    State(state): State<Arc<SessionAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let token = match read_session_cookie(req.headers()) {
        Some(token) => token,
        None => {
            warn!("Request without session cookie rejected");
            return Err(HandlerError::from(ServiceError::Unauthenticated));
        }
    };

    let claims = match state.token_utils.validate_session_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("Session token rejected: {}", e);
            return Err(HandlerError::from(ServiceError::Unauthenticated));
        }
    };

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
