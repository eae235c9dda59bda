use crate::config::AppConfig;
use crate::dto::user_dto::{parse_role, SignInRequest, SignUpRequest, UserDto};
use crate::model::user::UserRole;
use crate::service::auth_service::{AuthService, CreateUser};
use crate::util::cookie::{clear_session_cookie, set_session_cookie};
use crate::util::error::{format_validation_errors, HandlerError};
use crate::util::jwt::{SessionTokenUtils, SessionTokenUtilsImpl};
use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub struct AuthState {
    pub auth_service: Arc<dyn AuthService>,
    pub token_utils: Arc<SessionTokenUtilsImpl>,
    pub config: AppConfig,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl AuthState {
    /// Issue a session token for the user and append the matching cookie.
    fn issue_session(&self, user: &UserDto, headers: &mut HeaderMap) -> Result<(), HandlerError> {
        let token = self
            .token_utils
            .generate_session_token(user.id, &user.email, user.role)
            .map_err(|e| HandlerError::internal(format!("Token signing error: {}", e)))?;
        set_session_cookie(
            headers,
            &token,
            self.token_utils.jwt_config.session_token_expiration,
            !self.config.environment.is_development(),
        )?;
        Ok(())
    }
}

// Sign up
pub async fn sign_up_handler(
    State(state): State<Arc<AuthState>>,
    Json(payload): Json<SignUpRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = payload.normalize();
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format_validation_errors(&e)));
    }
    let role = parse_role(&payload.role)
        .map_err(HandlerError::validation)?
        .unwrap_or(UserRole::User);

    let user = state
        .auth_service
        .create_user(CreateUser {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role,
        })
        .await?;

    let mut headers = HeaderMap::new();
    state.issue_session(&user, &mut headers)?;

    Ok((
        StatusCode::CREATED,
        headers,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

// Sign in
pub async fn sign_in_handler(
    State(state): State<Arc<AuthState>>,
    Json(payload): Json<SignInRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = payload.normalize();
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format_validation_errors(&e)));
    }

    let user = state
        .auth_service
        .sign_in(&payload.email, &payload.password)
        .await?;

    let mut headers = HeaderMap::new();
    state.issue_session(&user, &mut headers)?;

    Ok((
        headers,
        Json(AuthResponse {
            message: "Signed in successfully".to_string(),
            user,
        }),
    ))
}

// Sign out
pub async fn sign_out_handler() -> Result<impl IntoResponse, HandlerError> {
    let mut headers = HeaderMap::new();
    clear_session_cookie(&mut headers)?;
    Ok((
        headers,
        Json(MessageResponse {
            message: "Signed out successfully".to_string(),
        }),
    ))
}
