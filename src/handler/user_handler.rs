use crate::dto::user_dto::{parse_role, UpdateUserRequest, UserDto};
use crate::model::user::{UserChanges, UserRole};
use crate::service::user_service::UserService;
use crate::util::error::{format_validation_errors, HandlerError, ServiceError};
use crate::util::jwt::Claims;
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    Extension,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserDto>,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub message: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub user_id: i64,
}

/// Update/delete require the actor to be the target user or an admin;
/// touching the role field requires admin regardless of target.
fn authorize_modify(claims: &Claims, target_id: i64, changes_role: bool) -> Result<(), HandlerError> {
    let actor_id = claims
        .user_id()
        .map_err(|_| HandlerError::from(ServiceError::Unauthenticated))?;

    if changes_role && claims.role != UserRole::Admin {
        warn!(actor_id, target_id, "Role change rejected for non-admin actor");
        return Err(HandlerError::from(ServiceError::Forbidden(
            "only administrators may change roles".to_string(),
        )));
    }
    if actor_id != target_id && claims.role != UserRole::Admin {
        warn!(actor_id, target_id, "Modification of another account rejected");
        return Err(HandlerError::from(ServiceError::Forbidden(
            "insufficient privileges for this account".to_string(),
        )));
    }
    Ok(())
}

// List users
pub async fn list_users_handler(
    State(service): State<Arc<dyn UserService>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HandlerError> {
    info!(actor = %claims.sub, "Listing users");
    let users = service.list().await?;
    Ok(Json(UserListResponse { users }))
}

// Get user by id
pub async fn get_user_handler(
    State(service): State<Arc<dyn UserService>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    info!(actor = %claims.sub, target_id = id, "Fetching user");
    let user = service.get_by_id(id).await?;
    Ok(Json(UserEnvelope { user }))
}

// Update user
pub async fn update_user_handler(
    State(service): State<Arc<dyn UserService>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = payload.normalize();
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format_validation_errors(&e)));
    }
    let role = parse_role(&payload.role).map_err(HandlerError::validation)?;

    authorize_modify(&claims, id, role.is_some())?;

    info!(actor = %claims.sub, target_id = id, "Updating user");
    let user = service
        .update(
            id,
            UserChanges {
                name: payload.name,
                email: payload.email,
                role,
            },
        )
        .await?;

    Ok(Json(UserResponse {
        message: "User updated successfully".to_string(),
        user,
    }))
}

// Delete user
pub async fn delete_user_handler(
    State(service): State<Arc<dyn UserService>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    authorize_modify(&claims, id, false)?;

    info!(actor = %claims.sub, target_id = id, "Deleting user");
    let user_id = service.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "User deleted successfully".to_string(),
        user_id,
    }))
}
