use crate::dto::user_dto::UserDto;
use crate::model::user::{NewUser, UserRole};
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Sign-up input after validation and normalization.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. Fails with `AlreadyExists` when the email is taken.
    async fn create_user(&self, new_user: CreateUser) -> Result<UserDto, ServiceError>;
    /// Verify credentials. Unknown email and wrong password are
    /// indistinguishable to the caller.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserDto, ServiceError>;
}

pub struct AuthServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl AuthServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self, new_user), fields(email = %new_user.email, role = %new_user.role))]
    async fn create_user(&self, new_user: CreateUser) -> Result<UserDto, ServiceError> {
        info!("Creating new user");
        let password_hash = PasswordUtilsImpl::hash_password(&new_user.password)
            .map_err(|e| ServiceError::Internal(format!("Password hash error: {}", e)))?;

        let inserted = self
            .user_repo
            .insert(NewUser {
                name: new_user.name,
                email: new_user.email,
                password_hash,
                role: new_user.role,
            })
            .await;
        match &inserted {
            Ok(user) => info!(user_id = user.id, "User created successfully"),
            Err(e) => error!("Failed to insert user: {e}"),
        }
        let inserted = inserted?;
        Ok(UserDto::from(inserted))
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserDto, ServiceError> {
        info!("User sign-in attempt");
        let user = match self.user_repo.find_by_email(email).await? {
            Some(user) => user,
            None => {
                warn!("Sign-in failed: no user for email");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        let valid = PasswordUtilsImpl::verify_password(password, &user.password_hash)
            .map_err(|e| ServiceError::Internal(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!(user_id = user.id, "Sign-in failed: password mismatch");
            return Err(ServiceError::InvalidCredentials);
        }

        info!(user_id = user.id, "User signed in successfully");
        Ok(UserDto::from(user))
    }
}
