use crate::dto::user_dto::UserDto;
use crate::model::user::UserChanges;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

#[async_trait]
pub trait UserService: Send + Sync {
    async fn list(&self) -> Result<Vec<UserDto>, ServiceError>;
    async fn get_by_id(&self, id: i64) -> Result<UserDto, ServiceError>;
    /// Persist the supplied fields and return the refreshed record. An empty
    /// change set is a no-op that returns the current record.
    async fn update(&self, id: i64, changes: UserChanges) -> Result<UserDto, ServiceError>;
    async fn delete(&self, id: i64) -> Result<i64, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<UserDto>, ServiceError> {
        let users = self.user_repo.find_all().await?;
        info!(count = users.len(), "Listed users");
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<UserDto, ServiceError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No user found for ID: {}", id)))?;
        Ok(UserDto::from(user))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i64, changes: UserChanges) -> Result<UserDto, ServiceError> {
        if changes.is_empty() {
            // No recognized fields supplied; a concurrent delete between the
            // check and this fetch surfaces NotFound rather than stale data.
            info!("Update carried no recognized fields, returning current record");
            return self.get_by_id(id).await;
        }

        let updated = self.user_repo.update(id, changes).await;
        match &updated {
            Ok(user) => info!(user_id = user.id, "User updated successfully"),
            Err(e) => error!("Failed to update user: {e}"),
        }
        Ok(UserDto::from(updated?))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<i64, ServiceError> {
        let deleted = self.user_repo.delete(id).await;
        match &deleted {
            Ok(()) => info!(user_id = id, "User deleted successfully"),
            Err(e) => error!("Failed to delete user: {e}"),
        }
        deleted?;
        Ok(id)
    }
}
