use crate::models::user::{User, UserCommand, UserFields};
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use crate::services::sanitizer::sanitize_fields;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Inserts a new user and returns its id when the driver reports one.
    pub async fn create_user(&self, fields: &UserFields) -> Result<Option<i64>, UserServiceError> {
        let fields = sanitize_fields(fields);
        let id = self.repository.create(&fields).await?;
        info!("Created user {:?}", id);
        Ok(id)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repository.list_all().await?)
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn count_users(&self) -> Result<i64, UserServiceError> {
        Ok(self.repository.count().await?)
    }

    /// Overwrites the fields of user `id`.
    ///
    /// Returns the affected-row count. An unknown id yields `Ok(0)`: the
    /// statement ran, it just matched nothing.
    pub async fn update_user(&self, id: i64, fields: &UserFields) -> Result<u64, UserServiceError> {
        let fields = sanitize_fields(fields);
        let affected = self.repository.update(id, &fields).await?;
        if affected == 0 {
            warn!("Update of user {} changed no rows", id);
        } else {
            info!("Updated user {}", id);
        }
        Ok(affected)
    }

    /// Removes user `id`, with the same row-count semantics as [`Self::update_user`].
    pub async fn delete_user(&self, id: i64) -> Result<u64, UserServiceError> {
        let affected = self.repository.delete(id).await?;
        if affected == 0 {
            warn!("Delete of user {} matched no rows", id);
        } else {
            info!("Deleted user {}", id);
        }
        Ok(affected)
    }

    pub async fn execute(&self, command: UserCommand) -> Result<(), UserServiceError> {
        match command {
            UserCommand::Create(fields) => self.create_user(&fields).await.map(|_| ()),
            UserCommand::Update { id, fields } => self.update_user(id, &fields).await.map(|_| ()),
            UserCommand::Delete { id } => self.delete_user(id).await.map(|_| ()),
        }
    }
}
