use crate::models::user::{User, UserFields};
use async_trait::async_trait;
use sqlx::AnyPool;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence boundary around the `users` table.
///
/// `update` and `delete` report the number of rows they touched; a count of
/// zero means the id did not exist and is not treated as an error.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    async fn create(&self, fields: &UserFields) -> RepositoryResult<Option<i64>>;
    async fn list_all(&self) -> RepositoryResult<Vec<User>>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;
    async fn update(&self, id: i64, fields: &UserFields) -> RepositoryResult<u64>;
    async fn delete(&self, id: i64) -> RepositoryResult<u64>;
    async fn count(&self) -> RepositoryResult<i64>;
}

pub struct SqlUserRepository {
    pool: AnyPool,
}

impl SqlUserRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn create(&self, fields: &UserFields) -> RepositoryResult<Option<i64>> {
        let result = sqlx::query("INSERT INTO users (name, email, phone) VALUES (?, ?, ?)")
            .bind(fields.name.as_str())
            .bind(fields.email.as_str())
            .bind(fields.phone.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_id())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, phone FROM users ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, phone FROM users WHERE id = ? LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: i64, fields: &UserFields) -> RepositoryResult<u64> {
        let result = sqlx::query("UPDATE users SET name = ?, email = ?, phone = ? WHERE id = ?")
            .bind(fields.name.as_str())
            .bind(fields.email.as_str())
            .bind(fields.phone.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
