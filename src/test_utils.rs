pub mod test_helpers {
    use crate::config::Backend;
    use crate::db;
    use crate::models::UserFields;
    use sqlx::{
        any::{install_default_drivers, AnyPoolOptions},
        AnyPool,
    };
    use tempfile::NamedTempFile;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<AnyPool, sqlx::Error> {
        install_default_drivers();

        // A single connection that never recycles keeps the in-memory database alive
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        db::ensure_schema(&pool, Backend::Sqlite).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when a test needs more than one connection
    pub async fn create_test_db_file() -> Result<(AnyPool, NamedTempFile), sqlx::Error> {
        install_default_drivers();

        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = AnyPoolOptions::new()
            .max_connections(4)
            .connect(&database_url)
            .await?;

        db::ensure_schema(&pool, Backend::Sqlite).await?;

        Ok((pool, temp_file))
    }

    /// A pool whose database never answers, for degraded-mode tests
    pub fn create_unreachable_pool() -> Result<AnyPool, sqlx::Error> {
        install_default_drivers();

        AnyPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("sqlite:///nonexistent-dir/for/crud_app/tests.db")
    }

    /// Insert a user row directly, bypassing sanitization
    pub async fn insert_test_user(
        pool: &AnyPool,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (name, email, phone) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(phone)
            .execute(pool)
            .await?;

        result
            .last_insert_id()
            .ok_or_else(|| sqlx::Error::Protocol("driver returned no insert id".into()))
    }

    pub fn ada() -> UserFields {
        UserFields::new("Ada Lovelace", "ada@example.com", "555-0100")
    }
}

// Re-export commonly used test functions at module level for convenience
// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::AnyPool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}
