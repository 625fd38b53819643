use sqlx::{
    any::{install_default_drivers, AnyPoolOptions},
    AnyPool,
};
use std::path::Path;

use crate::config::{Backend, DatabaseConfig};

const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL
)
"#;

const MYSQL_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    phone VARCHAR(64) NOT NULL
) DEFAULT CHARSET = utf8mb4
"#;

/// Builds the pool without touching the database, so the app can start
/// (and report itself offline) while the store is unreachable.
pub fn create_pool(config: &DatabaseConfig) -> Result<AnyPool, sqlx::Error> {
    install_default_drivers();

    let url = config.url();

    // Ensure the data directory exists
    if config.backend() == Backend::Sqlite {
        let path = url
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");
        let path = path.split('?').next().unwrap_or_default();
        if !path.is_empty() && !path.starts_with(':') {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent).ok();
            }
        }
    }

    AnyPoolOptions::new().max_connections(5).connect_lazy(&url)
}

/// Creates the `users` table if it is missing.
pub async fn ensure_schema(pool: &AnyPool, backend: Backend) -> Result<(), sqlx::Error> {
    let ddl = match backend {
        Backend::Sqlite => SQLITE_SCHEMA,
        Backend::MySql => MYSQL_SCHEMA,
    };

    sqlx::query(ddl).execute(pool).await?;
    Ok(())
}

/// Runs a trivial query against the store.
pub async fn ping(pool: &AnyPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// True when the database answers [`ping`].
pub async fn is_online(pool: &AnyPool) -> bool {
    match ping(pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            false
        }
    }
}
