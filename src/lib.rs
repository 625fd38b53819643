pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<services::user_service::UserService>,
    pub pool: sqlx::AnyPool,
}

impl AppState {
    pub fn new(pool: sqlx::AnyPool) -> Self {
        let repository = Arc::new(repositories::SqlUserRepository::new(pool.clone()));
        Self {
            user_service: Arc::new(services::UserService::new(repository)),
            pool,
        }
    }
}
