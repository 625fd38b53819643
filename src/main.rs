use crud_app::{
    config::{DatabaseConfig, SessionConfig},
    db, routes, AppState,
};

use std::net::SocketAddr;
use tower_sessions::MemoryStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crud_app=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let db_config = DatabaseConfig::from_env();
    tracing::info!("Using database {}", db_config.redacted_url());
    let pool = db::create_pool(&db_config)?;

    // The page still renders (reporting the database offline) if this fails
    match db::ensure_schema(&pool, db_config.backend()).await {
        Ok(()) => tracing::info!("Database schema ready"),
        Err(e) => tracing::warn!("Could not prepare database schema: {}", e),
    }

    let app_state = AppState::new(pool);

    // Session store
    let session_layer = SessionConfig::from_env().create_layer(MemoryStore::default());

    let app = routes::build_router(app_state, session_layer);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()?;

    let addr = SocketAddr::from((host.parse::<std::net::IpAddr>()?, port));

    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
