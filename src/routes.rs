use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{config::SessionLayer, handlers, AppState};

/// The whole HTTP surface: the page at `/` and a health check.
pub fn build_router(state: AppState, session_layer: SessionLayer) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::show_users_page).post(handlers::submit_user_form),
        )
        .route("/health", get(handlers::health_handler))
        .layer(session_layer)
        .layer(middleware::from_fn(crate::middleware::add_security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
