pub mod caller;
pub mod config;
pub mod db;
pub mod error;
pub mod execution;
pub mod models;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use sqlx::SqlitePool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::execution::Executor;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: SqlitePool, config: Config) -> Router {
    // The panel UI is served from elsewhere, so the API is CORS-enabled;
    // an empty origin list means any origin.
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(
                config
                    .allowed_origins
                    .iter()
                    .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
            ))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let executor = Executor::new(&config);
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        executor,
    });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
