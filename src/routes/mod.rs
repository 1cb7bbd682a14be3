pub mod buttons;
pub mod executions;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Buttons
        .route("/api/v1/buttons", get(buttons::list).post(buttons::create))
        .route(
            "/api/v1/buttons/{id}",
            get(buttons::get)
                .put(buttons::update)
                .delete(buttons::delete),
        )
        .route("/api/v1/buttons/{id}/execute", post(buttons::execute))
        .route("/api/v1/buttons/{id}/log", get(buttons::log))
        // Execution history
        .route("/api/v1/executions", get(executions::list_by_caller))
}
