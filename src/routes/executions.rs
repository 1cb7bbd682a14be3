use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::models::ExecutionLog;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CallerParams {
    pub caller: String,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

pub async fn list_by_caller(
    State(state): State<SharedState>,
    Query(params): Query<CallerParams>,
) -> Result<Json<Vec<ExecutionLog>>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).min(100).max(1);
    let offset = (page - 1) * per_page;

    let logs =
        db::execution_log::list_by_caller(&state.pool, &params.caller, per_page, offset).await?;
    Ok(Json(logs))
}
