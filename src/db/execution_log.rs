use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{ExecutionLog, ExecutionStatus};

pub struct NewExecutionLog<'a> {
    pub button_id: i64,
    pub executed_by: &'a str,
    pub action: &'a str,
    pub request_payload: Option<&'a str>,
    pub response_data: Option<&'a str>,
    pub status: ExecutionStatus,
    pub error_message: Option<&'a str>,
    pub execution_time_ms: i64,
}

pub async fn create(
    pool: &SqlitePool,
    new: NewExecutionLog<'_>,
) -> Result<ExecutionLog, sqlx::Error> {
    sqlx::query_as::<_, ExecutionLog>(
        "INSERT INTO execution_log (button_id, executed_by, executed_at, action,
             request_payload, response_data, status, error_message, execution_time_ms)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(new.button_id)
    .bind(new.executed_by)
    .bind(Utc::now())
    .bind(new.action)
    .bind(new.request_payload)
    .bind(new.response_data)
    .bind(new.status)
    .bind(new.error_message)
    .bind(new.execution_time_ms)
    .fetch_one(pool)
    .await
}

pub async fn list_by_button(
    pool: &SqlitePool,
    button_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<ExecutionLog>, sqlx::Error> {
    sqlx::query_as::<_, ExecutionLog>(
        "SELECT * FROM execution_log WHERE button_id = ?
         ORDER BY executed_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(button_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn list_by_caller(
    pool: &SqlitePool,
    executed_by: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<ExecutionLog>, sqlx::Error> {
    sqlx::query_as::<_, ExecutionLog>(
        "SELECT * FROM execution_log WHERE executed_by = ?
         ORDER BY executed_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(executed_by)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
