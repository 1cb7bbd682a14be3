use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable audit row for one invocation attempt. Exactly one row is
/// written per attempt, whatever the outcome.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ExecutionLog {
    pub id: i64,
    pub button_id: i64,
    pub executed_by: String,
    pub executed_at: DateTime<Utc>,
    pub action: String,
    pub request_payload: Option<String>,
    pub response_data: Option<String>,
    pub status: ExecutionStatus,
    pub error_message: Option<String>,
    pub execution_time_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum ExecutionStatus {
    Success,
    Failure,
    Timeout,
}
