pub mod audit;
pub mod engine;
pub mod normalize;
pub mod request;

use serde::Serialize;
use serde_json::Value;

pub use engine::Executor;

/// Structured result of one invocation attempt, returned to the caller.
/// `status_code` is absent when the attempt failed before an HTTP response
/// existed (transport error, timeout).
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub execution_time_ms: i64,
}
