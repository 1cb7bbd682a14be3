use sqlx::SqlitePool;

use crate::db;
use crate::db::execution_log::NewExecutionLog;

/// Persist one execution record. A failed write is reported on the error
/// log and must never mask the invocation outcome already computed.
pub async fn record(pool: &SqlitePool, log: NewExecutionLog<'_>) {
    if let Err(e) = db::execution_log::create(pool, log).await {
        tracing::error!("Failed to write execution log: {e}");
    }
}
