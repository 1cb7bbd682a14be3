use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::execution::Executor;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub executor: Executor,
}
