pub mod button;
pub mod execution_log;

pub use button::{ActionKind, ControlButton, HttpMethod, OutputFormat};
pub use execution_log::{ExecutionLog, ExecutionStatus};
