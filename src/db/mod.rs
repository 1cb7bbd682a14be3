pub mod buttons;
pub mod execution_log;
