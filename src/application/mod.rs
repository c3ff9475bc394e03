pub mod alert_log;
pub mod classifier;
pub mod filter;
