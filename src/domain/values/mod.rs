pub mod action;
pub mod connection;
pub mod targets;
pub mod time_window;
pub mod timeframe;
