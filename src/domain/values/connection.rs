use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Lifecycle state of the live alert stream. Owned exclusively by the
/// stream driver; everything else only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Open => write!(f, "open"),
            ConnectionState::Closing => write!(f, "closing"),
            ConnectionState::Closed => write!(f, "closed"),
        }
    }
}

pub const BASE_RECONNECT_DELAY: Duration = Duration::from_secs(1);
pub const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(30);
pub const MAX_RECONNECT_ATTEMPTS: u32 = 10;

/// Exponential backoff for redial scheduling:
/// `min(base * 2^attempt, max)` where `attempt` counts consecutive failures.
pub fn reconnect_delay(attempt: u32) -> Duration {
    BASE_RECONNECT_DELAY
        .checked_mul(2u32.saturating_pow(attempt.min(31)))
        .map(|d| d.min(MAX_RECONNECT_DELAY))
        .unwrap_or(MAX_RECONNECT_DELAY)
}
