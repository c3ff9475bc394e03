use crate::domain::entities::alert_record::AlertRecord;
use crate::domain::error::DomainError;
use async_trait::async_trait;
use serde::Serialize;

/// Server-side alert source: the snapshot endpoint plus the collaborator
/// queries the dashboard header uses. The live stream has its own driver
/// (see `infrastructure::http::stream`) and pushes through `StreamEvent`.
#[async_trait]
pub trait AlertFeed: Send + Sync {
    /// Most recent alerts, newest first, up to `limit`.
    async fn recent_alerts(&self, limit: usize) -> Result<Vec<AlertRecord>, DomainError>;

    /// Market indices snapshot for the header display.
    async fn market_indices(&self) -> Result<MarketIndices, DomainError>;

    /// Cheap reachability probe.
    async fn health(&self) -> BackendStatus;
}

/// Events surfaced by the live stream driver to its owner.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    Opened,
    Alert(AlertRecord),
    Closed,
    Error(String),
    /// Terminal: the retry budget is exhausted. Only `reconnect()` resumes.
    GaveUp,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketIndices {
    pub nifty: f64,
    pub banknifty: f64,
    pub market_open: bool,
    pub nifty_change: f64,
    pub nifty_change_percent: f64,
    pub banknifty_change: f64,
    pub banknifty_change_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BackendStatus {
    Active,
    Inactive,
}
