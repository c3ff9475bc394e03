use crate::domain::values::action::Action;
use crate::domain::values::timeframe::Timeframe;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One market alert as stored in the log. Immutable once ingested; the log
/// only ever appends, replaces-by-id, or evicts whole records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub symbol: String,
    pub action: Action,
    pub price: f64,
    /// Free-text name of the originating scan; only used to infer the
    /// holding timeframe.
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

impl AlertRecord {
    pub fn new(
        symbol: String,
        action: Action,
        price: f64,
        source: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Self::id_for(&symbol, &timestamp),
            symbol,
            action,
            price,
            source,
            timestamp,
        }
    }

    /// Deterministic id so redelivered alerts collapse to the same record.
    pub fn id_for(symbol: &str, timestamp: &DateTime<Utc>) -> String {
        format!("{}_{}", symbol, timestamp.to_rfc3339())
    }

    pub fn timeframe(&self) -> Timeframe {
        Timeframe::infer(&self.source)
    }
}
