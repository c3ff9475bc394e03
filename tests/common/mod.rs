//! Shared test helpers.

#![allow(dead_code)]

use alertdesk::domain::entities::alert_record::AlertRecord;
use alertdesk::domain::error::DomainError;
use alertdesk::domain::ports::alert_feed::{AlertFeed, BackendStatus, MarketIndices};
use alertdesk::domain::values::action::Action;
use alertdesk::infrastructure::baskets::static_index::StaticBasketIndex;
use alertdesk::infrastructure::prefs::file_store::FilePreferenceStore;
use alertdesk::AlertDesk;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub fn make_record(symbol: &str, action: Action, price: f64, minutes_ago: i64) -> AlertRecord {
    make_record_at(
        symbol,
        action,
        price,
        Utc::now() - Duration::minutes(minutes_ago),
    )
}

pub fn make_record_at(
    symbol: &str,
    action: Action,
    price: f64,
    timestamp: DateTime<Utc>,
) -> AlertRecord {
    AlertRecord::new(
        symbol.to_string(),
        action,
        price,
        "Intraday price crossover".to_string(),
        timestamp,
    )
}

/// In-memory feed serving a fixed alert list.
pub struct FakeFeed {
    pub alerts: Mutex<Vec<AlertRecord>>,
    pub fail: bool,
}

impl FakeFeed {
    pub fn new(alerts: Vec<AlertRecord>) -> Self {
        Self {
            alerts: Mutex::new(alerts),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl AlertFeed for FakeFeed {
    async fn recent_alerts(&self, limit: usize) -> Result<Vec<AlertRecord>, DomainError> {
        if self.fail {
            return Err(DomainError::Network("backend unreachable".into()));
        }
        let mut alerts = self.alerts.lock().unwrap().clone();
        alerts.truncate(limit);
        Ok(alerts)
    }

    async fn market_indices(&self) -> Result<MarketIndices, DomainError> {
        if self.fail {
            return Err(DomainError::Network("backend unreachable".into()));
        }
        Ok(MarketIndices {
            nifty: 24_500.0,
            banknifty: 52_000.0,
            market_open: true,
            nifty_change: 120.5,
            nifty_change_percent: 0.49,
            banknifty_change: -80.0,
            banknifty_change_percent: -0.15,
        })
    }

    async fn health(&self) -> BackendStatus {
        if self.fail {
            BackendStatus::Inactive
        } else {
            BackendStatus::Active
        }
    }
}

/// A desk wired to an in-memory feed and a throwaway preference file. The
/// TempDir keeps the preference path alive for the test's duration.
pub fn setup(alerts: Vec<AlertRecord>) -> (AlertDesk, TempDir) {
    setup_with_capacity(alerts, 100)
}

pub fn setup_with_capacity(alerts: Vec<AlertRecord>, capacity: usize) -> (AlertDesk, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let desk = AlertDesk::with_providers(
        "http://localhost:8080",
        Arc::new(FakeFeed::new(alerts)),
        Arc::new(StaticBasketIndex::builtin()),
        Arc::new(FilePreferenceStore::new(dir.path().join("prefs.json"))),
        capacity,
    );
    (desk, dir)
}
