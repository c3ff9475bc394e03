pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::alert_log::AlertLog;
use crate::application::classifier::{classify_symbol, StockBuckets, StockState};
use crate::application::filter::{FilterEngine, FilterSpec, FilteredView, ALL_BASKET};
use crate::domain::entities::alert_record::AlertRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::alert_feed::{AlertFeed, BackendStatus, MarketIndices, StreamEvent};
use crate::domain::ports::basket_index::BasketIndex;
use crate::domain::ports::preference_store::PreferenceStore;
use crate::domain::values::targets::{target_levels, TargetLevels};
use crate::domain::values::timeframe::Timeframe;
use crate::infrastructure::baskets::static_index::StaticBasketIndex;
use crate::infrastructure::http::snapshot::AlertApi;
use crate::infrastructure::http::stream::StreamConnection;
use crate::infrastructure::prefs::file_store::FilePreferenceStore;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::warn;

/// Facade wiring the alert log, filters, and backend collaborators behind
/// one owner. The log is single-writer: only this struct's methods mutate
/// it, with the stream driver pushing records through `ingest`.
pub struct AlertDesk {
    base_url: String,
    log: Mutex<AlertLog>,
    filter: FilterEngine,
    feed: Arc<dyn AlertFeed>,
    baskets: Arc<dyn BasketIndex>,
    prefs: Arc<dyn PreferenceStore>,
}

impl AlertDesk {
    pub fn new(base_url: &str) -> Self {
        Self::with_providers(
            base_url,
            Arc::new(AlertApi::new(base_url)),
            Arc::new(StaticBasketIndex::builtin()),
            Arc::new(FilePreferenceStore::default_path()),
            application::alert_log::DEFAULT_CAPACITY,
        )
    }

    pub fn with_providers(
        base_url: &str,
        feed: Arc<dyn AlertFeed>,
        baskets: Arc<dyn BasketIndex>,
        prefs: Arc<dyn PreferenceStore>,
        capacity: usize,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            log: Mutex::new(AlertLog::new(capacity)),
            filter: FilterEngine::new(baskets.clone()),
            feed,
            baskets,
            prefs,
        }
    }

    fn locked(&self) -> MutexGuard<'_, AlertLog> {
        self.log.lock().unwrap_or_else(|p| p.into_inner())
    }

    // --- ingestion ---

    /// Fetch the initial snapshot and merge it into the log, deduplicating
    /// by id so it cannot clobber alerts the stream delivered first. A
    /// fetch failure reads as "no data yet", never an error.
    pub async fn load_snapshot(&self, limit: usize) -> usize {
        let records = match self.feed.recent_alerts(limit).await {
            Ok(records) => records,
            Err(e) => {
                warn!("alert snapshot unavailable, starting empty: {e}");
                return self.log_len();
            }
        };

        let mut log = self.locked();
        if log.is_empty() {
            log.bulk_load(records);
        } else {
            let mut merged = log.snapshot();
            let known: HashSet<String> = merged.iter().map(|r| r.id.clone()).collect();
            merged.extend(records.into_iter().filter(|r| !known.contains(&r.id)));
            log.bulk_load(merged);
        }
        log.len()
    }

    pub fn ingest(&self, record: AlertRecord) {
        self.locked().ingest(record);
    }

    pub fn log_snapshot(&self) -> Vec<AlertRecord> {
        self.locked().snapshot()
    }

    pub fn log_len(&self) -> usize {
        self.locked().len()
    }

    /// Open the live SSE stream. The caller owns the handle and is
    /// expected to feed `StreamEvent::Alert` records back via `ingest`.
    pub fn open_stream(&self) -> (StreamConnection, mpsc::UnboundedReceiver<StreamEvent>) {
        StreamConnection::open(format!("{}/api/alerts/stream", self.base_url))
    }

    // --- derived views ---

    pub fn view(&self, spec: &FilterSpec) -> FilteredView {
        self.view_at(spec, Local::now())
    }

    /// Like `view` but with an explicit clock, so time-window behavior is
    /// testable.
    pub fn view_at(&self, spec: &FilterSpec, now: DateTime<Local>) -> FilteredView {
        self.filter.apply(&self.locked(), spec, now)
    }

    pub fn alerts_view(&self, spec: &FilterSpec) -> Vec<AlertRecord> {
        self.view(spec).alerts
    }

    pub fn stock_buckets(&self, spec: &FilterSpec) -> StockBuckets {
        self.view(spec).stocks
    }

    pub fn stock_state(&self, symbol: &str) -> Option<StockState> {
        classify_symbol(&self.log_snapshot(), symbol)
    }

    /// Target/stoploss levels for a stock at its current classification,
    /// or None when the log has no alerts for it.
    pub fn targets_for(&self, symbol: &str, timeframe: Timeframe) -> Option<TargetLevels> {
        let state = self.stock_state(symbol)?;
        Some(target_levels(state.reference_price, state.action, timeframe))
    }

    // --- collaborators ---

    pub async fn market_indices(&self) -> Result<MarketIndices, DomainError> {
        self.feed.market_indices().await
    }

    pub async fn backend_status(&self) -> BackendStatus {
        self.feed.health().await
    }

    pub fn is_stock_in_basket(&self, symbol: &str, basket: &str) -> bool {
        self.baskets.is_member(symbol, basket)
    }

    pub fn basket_count(&self, basket: &str) -> usize {
        self.baskets.count(basket)
    }

    pub fn basket_names(&self) -> Vec<String> {
        self.baskets.baskets()
    }

    // --- preferences ---

    /// Saved default basket selection, falling back to ALL.
    pub fn default_baskets(&self) -> Vec<String> {
        match self.prefs.load_default_baskets() {
            Ok(Some(baskets)) => baskets,
            Ok(None) => vec![ALL_BASKET.to_string()],
            Err(e) => {
                warn!("could not read saved basket defaults: {e}");
                vec![ALL_BASKET.to_string()]
            }
        }
    }

    pub fn save_default_baskets(&self, baskets: &[String]) -> Result<(), DomainError> {
        self.prefs.save_default_baskets(baskets)
    }

    pub fn reset_default_baskets(&self) -> Result<(), DomainError> {
        self.prefs.clear_default_baskets()
    }
}
