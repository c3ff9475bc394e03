use crate::domain::entities::alert_record::AlertRecord;
use crate::domain::values::action::Action;
use crate::domain::values::timeframe::Timeframe;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Per-symbol view derived from the alert log. Never stored; recomputed
/// from the log on every query.
#[derive(Debug, Clone, Serialize)]
pub struct StockState {
    pub symbol: String,
    pub action: Action,
    pub reference_price: f64,
    /// Length of the current same-action streak, reported as days. A
    /// single alert reports 0 ("since 0 days"). Consecutive alerts count
    /// as days regardless of the calendar gap between them.
    pub streak_days: u32,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

impl StockState {
    pub fn timeframe(&self) -> Timeframe {
        Timeframe::infer(&self.source)
    }
}

/// Display buckets for the recommendation panels. SIDEWAYS is reserved:
/// the feed only emits BUY/SELL, so it stays empty unless a future feed
/// revision adds a third action.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StockBuckets {
    pub buy: Vec<StockState>,
    pub sell: Vec<StockState>,
    pub sideways: Vec<StockState>,
}

impl StockBuckets {
    pub fn total(&self) -> usize {
        self.buy.len() + self.sell.len() + self.sideways.len()
    }
}

/// Derive one StockState per symbol from a newest-first record slice,
/// preserving the order symbols first appear in the log.
pub fn classify(records: &[AlertRecord]) -> Vec<StockState> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_symbol: HashMap<&str, Vec<&AlertRecord>> = HashMap::new();

    for record in records {
        let entry = by_symbol.entry(record.symbol.as_str()).or_default();
        if entry.is_empty() {
            order.push(record.symbol.as_str());
        }
        entry.push(record);
    }

    order
        .into_iter()
        .filter_map(|symbol| state_from(&by_symbol[symbol]))
        .collect()
}

/// Derive the state for a single symbol, or None when the log has no
/// records for it.
pub fn classify_symbol(records: &[AlertRecord], symbol: &str) -> Option<StockState> {
    let own: Vec<&AlertRecord> = records.iter().filter(|r| r.symbol == symbol).collect();
    state_from(&own)
}

/// Group derived states into BUY/SELL/SIDEWAYS panels.
pub fn bucketize(states: Vec<StockState>) -> StockBuckets {
    let mut buckets = StockBuckets::default();
    for state in states {
        match state.action {
            Action::Buy => buckets.buy.push(state),
            Action::Sell => buckets.sell.push(state),
            Action::Sideways => buckets.sideways.push(state),
        }
    }
    buckets
}

fn state_from(own: &[&AlertRecord]) -> Option<StockState> {
    let newest = own.first()?;
    let current = newest.action;

    // Walk newest-to-oldest, counting consecutive records that share the
    // current action; the first differing record ends the streak.
    let streak = own.iter().take_while(|r| r.action == current).count() as u32;

    Some(StockState {
        symbol: newest.symbol.clone(),
        action: current,
        reference_price: newest.price,
        streak_days: if streak <= 1 { 0 } else { streak },
        source: newest.source.clone(),
        timestamp: newest.timestamp,
    })
}
