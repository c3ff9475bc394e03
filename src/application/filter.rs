use crate::application::alert_log::AlertLog;
use crate::application::classifier::{bucketize, classify, StockBuckets};
use crate::domain::entities::alert_record::AlertRecord;
use crate::domain::ports::basket_index::BasketIndex;
use crate::domain::values::action::Action;
use crate::domain::values::time_window::TimeWindow;
use crate::domain::values::timeframe::Timeframe;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::sync::Arc;

pub const ALL_BASKET: &str = "ALL";
pub const CUSTOM_BASKET: &str = "CUSTOM";

/// Caller-owned filter configuration, passed by value on every query.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub baskets: HashSet<String>,
    /// Symbols of the user's CUSTOM basket; only consulted when `baskets`
    /// selects CUSTOM.
    pub custom_symbols: HashSet<String>,
    pub timeframes: HashSet<Timeframe>,
    pub panels: HashSet<Action>,
    pub time_window: TimeWindow,
    pub search_text: String,
}

impl Default for FilterSpec {
    /// Mirrors the dashboard's initial selection: ALL basket, intraday,
    /// BUY+SELL panels, today's alerts.
    fn default() -> Self {
        Self {
            baskets: HashSet::from([ALL_BASKET.to_string()]),
            custom_symbols: HashSet::new(),
            timeframes: HashSet::from([Timeframe::Intraday]),
            panels: HashSet::from([Action::Buy, Action::Sell]),
            time_window: TimeWindow::Today,
            search_text: String::new(),
        }
    }
}

/// The two views the presentation layer reads: the raw time-windowed alert
/// feed, and the fully filtered per-symbol recommendation buckets.
#[derive(Debug, Clone)]
pub struct FilteredView {
    pub alerts: Vec<AlertRecord>,
    pub stocks: StockBuckets,
}

pub struct FilterEngine {
    baskets: Arc<dyn BasketIndex>,
}

impl FilterEngine {
    pub fn new(baskets: Arc<dyn BasketIndex>) -> Self {
        Self { baskets }
    }

    /// Apply `spec` to the log as of `now`. Filter order: time window,
    /// basket, classification, panel, timeframe, free text. The raw alert
    /// view only gets the time window; basket/panel/timeframe filters never
    /// touch it.
    pub fn apply(&self, log: &AlertLog, spec: &FilterSpec, now: DateTime<Local>) -> FilteredView {
        let windowed: Vec<AlertRecord> = log
            .snapshot()
            .into_iter()
            .filter(|r| {
                spec.time_window
                    .contains(r.timestamp.with_timezone(&Local), now)
            })
            .collect();

        let basket_filtered: Vec<AlertRecord> = windowed
            .iter()
            .filter(|r| self.in_selected_baskets(&r.symbol, spec))
            .cloned()
            .collect();

        let mut states = classify(&basket_filtered);

        // Deselecting every panel means "show everything", never zero panels
        if !spec.panels.is_empty() {
            states.retain(|s| spec.panels.contains(&s.action));
        }

        if !spec.timeframes.is_empty() {
            states.retain(|s| spec.timeframes.contains(&s.timeframe()));
        }

        let query = spec.search_text.trim().to_lowercase();
        if !query.is_empty() {
            states.retain(|s| s.symbol.to_lowercase().contains(&query));
        }

        FilteredView {
            alerts: windowed,
            stocks: bucketize(states),
        }
    }

    fn in_selected_baskets(&self, symbol: &str, spec: &FilterSpec) -> bool {
        if spec.baskets.is_empty() || spec.baskets.contains(ALL_BASKET) {
            return true;
        }
        spec.baskets.iter().any(|basket| {
            if basket == CUSTOM_BASKET {
                spec.custom_symbols.contains(symbol)
            } else {
                self.baskets.is_member(symbol, basket)
            }
        })
    }
}
