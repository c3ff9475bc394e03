use chrono::{DateTime, Datelike, Duration, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recency window applied to the alert log before any other filtering.
/// Boundaries are local midnights; the week starts on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeWindow {
    Today,
    Yesterday,
    ThisWeek,
    All,
}

impl TimeWindow {
    pub fn contains(&self, timestamp: DateTime<Local>, now: DateTime<Local>) -> bool {
        let today = local_midnight(now);
        match self {
            TimeWindow::Today => timestamp >= today,
            TimeWindow::Yesterday => {
                let yesterday = today - Duration::days(1);
                timestamp >= yesterday && timestamp < today
            }
            TimeWindow::ThisWeek => {
                let days_since_sunday = today.weekday().num_days_from_sunday() as i64;
                timestamp >= today - Duration::days(days_since_sunday)
            }
            TimeWindow::All => true,
        }
    }
}

fn local_midnight(dt: DateTime<Local>) -> DateTime<Local> {
    let naive = dt.date_naive().and_hms_opt(0, 0, 0).unwrap();
    // DST can make midnight ambiguous or nonexistent; take the first valid
    // instant of the day and fall back to the input when there is none.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or(dt)
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::Today => write!(f, "TODAY"),
            TimeWindow::Yesterday => write!(f, "YESTERDAY"),
            TimeWindow::ThisWeek => write!(f, "THIS_WEEK"),
            TimeWindow::All => write!(f, "ALL"),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TODAY" => Ok(TimeWindow::Today),
            "YESTERDAY" => Ok(TimeWindow::Yesterday),
            "THIS_WEEK" | "THISWEEK" => Ok(TimeWindow::ThisWeek),
            "ALL" => Ok(TimeWindow::All),
            _ => Err(format!("Unknown time window: {s}")),
        }
    }
}
