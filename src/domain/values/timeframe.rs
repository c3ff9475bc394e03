use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Holding-duration category for a recommendation. Selects the
/// target/stoploss percentage table and drives timeframe filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Timeframe {
    Intraday,
    Shortterm,
    Positional,
    Longterm,
}

impl Timeframe {
    /// Best-effort inference from an alert's scan name. Case-insensitive
    /// substring match in priority order; anything unrecognized is INTRADAY.
    pub fn infer(source: &str) -> Timeframe {
        let upper = source.to_uppercase();
        if upper.contains("INTRADAY") {
            Timeframe::Intraday
        } else if upper.contains("POSITIONAL") {
            Timeframe::Positional
        } else if upper.contains("SHORT") {
            Timeframe::Shortterm
        } else if upper.contains("LONG") {
            Timeframe::Longterm
        } else {
            Timeframe::Intraday
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Intraday => write!(f, "INTRADAY"),
            Timeframe::Shortterm => write!(f, "SHORTTERM"),
            Timeframe::Positional => write!(f, "POSITIONAL"),
            Timeframe::Longterm => write!(f, "LONGTERM"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INTRADAY" => Ok(Timeframe::Intraday),
            "SHORTTERM" => Ok(Timeframe::Shortterm),
            "POSITIONAL" => Ok(Timeframe::Positional),
            "LONGTERM" => Ok(Timeframe::Longterm),
            _ => Err(format!("Unknown timeframe: {s}")),
        }
    }
}
