use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signal direction carried by an alert. The feed only ever emits BUY or
/// SELL; Sideways exists as a reserved classification bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Sideways,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
            Action::Sideways => write!(f, "SIDEWAYS"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(Action::Buy),
            "SELL" => Ok(Action::Sell),
            "SIDEWAYS" => Ok(Action::Sideways),
            _ => Err(format!("Unknown action: {s}")),
        }
    }
}
