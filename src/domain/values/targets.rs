use crate::domain::values::action::Action;
use crate::domain::values::timeframe::Timeframe;
use serde::Serialize;

/// Three profit targets and three stop-loss levels for one recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetLevels {
    pub target1: f64,
    pub target2: f64,
    pub target3: f64,
    pub stoploss1: f64,
    pub stoploss2: f64,
    pub hard_stoploss: f64,
}

impl TargetLevels {
    pub fn zero() -> Self {
        Self {
            target1: 0.0,
            target2: 0.0,
            target3: 0.0,
            stoploss1: 0.0,
            stoploss2: 0.0,
            hard_stoploss: 0.0,
        }
    }
}

/// Per-timeframe percentage magnitudes in BUY direction:
/// (target1, target2, target3, stoploss1, stoploss2, hard_stoploss).
fn percentages(timeframe: Timeframe) -> (f64, f64, f64, f64, f64, f64) {
    match timeframe {
        Timeframe::Intraday => (0.015, 0.025, 0.04, 0.01, 0.02, 0.03),
        Timeframe::Shortterm => (0.02, 0.05, 0.08, 0.02, 0.04, 0.05),
        Timeframe::Positional => (0.05, 0.08, 0.12, 0.025, 0.04, 0.07),
        Timeframe::Longterm => (0.10, 0.20, 0.30, 0.05, 0.08, 0.10),
    }
}

/// Compute target and stop-loss levels from a reference price.
///
/// BUY moves targets up and stops down; SELL inverts every sign with the
/// same magnitudes. A non-positive reference price yields all zeros rather
/// than an error, covering the no-data-yet case.
pub fn target_levels(reference_price: f64, action: Action, timeframe: Timeframe) -> TargetLevels {
    if reference_price <= 0.0 {
        return TargetLevels::zero();
    }

    let (t1, t2, t3, s1, s2, hs) = percentages(timeframe);
    // SELL targets move price down, stops move price up
    let dir = if action == Action::Sell { -1.0 } else { 1.0 };

    TargetLevels {
        target1: round2(reference_price * (1.0 + dir * t1)),
        target2: round2(reference_price * (1.0 + dir * t2)),
        target3: round2(reference_price * (1.0 + dir * t3)),
        stoploss1: round2(reference_price * (1.0 - dir * s1)),
        stoploss2: round2(reference_price * (1.0 - dir * s2)),
        hard_stoploss: round2(reference_price * (1.0 - dir * hs)),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
