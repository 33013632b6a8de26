//! Outcome resolution: turns an action and a market shock into ledger deltas.
//!
//! Penalties are truncated toward zero. Pressure is never negative, so
//! truncation and flooring agree; allowing negative pressure would require
//! revisiting every conversion below.

use market_warfare_core::{ActionKind, Ledger, Penalties, Pressure};

const CASH_PENALTY_RATE: f64 = 0.8;
const REPUTATION_PENALTY_RATE: f64 = 0.3;
const EFFICIENCY_PENALTY_RATE: f64 = 0.2;
const SCORE_PENALTY_RATE: f64 = 0.2;

/// Multiplier applied to the cash penalty as risk accumulates.
///
/// A zero or negative cap is treated as one.
#[must_use]
pub fn exposure(risk: i64, risk_cap: i64) -> f64 {
    1.0 + risk as f64 / risk_cap.max(1) as f64
}

/// Computes the penalties the market charges for `pressure` at the current risk.
#[must_use]
pub fn penalties(pressure: Pressure, risk: i64, risk_cap: i64) -> Penalties {
    let shock = pressure.as_f64();
    Penalties {
        cash: truncate(shock * exposure(risk, risk_cap) * CASH_PENALTY_RATE),
        reputation: truncate(shock * REPUTATION_PENALTY_RATE),
        efficiency: truncate(shock * EFFICIENCY_PENALTY_RATE),
    }
}

/// Applies `action` against `pressure`, mutating the ledger in place.
///
/// Risk is never reduced by the market and none of the fields are floored
/// here; threshold breaches are left to the failure monitor.
pub fn resolve(
    action: ActionKind,
    pressure: Pressure,
    ledger: &mut Ledger,
    risk_cap: i64,
) -> Penalties {
    let effects = action.effects();
    let charged = penalties(pressure, ledger.risk, risk_cap);
    let score_penalty = truncate(pressure.as_f64() * SCORE_PENALTY_RATE);

    ledger.cash += effects.cash - i64::from(charged.cash);
    ledger.reputation += effects.reputation - i64::from(charged.reputation);
    ledger.efficiency += effects.efficiency - i64::from(charged.efficiency);
    ledger.risk += effects.risk;
    ledger.score += effects.score - i64::from(score_penalty);

    charged
}

fn truncate(value: f64) -> u32 {
    // `as` saturates, so negative and non-finite products collapse to zero or u32::MAX.
    value.trunc() as u32
}
