//! Failure monitor: threshold detection and corrective strikes.

use market_warfare_core::{FailureCause, Ledger, EFFICIENCY_FLOOR, REPUTATION_FLOOR};

const STRIKE_SCORE_PENALTY: i64 = 7;
const STRIKE_CASH_PENALTY: i64 = 3;
const STRIKE_DELEVERAGE: i64 = 4;

/// Returns the highest-priority breached threshold, if any.
///
/// Cash is checked first, then risk, reputation and efficiency. At most one
/// cause is reported per round even when several thresholds are breached.
#[must_use]
pub fn check(ledger: &Ledger, risk_cap: i64) -> Option<FailureCause> {
    if ledger.cash <= 0 {
        Some(FailureCause::Cash)
    } else if ledger.risk >= risk_cap {
        Some(FailureCause::Risk)
    } else if ledger.reputation <= REPUTATION_FLOOR {
        Some(FailureCause::Reputation)
    } else if ledger.efficiency <= EFFICIENCY_FLOOR {
        Some(FailureCause::Efficiency)
    } else {
        None
    }
}

/// Applies a strike for `cause` and returns its feedback sentence.
///
/// The strike costs score and cash and forces a deleverage; risk never drops
/// below zero.
pub fn strike(ledger: &mut Ledger, cause: FailureCause) -> &'static str {
    ledger.score -= STRIKE_SCORE_PENALTY;
    ledger.cash -= STRIKE_CASH_PENALTY;
    ledger.risk = (ledger.risk - STRIKE_DELEVERAGE).max(0);
    cause.sentence()
}
