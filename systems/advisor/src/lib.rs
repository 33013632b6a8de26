#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure heuristic advisor: coaching hints for humans and an autonomous action picker.
//!
//! Both policies read only the ledger and the difficulty profile handed to
//! them; the advisor keeps no state between rounds.

use std::cmp::Ordering;

use market_warfare_core::{ActionEffects, ActionKind, DifficultyProfile, Ledger};

const HINT_CASH_THRESHOLD: i64 = 8;
const HINT_REPUTATION_THRESHOLD: i64 = 5;
const HINT_EFFICIENCY_THRESHOLD: i64 = 5;

const LOW_CASH_THRESHOLD: i64 = 10;
const LOW_CASH_PENALTY: f64 = 3.0;
const HIGH_RISK_PENALTY: f64 = 4.0;

const SCORE_WEIGHT: f64 = 1.0;
const EFFICIENCY_WEIGHT: f64 = 0.2;
const REPUTATION_WEIGHT: f64 = 0.15;
const CASH_WEIGHT: f64 = 0.1;
const RISK_WEIGHT: f64 = 0.35;

/// Coaching guidance shown beside the action menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hint {
    /// Runway is short.
    SecureRunway,
    /// Exposure is close to the cap.
    Derisk,
    /// Customers are losing faith.
    RegainTrust,
    /// Operations are strained.
    StabilizeOps,
    /// Nothing is urgent.
    Balanced,
}

impl Hint {
    /// Line shown to the player.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SecureRunway => "Secure runway: choose 1 or 4.",
            Self::Derisk => "De-risk immediately: 4 or 5.",
            Self::RegainTrust => "Regain trust: choose 3 or 5.",
            Self::StabilizeOps => "Stabilize ops: 4 or 5.",
            Self::Balanced => "Balanced field: 1/3 for growth, 5 for patience.",
        }
    }
}

/// An action paired with the utility the autonomous policy assigned to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Action under consideration.
    pub action: ActionKind,
    /// Adjusted utility of the action.
    pub utility: f64,
}

/// Stateless heuristic advisor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Advisor;

impl Advisor {
    /// Creates a new advisor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Picks the coaching hint for the current ledger; the first matching rule wins.
    #[must_use]
    pub fn hint(&self, ledger: &Ledger, profile: &DifficultyProfile) -> Hint {
        if ledger.cash < HINT_CASH_THRESHOLD {
            Hint::SecureRunway
        } else if ledger.risk as f64 > profile.risk_alert_threshold() {
            Hint::Derisk
        } else if ledger.reputation < HINT_REPUTATION_THRESHOLD {
            Hint::RegainTrust
        } else if ledger.efficiency < HINT_EFFICIENCY_THRESHOLD {
            Hint::StabilizeOps
        } else {
            Hint::Balanced
        }
    }

    /// Scores every catalog action against the current ledger, in catalog order.
    #[must_use]
    pub fn candidates(&self, ledger: &Ledger, profile: &DifficultyProfile) -> Vec<Candidate> {
        ActionKind::ALL
            .into_iter()
            .map(|action| Candidate {
                action,
                utility: adjusted_utility(action, ledger, profile),
            })
            .collect()
    }

    /// Selects the action the autonomous player takes this round.
    #[must_use]
    pub fn choose(&self, ledger: &Ledger, profile: &DifficultyProfile) -> ActionKind {
        let candidates = self.candidates(ledger, profile);
        pick_highest(&candidates).unwrap_or(ActionKind::HoldPosition)
    }
}

/// Nominal utility of an action's effects, before danger adjustments.
#[must_use]
pub fn base_utility(effects: &ActionEffects) -> f64 {
    SCORE_WEIGHT * effects.score as f64
        + EFFICIENCY_WEIGHT * effects.efficiency as f64
        + REPUTATION_WEIGHT * effects.reputation as f64
        + CASH_WEIGHT * effects.cash as f64
        - RISK_WEIGHT * effects.risk as f64
}

/// Utility of `action` after steering away from thin runway and high exposure.
#[must_use]
pub fn adjusted_utility(action: ActionKind, ledger: &Ledger, profile: &DifficultyProfile) -> f64 {
    let effects = action.effects();
    let mut utility = base_utility(&effects);
    if ledger.cash < LOW_CASH_THRESHOLD && effects.cash < 0 {
        utility -= LOW_CASH_PENALTY;
    }
    if ledger.risk as f64 > profile.risk_alert_threshold() && effects.risk > 0 {
        utility -= HIGH_RISK_PENALTY;
    }
    utility
}

/// Returns the candidate ranked first when `(utility, key)` pairs are sorted descending.
///
/// The highest utility wins. Among equal utilities the greatest key wins, so
/// Hold Position (`5`) beats Raise Prices (`1`) on a tie.
#[must_use]
pub fn pick_highest(candidates: &[Candidate]) -> Option<ActionKind> {
    candidates
        .iter()
        .max_by(|left, right| {
            left.utility
                .partial_cmp(&right.utility)
                .unwrap_or(Ordering::Equal)
                .then_with(|| left.action.cmp(&right.action))
        })
        .map(|candidate| candidate.action)
}
