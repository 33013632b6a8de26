//! Machine-readable session report.

use market_warfare_core::{Difficulty, RoundReport, SessionConfig, SessionOutcome};
use serde::Serialize;

/// Full record of a finished session, printed with `--json`.
#[derive(Debug, Serialize)]
pub(crate) struct SessionReport {
    seed: u64,
    difficulty: Difficulty,
    configured_rounds: u32,
    starting_cash: i64,
    auto_play: bool,
    rounds: Vec<RoundReport>,
    outcome: SessionOutcome,
}

impl SessionReport {
    pub(crate) fn new(
        config: &SessionConfig,
        seed: u64,
        rounds: Vec<RoundReport>,
        outcome: SessionOutcome,
    ) -> Self {
        Self {
            seed,
            difficulty: config.difficulty,
            configured_rounds: config.rounds,
            starting_cash: config.starting_cash,
            auto_play: config.auto_play,
            rounds,
            outcome,
        }
    }

    pub(crate) fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_warfare_core::{Ledger, SessionPhase};

    #[test]
    fn report_exposes_verdict_and_seed() {
        let config = SessionConfig {
            difficulty: Difficulty::Hard,
            ..SessionConfig::default()
        };
        let outcome = SessionOutcome {
            phase: SessionPhase::FailedInsolvent,
            rounds_played: 0,
            ledger: Ledger::opening(-1),
            success: false,
        };

        let json = SessionReport::new(&config, 42, Vec::new(), outcome)
            .to_json()
            .expect("report serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["seed"], 42);
        assert_eq!(value["difficulty"], "hard");
        assert_eq!(value["outcome"]["success"], false);
        assert_eq!(value["outcome"]["phase"], "FailedInsolvent");
        assert_eq!(value["rounds"].as_array().map(Vec::len), Some(0));
    }
}
