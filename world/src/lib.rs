#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Market Warfare.

pub mod failure;
pub mod resolution;

use market_warfare_core::{
    Command, Difficulty, DifficultyProfile, Event, Ledger, RoundRejection, SessionConfig,
    SessionOutcome, SessionPhase,
};
use tracing::{debug, info};

/// Represents the authoritative Market Warfare session state.
#[derive(Debug)]
pub struct World {
    profile: DifficultyProfile,
    rounds: u32,
    round: u32,
    ledger: Ledger,
    phase: SessionPhase,
}

impl World {
    /// Creates a new session positioned at round one.
    #[must_use]
    pub fn new(difficulty: Difficulty, rounds: u32, starting_cash: i64) -> Self {
        Self {
            profile: difficulty.profile(),
            rounds,
            round: 1,
            ledger: Ledger::opening(starting_cash),
            phase: SessionPhase::Running,
        }
    }

    /// Creates a new session from the supplied configuration.
    ///
    /// Seed and auto-play settings belong to the systems driving the world and
    /// are ignored here.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.difficulty, config.rounds, config.starting_cash)
    }

    fn rounds_played(&self) -> u32 {
        match self.phase {
            SessionPhase::FailedInsolvent => self.round,
            SessionPhase::Running | SessionPhase::Completed => self.round.saturating_sub(1),
        }
    }

    fn outcome(&self) -> SessionOutcome {
        SessionOutcome {
            phase: self.phase,
            rounds_played: self.rounds_played(),
            ledger: self.ledger,
            success: self.phase == SessionPhase::Completed && self.ledger.is_victorious(),
        }
    }

    fn conclude(&mut self, phase: SessionPhase, out_events: &mut Vec<Event>) {
        self.phase = phase;
        let outcome = self.outcome();
        info!(
            phase = ?outcome.phase,
            rounds_played = outcome.rounds_played,
            cash = outcome.ledger.cash,
            score = outcome.ledger.score,
            success = outcome.success,
            "session concluded"
        );
        out_events.push(Event::SessionConcluded { outcome });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ResolveRound { action, pressure } => {
            if world.phase.is_terminal() {
                out_events.push(Event::RoundRejected {
                    action,
                    reason: RoundRejection::SessionConcluded,
                });
                return;
            }

            let round = world.round;
            let risk_cap = world.profile.risk_cap;
            let opening = world.ledger;
            let penalties = resolution::resolve(action, pressure, &mut world.ledger, risk_cap);
            debug!(
                round,
                action = action.key(),
                pressure = pressure.get(),
                cash_penalty = penalties.cash,
                reputation_penalty = penalties.reputation,
                efficiency_penalty = penalties.efficiency,
                "round resolved"
            );
            out_events.push(Event::ActionApplied {
                round,
                action,
                pressure,
                opening,
                penalties,
                resolved: world.ledger,
            });

            if let Some(cause) = failure::check(&world.ledger, risk_cap) {
                let sentence = failure::strike(&mut world.ledger, cause);
                info!(round, ?cause, risk = world.ledger.risk, "{sentence}");
                out_events.push(Event::FailureStrike {
                    round,
                    cause,
                    ledger: world.ledger,
                });

                // Second cash check: the strike itself can exhaust a thin runway.
                if world.ledger.cash <= 0 {
                    world.conclude(SessionPhase::FailedInsolvent, out_events);
                    return;
                }
            }

            world.round = round.saturating_add(1);
            if round >= world.rounds {
                world.conclude(SessionPhase::Completed, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use market_warfare_core::{DifficultyProfile, Ledger, SessionOutcome, SessionPhase};

    /// Tuning parameters of the active difficulty.
    #[must_use]
    pub fn profile(world: &World) -> DifficultyProfile {
        world.profile
    }

    /// Current ledger snapshot.
    #[must_use]
    pub fn ledger(world: &World) -> Ledger {
        world.ledger
    }

    /// One-based index of the round awaiting resolution.
    #[must_use]
    pub fn round(world: &World) -> u32 {
        world.round
    }

    /// Number of rounds the session was configured with.
    #[must_use]
    pub fn rounds(world: &World) -> u32 {
        world.rounds
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> SessionPhase {
        world.phase
    }

    /// Terminal verdict, available once the session concluded.
    #[must_use]
    pub fn outcome(world: &World) -> Option<SessionOutcome> {
        world.phase.is_terminal().then(|| world.outcome())
    }
}
