#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round loop that drives a Market Warfare session to its verdict.
//!
//! Each round the session draws a shock from its pressure source, asks a
//! chooser for an action, submits the pair to the world and folds the
//! resulting events into a [`RoundReport`]. The chooser is either the
//! heuristic advisor or an adapter-supplied closure that collects input.

use std::convert::Infallible;

use market_warfare_core::{
    ActionKind, Command, DifficultyProfile, Event, Ledger, Pressure, RoundReport, SessionConfig,
    SessionOutcome, StrikeReport,
};
use market_warfare_system_advisor::{Advisor, Hint};
use market_warfare_system_pressure::{PressureGenerator, PressureSource};
use market_warfare_world::{self as world, query, World};
use tracing::debug;

/// Snapshot handed to the chooser before an action is picked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundContext {
    /// One-based round number.
    pub round: u32,
    /// Total rounds configured for the session.
    pub rounds: u32,
    /// Shock the chosen action will be resolved against.
    pub pressure: Pressure,
    /// Ledger before the action is applied.
    pub ledger: Ledger,
    /// Tuning of the active difficulty.
    pub profile: DifficultyProfile,
    /// Coaching hint for the current ledger.
    pub hint: Hint,
}

/// Session controller owning the world and its pressure source.
#[derive(Debug)]
pub struct Session<P> {
    world: World,
    pressure: P,
    advisor: Advisor,
}

impl Session<PressureGenerator> {
    /// Creates a session whose shocks are drawn from a generator seeded with `seed`.
    ///
    /// The seed carried by `config` is ignored; callers resolve it first so an
    /// absent seed can be drawn and reported.
    #[must_use]
    pub fn seeded(config: &SessionConfig, seed: u64) -> Self {
        let generator = PressureGenerator::seeded(&config.difficulty.profile(), seed);
        Self::new(World::from_config(config), generator)
    }
}

impl<P> Session<P>
where
    P: PressureSource,
{
    /// Creates a session around an existing world and pressure source.
    #[must_use]
    pub fn new(world: World, pressure: P) -> Self {
        Self {
            world,
            pressure,
            advisor: Advisor::new(),
        }
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Terminal verdict, available once the session concluded.
    #[must_use]
    pub fn outcome(&self) -> Option<SessionOutcome> {
        query::outcome(&self.world)
    }

    /// Plays one round with the action returned by `choose`.
    ///
    /// Returns `Ok(None)` without drawing a shock once the session concluded.
    /// Errors raised by `choose` abort the round before the world is touched.
    pub fn play_round_with<F, E>(&mut self, choose: F) -> Result<Option<RoundReport>, E>
    where
        F: FnOnce(&RoundContext) -> Result<ActionKind, E>,
    {
        if query::phase(&self.world).is_terminal() {
            return Ok(None);
        }

        let pressure = self.pressure.next_pressure();
        let ledger = query::ledger(&self.world);
        let profile = query::profile(&self.world);
        let context = RoundContext {
            round: query::round(&self.world),
            rounds: query::rounds(&self.world),
            pressure,
            ledger,
            profile,
            hint: self.advisor.hint(&ledger, &profile),
        };

        let action = choose(&context)?;
        debug!(
            round = context.round,
            pressure = pressure.get(),
            action = action.key(),
            "action chosen"
        );

        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::ResolveRound { action, pressure },
            &mut events,
        );
        Ok(report_from_events(&events))
    }

    /// Plays one round with the heuristic advisor choosing the action.
    pub fn play_auto_round(&mut self) -> Option<RoundReport> {
        let advisor = self.advisor;
        let played = self.play_round_with(|context| {
            Ok::<_, Infallible>(advisor.choose(&context.ledger, &context.profile))
        });
        match played {
            Ok(report) => report,
            Err(never) => match never {},
        }
    }

    /// Plays rounds until the session concludes, reporting each to `observe`.
    pub fn run_with<F, O, E>(&mut self, mut choose: F, mut observe: O) -> Result<SessionOutcome, E>
    where
        F: FnMut(&RoundContext) -> Result<ActionKind, E>,
        O: FnMut(&RoundReport),
    {
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }
            if let Some(report) = self.play_round_with(&mut choose)? {
                observe(&report);
            }
        }
    }

    /// Lets the heuristic advisor play every remaining round.
    pub fn run_auto<O>(&mut self, observe: O) -> SessionOutcome
    where
        O: FnMut(&RoundReport),
    {
        let advisor = self.advisor;
        let played = self.run_with(
            |context| Ok::<_, Infallible>(advisor.choose(&context.ledger, &context.profile)),
            observe,
        );
        match played {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }
}

/// Folds the events produced by a single resolved round into a report.
///
/// Returns `None` when the round was rejected.
#[must_use]
pub fn report_from_events(events: &[Event]) -> Option<RoundReport> {
    let mut report: Option<RoundReport> = None;
    for event in events {
        match event {
            Event::ActionApplied {
                round,
                action,
                pressure,
                opening,
                penalties,
                resolved,
            } => {
                report = Some(RoundReport {
                    round: *round,
                    pressure: *pressure,
                    opening: *opening,
                    action: *action,
                    penalties: *penalties,
                    strike: None,
                    closing: *resolved,
                });
            }
            Event::FailureStrike { cause, ledger, .. } => {
                if let Some(report) = report.as_mut() {
                    report.strike = Some(StrikeReport {
                        cause: *cause,
                        risk_after: ledger.risk,
                    });
                    report.closing = *ledger;
                }
            }
            Event::SessionConcluded { .. } | Event::RoundRejected { .. } => {}
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_warfare_core::{Difficulty, FailureCause, Penalties, SessionPhase};
    use market_warfare_system_pressure::FixedPressure;

    fn calm_session(rounds: u32) -> Session<FixedPressure> {
        Session::new(
            World::new(Difficulty::Normal, rounds, 35),
            FixedPressure(Pressure::ZERO),
        )
    }

    #[test]
    fn chooser_sees_round_context() {
        let mut session = calm_session(4);
        let mut seen = None;

        let report = session
            .play_round_with(|context| {
                seen = Some(*context);
                Ok::<_, Infallible>(ActionKind::HoldPosition)
            })
            .expect("infallible")
            .expect("round played");

        let context = seen.expect("chooser invoked");
        assert_eq!(context.round, 1);
        assert_eq!(context.rounds, 4);
        assert_eq!(context.ledger, Ledger::opening(35));
        assert_eq!(context.hint, Hint::Balanced);
        assert_eq!(report.opening, context.ledger);
        assert_eq!(report.penalties, Penalties::default());
    }

    #[test]
    fn chooser_error_leaves_world_untouched() {
        let mut session = calm_session(4);

        let result = session.play_round_with(|_| Err("input closed"));

        assert_eq!(result, Err("input closed"));
        assert_eq!(query::round(session.world()), 1);
        assert_eq!(query::ledger(session.world()), Ledger::opening(35));
    }

    #[test]
    fn concluded_session_plays_no_more_rounds() {
        let mut session = calm_session(1);
        assert!(session.play_auto_round().is_some());
        assert!(session.play_auto_round().is_none());
        assert_eq!(
            session.outcome().map(|outcome| outcome.phase),
            Some(SessionPhase::Completed)
        );
    }

    #[test]
    fn strike_details_are_folded_into_report() {
        let events = vec![
            Event::ActionApplied {
                round: 2,
                action: ActionKind::ExpandMarket,
                pressure: Pressure::new(4),
                opening: Ledger::opening(20),
                penalties: Penalties {
                    cash: 4,
                    reputation: 1,
                    efficiency: 0,
                },
                resolved: Ledger {
                    risk: 18,
                    ..Ledger::opening(6)
                },
            },
            Event::FailureStrike {
                round: 2,
                cause: FailureCause::Risk,
                ledger: Ledger {
                    risk: 14,
                    ..Ledger::opening(3)
                },
            },
        ];

        let report = report_from_events(&events).expect("report");
        assert_eq!(
            report.strike,
            Some(StrikeReport {
                cause: FailureCause::Risk,
                risk_after: 14,
            })
        );
        assert_eq!(report.closing.cash, 3);
        assert_eq!(report.round, 2);
    }

    #[test]
    fn rejected_round_yields_no_report() {
        let events = vec![Event::RoundRejected {
            action: ActionKind::HoldPosition,
            reason: market_warfare_core::RoundRejection::SessionConcluded,
        }];
        assert_eq!(report_from_events(&events), None);
    }
}
