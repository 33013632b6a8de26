use std::convert::Infallible;

use market_warfare_core::{ActionKind, Difficulty, FailureCause, Pressure, SessionPhase};
use market_warfare_system_pressure::{FixedPressure, ScriptedPressure};
use market_warfare_system_session::Session;
use market_warfare_world::{query, World};

#[test]
fn thin_runway_goes_insolvent_on_first_shock() {
    for difficulty in Difficulty::ALL {
        let world = World::new(difficulty, 12, 2);
        // A shock of 10 costs at least 9 cash even under the widest risk cap.
        let mut session = Session::new(world, ScriptedPressure::new([10]));

        let report = session
            .play_round_with(|_| Ok::<_, Infallible>(ActionKind::HoldPosition))
            .expect("infallible")
            .expect("round played");

        assert!(report.penalties.cash > 2);
        let strike = report.strike.expect("strike applied");
        assert_eq!(strike.cause, FailureCause::Cash);
        assert!(report.closing.cash <= 0);

        let outcome = session.outcome().expect("session concluded");
        assert_eq!(outcome.phase, SessionPhase::FailedInsolvent);
        assert_eq!(outcome.rounds_played, 1);
        assert!(!outcome.success);
        assert_eq!(query::round(session.world()), 1);
    }
}

#[test]
fn twelve_calm_holds_win() {
    let world = World::new(Difficulty::Normal, 12, 35);
    let mut session = Session::new(world, FixedPressure(Pressure::ZERO));
    let mut played = 0;

    let outcome = session
        .run_with(
            |_| Ok::<_, Infallible>(ActionKind::HoldPosition),
            |report| {
                played += 1;
                assert_eq!(report.penalties.cash, 0);
                assert_eq!(report.penalties.reputation, 0);
                assert_eq!(report.penalties.efficiency, 0);
                assert!(report.strike.is_none());
            },
        )
        .expect("infallible");

    assert_eq!(played, 12);
    assert_eq!(outcome.phase, SessionPhase::Completed);
    assert_eq!(outcome.rounds_played, 12);
    assert_eq!(outcome.ledger.score, 12);
    assert_eq!(outcome.ledger.cash, 35);
    assert_eq!(outcome.ledger.efficiency, 22);
    assert!(outcome.success);
}

#[test]
fn risk_strikes_continue_until_runway_runs_out() {
    let world = World::new(Difficulty::Hard, 3, 35);
    let mut session = Session::new(world, FixedPressure(Pressure::ZERO));
    let mut strikes = Vec::new();

    let outcome = session
        .run_with(
            |_| Ok::<_, Infallible>(ActionKind::ExpandMarket),
            |report| strikes.push(report.strike.map(|strike| strike.cause)),
        )
        .expect("infallible");

    // Risk climbs 5 -> 11 -> 17 (strike, 13) -> 19 (strike, cash 2 - 3 < 0).
    assert_eq!(
        strikes,
        vec![None, Some(FailureCause::Risk), Some(FailureCause::Risk)]
    );
    assert_eq!(outcome.phase, SessionPhase::FailedInsolvent);
    assert_eq!(outcome.rounds_played, 3);
}

#[test]
fn negative_score_fails_despite_completing() {
    let world = World::new(Difficulty::Normal, 1, 60);
    let mut session = Session::new(world, FixedPressure(Pressure::new(30)));

    let outcome = session
        .run_with(|_| Ok::<_, Infallible>(ActionKind::HoldPosition), |_| {})
        .expect("infallible");

    assert_eq!(outcome.phase, SessionPhase::Completed);
    assert!(outcome.ledger.cash > 0);
    assert!(outcome.ledger.score < 0);
    assert!(!outcome.success);
}

#[test]
fn auto_player_deleverages_near_risk_cap() {
    let world = World::new(Difficulty::Normal, 12, 35);
    let mut session = Session::new(world, FixedPressure(Pressure::ZERO));
    let mut actions = Vec::new();

    let outcome = session.run_auto(|report| actions.push(report.action));

    // Marketing pushes raise risk by 2 until 13 > 12.6, then the advisor holds.
    assert_eq!(&actions[..4], &[ActionKind::MarketingPush; 4]);
    assert_eq!(actions[4], ActionKind::HoldPosition);
    assert_eq!(outcome.phase, SessionPhase::Completed);
}
