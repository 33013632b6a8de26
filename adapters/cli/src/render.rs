//! Console transcript rendering.

use std::io::{self, Write};

use market_warfare_core::{
    ActionKind, Difficulty, Ledger, Penalties, RoundReport, SessionOutcome, TAGLINE,
    WELCOME_BANNER,
};
use market_warfare_system_advisor::Hint;

const BANNER_WIDTH: usize = 52;

pub(crate) fn banner(out: &mut impl Write) -> io::Result<()> {
    let rule = "═".repeat(BANNER_WIDTH);
    let inner = BANNER_WIDTH - 2;
    writeln!(out, "╔{rule}╗")?;
    writeln!(out, "║  {WELCOME_BANNER:<inner$}║")?;
    writeln!(out, "║  {TAGLINE:<inner$}║")?;
    writeln!(out, "╚{rule}╝")
}

pub(crate) fn session_line(
    out: &mut impl Write,
    difficulty: Difficulty,
    rounds: u32,
    seed: u64,
) -> io::Result<()> {
    writeln!(
        out,
        "  Difficulty: {difficulty} · Rounds: {rounds} · Seed: {seed}"
    )
}

pub(crate) fn round_header(
    out: &mut impl Write,
    round: u32,
    pressure: u32,
    ledger: &Ledger,
    risk_cap: i64,
) -> io::Result<()> {
    writeln!(out, "\n─ Round {round} · Market pressure: {pressure}")?;
    writeln!(
        out,
        "  Cash:{:>4} | Rep:{:>3} | Eff:{:>3} | Risk:{:>3} / {risk_cap} | Score:{:>3}",
        ledger.cash, ledger.reputation, ledger.efficiency, ledger.risk, ledger.score
    )
}

pub(crate) fn menu(out: &mut impl Write, hint: Hint) -> io::Result<()> {
    writeln!(out, "\n  Choose your move:")?;
    for action in ActionKind::ALL {
        writeln!(out, "   {}. {}", action.key(), action.name())?;
    }
    writeln!(out, "  Hint: {}", hint.message())
}

pub(crate) fn auto_choice(out: &mut impl Write, action: ActionKind) -> io::Result<()> {
    writeln!(out, "  Auto chose: {}. {}", action.key(), action.name())
}

pub(crate) fn round_result(out: &mut impl Write, report: &RoundReport) -> io::Result<()> {
    writeln!(out, "  ▶ {}", report.action.narrative())?;
    penalties(out, &report.penalties)?;

    if let Some(strike) = report.strike {
        writeln!(out, "  ❌ FAILURE AI STRIKE: {}", strike.sentence())?;
        writeln!(out, "    Forced deleverage. New risk: {}", strike.risk_after)?;
        if report.closing.cash <= 0 {
            writeln!(out, "\n  Game Over: Insolvent after strike.")?;
        }
    }
    Ok(())
}

fn penalties(out: &mut impl Write, penalties: &Penalties) -> io::Result<()> {
    writeln!(
        out,
        "    Market penalties  cash:{} rep:{} eff:{}",
        -i64::from(penalties.cash),
        -i64::from(penalties.reputation),
        -i64::from(penalties.efficiency)
    )
}

pub(crate) fn finish(out: &mut impl Write, outcome: &SessionOutcome) -> io::Result<()> {
    let ledger = &outcome.ledger;
    writeln!(out, "\n═ Final State ═")?;
    writeln!(
        out,
        "  Cash:{} | Rep:{} | Eff:{} | Risk:{} | Score:{}",
        ledger.cash, ledger.reputation, ledger.efficiency, ledger.risk, ledger.score
    )?;
    if outcome.success {
        writeln!(
            out,
            "✅ Victory Protocol Achieved — Positive System Score with runway intact."
        )
    } else {
        writeln!(out, "🛑 Simulation Failed — Negative score or runway lost.")
    }
}
