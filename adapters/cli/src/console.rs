//! Console front end that narrates a session and collects actions.

use std::io::{BufRead, Write};

use anyhow::Result;
use market_warfare_core::{ActionKind, RoundReport, SessionConfig, SessionOutcome};
use market_warfare_system_advisor::Advisor;
use market_warfare_system_session::RoundContext;

use crate::{input, render};

/// Couples the transcript writer with the action source.
pub(crate) struct Console<W, R> {
    out: W,
    input: R,
    advisor: Advisor,
    auto_play: bool,
}

impl<W, R> Console<W, R>
where
    W: Write,
    R: BufRead,
{
    pub(crate) fn new(out: W, input: R, auto_play: bool) -> Self {
        Self {
            out,
            input,
            advisor: Advisor::new(),
            auto_play,
        }
    }

    pub(crate) fn opening(&mut self, config: &SessionConfig, seed: u64) -> Result<()> {
        render::banner(&mut self.out)?;
        render::session_line(&mut self.out, config.difficulty, config.rounds, seed)?;
        Ok(())
    }

    /// Shows the round header and returns the action for the round.
    pub(crate) fn choose(&mut self, context: &RoundContext) -> Result<ActionKind> {
        render::round_header(
            &mut self.out,
            context.round,
            context.pressure.get(),
            &context.ledger,
            context.profile.risk_cap,
        )?;

        if self.auto_play {
            let action = self.advisor.choose(&context.ledger, &context.profile);
            render::auto_choice(&mut self.out, action)?;
            return Ok(action);
        }

        render::menu(&mut self.out, context.hint)?;
        input::read_action(&mut self.input, &mut self.out)
    }

    pub(crate) fn round_result(&mut self, report: &RoundReport) -> Result<()> {
        render::round_result(&mut self.out, report)?;
        Ok(())
    }

    pub(crate) fn finish(&mut self, outcome: &SessionOutcome) -> Result<()> {
        render::finish(&mut self.out, outcome)?;
        self.out.flush()?;
        Ok(())
    }
}
