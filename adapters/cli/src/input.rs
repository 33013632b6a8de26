//! Interactive action prompt.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use market_warfare_core::ActionKind;

/// Prompts until a valid action key is entered.
///
/// End of input is an error; there is no way to finish a round without an action.
pub(crate) fn read_action(input: &mut impl BufRead, out: &mut impl Write) -> Result<ActionKind> {
    let mut line = String::new();
    loop {
        write!(out, "  Enter 1-5: ")?;
        out.flush().context("failed to flush prompt")?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .context("failed to read action from input")?;
        if read == 0 {
            bail!("input closed before an action was chosen");
        }

        match ActionKind::from_key(&line) {
            Ok(action) => return Ok(action),
            Err(_) => writeln!(out, "  Invalid. Enter 1-5.")?,
        }
    }
}
