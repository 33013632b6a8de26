//! Session file loading and layering.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use market_warfare_core::{Difficulty, SessionConfig};
use serde::Deserialize;

/// Optional overrides read from a TOML session file.
///
/// Every key may be omitted; absent keys keep the value from the layer below.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    rounds: Option<u32>,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
    auto: Option<bool>,
    starting_cash: Option<i64>,
}

impl FileConfig {
    /// Reads and parses the session file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse session file {}", path.display()))
    }

    /// Parses session file contents.
    pub(crate) fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Overlays the file's values onto `base`.
    #[must_use]
    pub(crate) fn layer_onto(self, base: SessionConfig) -> SessionConfig {
        SessionConfig {
            rounds: self.rounds.unwrap_or(base.rounds),
            difficulty: self.difficulty.unwrap_or(base.difficulty),
            seed: self.seed.or(base.seed),
            auto_play: self.auto.unwrap_or(base.auto_play),
            starting_cash: self.starting_cash.unwrap_or(base.starting_cash),
        }
    }
}
