#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Market Warfare engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing the move chosen for a round, the world executes those commands
//! via its `apply` entry point, and then broadcasts [`Event`] values that
//! systems and adapters fold into reports. The static catalogs (actions,
//! difficulties, failure sentences) are closed enumerations backed by static
//! tables.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Market Warfare Demo — Failure AI Simulation";

/// Tagline printed beneath the banner.
pub const TAGLINE: &str = "“Markets do not negotiate.”";

/// Standard deviation of the per-round pressure shock.
pub const PRESSURE_DEVIATION: f64 = 3.0;

/// Reputation at or below this value triggers a failure strike.
pub const REPUTATION_FLOOR: i64 = -5;

/// Efficiency at or below this value triggers a failure strike.
pub const EFFICIENCY_FLOOR: i64 = -5;

/// Fraction of the risk cap above which advisors treat risk as critical.
pub const RISK_ALERT_RATIO: f64 = 0.7;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Resolves the current round by applying an action against a market shock.
    ResolveRound {
        /// Move selected for the round.
        action: ActionKind,
        /// Market pressure sampled for the round.
        pressure: Pressure,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that an action was applied and the market charged its penalties.
    ActionApplied {
        /// Round in which the action was applied.
        round: u32,
        /// Move that was applied.
        action: ActionKind,
        /// Market pressure the action was resolved against.
        pressure: Pressure,
        /// Ledger before the action was applied.
        opening: Ledger,
        /// Penalties charged by the market.
        penalties: Penalties,
        /// Ledger after effects and penalties, before any strike.
        resolved: Ledger,
    },
    /// Reports that a failure threshold was breached and a strike was applied.
    FailureStrike {
        /// Round in which the strike landed.
        round: u32,
        /// Threshold that triggered the strike.
        cause: FailureCause,
        /// Ledger after the strike.
        ledger: Ledger,
    },
    /// Announces that the session reached a terminal phase.
    SessionConcluded {
        /// Terminal outcome of the session.
        outcome: SessionOutcome,
    },
    /// Reports that a round could not be resolved.
    RoundRejected {
        /// Move that was submitted.
        action: ActionKind,
        /// Specific reason the round was rejected.
        reason: RoundRejection,
    },
}

/// Reasons a round resolution request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundRejection {
    /// The session already reached a terminal phase.
    SessionConcluded,
}

/// Non-negative market shock sampled once per round.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Pressure(u32);

impl Pressure {
    /// Pressure that charges no penalties.
    pub const ZERO: Self = Self(0);

    /// Creates a new pressure wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying shock magnitude.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Shock magnitude as a float for penalty arithmetic.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five numeric state variables tracked by a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ledger {
    /// Liquidity and runway.
    pub cash: i64,
    /// Market trust.
    pub reputation: i64,
    /// Operational capacity.
    pub efficiency: i64,
    /// Cumulative exposure.
    pub risk: i64,
    /// Cumulative success metric.
    pub score: i64,
}

impl Ledger {
    /// Reputation every session opens with.
    pub const OPENING_REPUTATION: i64 = 10;
    /// Efficiency every session opens with.
    pub const OPENING_EFFICIENCY: i64 = 10;
    /// Risk every session opens with.
    pub const OPENING_RISK: i64 = 5;

    /// Creates the opening ledger for a session with the provided starting cash.
    #[must_use]
    pub const fn opening(starting_cash: i64) -> Self {
        Self {
            cash: starting_cash,
            reputation: Self::OPENING_REPUTATION,
            efficiency: Self::OPENING_EFFICIENCY,
            risk: Self::OPENING_RISK,
            score: 0,
        }
    }

    /// Reports whether the ledger satisfies the victory condition.
    #[must_use]
    pub const fn is_victorious(&self) -> bool {
        self.score >= 0 && self.cash > 0
    }
}

/// Nominal deltas an action applies to the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionEffects {
    /// Change applied to cash.
    pub cash: i64,
    /// Change applied to reputation.
    pub reputation: i64,
    /// Change applied to efficiency.
    pub efficiency: i64,
    /// Change applied to risk.
    pub risk: i64,
    /// Change applied to score.
    pub score: i64,
}

impl ActionEffects {
    const fn new(cash: i64, reputation: i64, efficiency: i64, risk: i64, score: i64) -> Self {
        Self {
            cash,
            reputation,
            efficiency,
            risk,
            score,
        }
    }
}

/// Strategic moves available to the player each round.
///
/// Variants are declared in key order, so the derived ordering matches the
/// ordering of their menu keys.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ActionKind {
    /// Key `1`.
    RaisePrices,
    /// Key `2`.
    ExpandMarket,
    /// Key `3`.
    MarketingPush,
    /// Key `4`.
    CutCosts,
    /// Key `5`.
    HoldPosition,
}

struct ActionDefinition {
    key: &'static str,
    name: &'static str,
    effects: ActionEffects,
    narrative: &'static str,
}

static ACTION_CATALOG: [ActionDefinition; 5] = [
    ActionDefinition {
        key: "1",
        name: "Raise Prices",
        effects: ActionEffects::new(9, -3, 1, 3, 3),
        narrative: "You raise prices. Margin improves, but churn risk rises.",
    },
    ActionDefinition {
        key: "2",
        name: "Expand to New Market",
        effects: ActionEffects::new(-10, 3, -1, 6, 5),
        narrative: "You expand geographically. Big upside, big exposure.",
    },
    ActionDefinition {
        key: "3",
        name: "Launch Marketing Push",
        effects: ActionEffects::new(-6, 6, 0, 2, 4),
        narrative: "You push brand spend. Demand grows if runway holds.",
    },
    ActionDefinition {
        key: "4",
        name: "Cut Costs Aggressively",
        effects: ActionEffects::new(7, -4, 5, 1, 2),
        narrative: "You cut deeply. Runway extends, experience suffers.",
    },
    ActionDefinition {
        key: "5",
        name: "Hold Position",
        effects: ActionEffects::new(0, 0, 1, 0, 1),
        narrative: "You hold. Calm mind, small compounding edge.",
    },
];

impl ActionKind {
    /// Every action in catalog order.
    pub const ALL: [ActionKind; 5] = [
        Self::RaisePrices,
        Self::ExpandMarket,
        Self::MarketingPush,
        Self::CutCosts,
        Self::HoldPosition,
    ];

    fn definition(self) -> &'static ActionDefinition {
        &ACTION_CATALOG[self as usize]
    }

    /// Menu key that selects the action.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.definition().key
    }

    /// Display name of the action.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Nominal ledger deltas of the action.
    #[must_use]
    pub fn effects(self) -> ActionEffects {
        self.definition().effects
    }

    /// Narrative line printed when the action is applied.
    #[must_use]
    pub fn narrative(self) -> &'static str {
        self.definition().narrative
    }

    /// Looks up an action by its menu key, ignoring surrounding whitespace.
    pub fn from_key(key: &str) -> Result<Self, UnknownActionKey> {
        let trimmed = key.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.key() == trimmed)
            .ok_or_else(|| UnknownActionKey(trimmed.to_owned()))
    }
}

impl FromStr for ActionKind {
    type Err = UnknownActionKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_key(value)
    }
}

/// Raised when a submitted key does not name a catalog action.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown action key '{0}', expected 1-5")]
pub struct UnknownActionKey(pub String);

/// Named difficulty levels.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Gentle shocks and a generous risk cap.
    Easy,
    /// Baseline tuning.
    #[default]
    Normal,
    /// Heavy shocks and a tight risk cap.
    Hard,
}

/// Pressure and risk parameters attached to a difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Mean of the per-round pressure distribution.
    pub pressure_mean: f64,
    /// Risk at or above which a strike is applied.
    pub risk_cap: i64,
}

impl DifficultyProfile {
    /// Risk level above which advisors steer away from further exposure.
    #[must_use]
    pub fn risk_alert_threshold(&self) -> f64 {
        self.risk_cap as f64 * RISK_ALERT_RATIO
    }
}

impl Difficulty {
    /// Every difficulty in ascending order.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Lowercase name used on the command line and in session files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }

    /// Tuning parameters of the difficulty.
    #[must_use]
    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile {
                pressure_mean: 3.0,
                risk_cap: 22,
            },
            Self::Normal => DifficultyProfile {
                pressure_mean: 6.0,
                risk_cap: 18,
            },
            Self::Hard => DifficultyProfile {
                pressure_mean: 9.0,
                risk_cap: 15,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDifficulty(trimmed.to_owned()))
    }
}

/// Raised when a difficulty name is not one of `easy`, `normal`, `hard`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown difficulty '{0}', expected easy, normal or hard")]
pub struct UnknownDifficulty(pub String);

/// Thresholds whose breach triggers a failure strike, in check priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureCause {
    /// Cash fell to zero or below.
    Cash,
    /// Risk reached the difficulty's cap.
    Risk,
    /// Reputation collapsed.
    Reputation,
    /// Efficiency collapsed.
    Efficiency,
}

impl FailureCause {
    /// Single-sentence feedback shown when the strike lands.
    #[must_use]
    pub const fn sentence(self) -> &'static str {
        match self {
            Self::Cash => "You ran out of cash. Markets do not negotiate.",
            Self::Risk => "Exposure exceeded tolerance. One shock toppled the system.",
            Self::Reputation => "Customers rejected the value. Demand collapsed.",
            Self::Efficiency => "Operations buckled. The machine could not carry the load.",
        }
    }
}

/// Penalty magnitudes charged by the market in a single round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Penalties {
    /// Cash removed by the shock.
    pub cash: u32,
    /// Reputation removed by the shock.
    pub reputation: u32,
    /// Efficiency removed by the shock.
    pub efficiency: u32,
}

/// Lifecycle phases of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Rounds remain to be played.
    #[default]
    Running,
    /// A strike left the ledger without cash.
    FailedInsolvent,
    /// Every configured round was played.
    Completed,
}

impl SessionPhase {
    /// Reports whether the phase is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Terminal verdict of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Terminal phase that was reached.
    pub phase: SessionPhase,
    /// Number of rounds that resolved an action.
    pub rounds_played: u32,
    /// Ledger at the end of the session.
    pub ledger: Ledger,
    /// Whether the session counts as a victory.
    pub success: bool,
}

/// Strike details attached to a round report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrikeReport {
    /// Threshold that triggered the strike.
    pub cause: FailureCause,
    /// Risk after the forced deleverage.
    pub risk_after: i64,
}

impl StrikeReport {
    /// Feedback sentence attached to the cause.
    #[must_use]
    pub const fn sentence(&self) -> &'static str {
        self.cause.sentence()
    }
}

/// Everything an output collaborator needs to narrate a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundReport {
    /// One-based round number.
    pub round: u32,
    /// Market pressure sampled for the round.
    pub pressure: Pressure,
    /// Ledger shown before the action was chosen.
    pub opening: Ledger,
    /// Move applied during the round.
    pub action: ActionKind,
    /// Penalties charged by the market.
    pub penalties: Penalties,
    /// Strike applied after resolution, if any.
    pub strike: Option<StrikeReport>,
    /// Ledger at the end of the round.
    pub closing: Ledger,
}

/// Parameters supplied by the input collaborator when a session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of rounds to play.
    pub rounds: u32,
    /// Difficulty that tunes pressure and the risk cap.
    pub difficulty: Difficulty,
    /// Seed for the pressure generator; drawn at random when absent.
    pub seed: Option<u64>,
    /// Whether the heuristic advisor picks every action.
    pub auto_play: bool,
    /// Cash in the opening ledger.
    pub starting_cash: i64,
}

impl SessionConfig {
    /// Rounds played when none are configured.
    pub const DEFAULT_ROUNDS: u32 = 12;
    /// Starting cash used when none is configured.
    pub const DEFAULT_STARTING_CASH: i64 = 35;
    /// Longest session that can be configured.
    pub const MAX_ROUNDS: u32 = 1_000_000;
    /// Largest starting cash magnitude that can be configured.
    pub const MAX_STARTING_CASH: i64 = 1_000_000_000;

    /// Checks that the configuration describes a playable session.
    ///
    /// The bounds keep every ledger field well inside `i64` for the whole session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.rounds > Self::MAX_ROUNDS {
            return Err(ConfigError::TooManyRounds(self.rounds));
        }
        if self.starting_cash.unsigned_abs() > Self::MAX_STARTING_CASH.unsigned_abs() {
            return Err(ConfigError::StartingCashOutOfRange(self.starting_cash));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rounds: Self::DEFAULT_ROUNDS,
            difficulty: Difficulty::Normal,
            seed: None,
            auto_play: false,
            starting_cash: Self::DEFAULT_STARTING_CASH,
        }
    }
}

/// Errors raised while validating a [`SessionConfig`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured round count was zero.
    #[error("a session needs at least one round")]
    ZeroRounds,
    /// The configured round count exceeded [`SessionConfig::MAX_ROUNDS`].
    #[error("{0} rounds exceeds the limit of {max}", max = SessionConfig::MAX_ROUNDS)]
    TooManyRounds(u32),
    /// The starting cash magnitude exceeded [`SessionConfig::MAX_STARTING_CASH`].
    #[error(
        "starting cash {0} is outside ±{max}",
        max = SessionConfig::MAX_STARTING_CASH
    )]
    StartingCashOutOfRange(i64),
}
