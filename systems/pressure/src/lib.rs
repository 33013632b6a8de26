#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic market pressure generation.
//!
//! Each round the market throws a single non-negative integer shock at the
//! player. Shocks are drawn from a normal distribution centred on the
//! difficulty's mean, truncated toward zero and clamped at zero. The generator
//! owns its seeded RNG so identical seeds replay identical shock sequences.

use std::collections::VecDeque;

use market_warfare_core::{DifficultyProfile, Pressure, PRESSURE_DEVIATION};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use tracing::trace;

/// Anything that can supply one market shock per round.
pub trait PressureSource {
    /// Produces the shock for the next round.
    fn next_pressure(&mut self) -> Pressure;
}

/// Shape of the shock distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressureTuning {
    /// Centre of the normal distribution; raising it makes every round harsher.
    pub mean: f64,
    /// Spread of the normal distribution before truncation and clamping.
    pub deviation: f64,
}

impl PressureTuning {
    /// Derives the tuning from a difficulty profile.
    #[must_use]
    pub fn from_profile(profile: &DifficultyProfile) -> Self {
        Self {
            mean: profile.pressure_mean,
            deviation: PRESSURE_DEVIATION,
        }
    }
}

/// Seeded generator of normally distributed market shocks.
#[derive(Clone, Debug)]
pub struct PressureGenerator {
    tuning: PressureTuning,
    rng: ChaCha8Rng,
}

impl PressureGenerator {
    /// Creates a generator for `profile` whose draws are fully determined by `seed`.
    #[must_use]
    pub fn seeded(profile: &DifficultyProfile, seed: u64) -> Self {
        Self::with_tuning(PressureTuning::from_profile(profile), seed)
    }

    /// Creates a generator with explicit tuning.
    #[must_use]
    pub fn with_tuning(tuning: PressureTuning, seed: u64) -> Self {
        Self {
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draws the next shock.
    pub fn sample(&mut self) -> Pressure {
        let standard: f64 = self.rng.sample(StandardNormal);
        let draw = self.tuning.mean + self.tuning.deviation * standard;
        let pressure = clamp_shock(draw);
        trace!(draw, pressure = pressure.get(), "market pressure sampled");
        pressure
    }
}

impl PressureSource for PressureGenerator {
    fn next_pressure(&mut self) -> Pressure {
        self.sample()
    }
}

/// Truncates a raw draw toward zero and clamps it at zero.
///
/// There is no upper bound beyond the range of `u32`.
#[must_use]
pub fn clamp_shock(draw: f64) -> Pressure {
    Pressure::new(draw.trunc().max(0.0) as u32)
}

/// Source that returns the same shock every round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedPressure(pub Pressure);

impl PressureSource for FixedPressure {
    fn next_pressure(&mut self) -> Pressure {
        self.0
    }
}

/// Source that replays a script of shocks and then falls calm.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedPressure {
    script: VecDeque<Pressure>,
}

impl ScriptedPressure {
    /// Creates a source that yields `shocks` in order, then zero forever.
    #[must_use]
    pub fn new<I>(shocks: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        Self {
            script: shocks.into_iter().map(Pressure::new).collect(),
        }
    }

    /// Number of scripted shocks not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PressureSource for ScriptedPressure {
    fn next_pressure(&mut self) -> Pressure {
        self.script.pop_front().unwrap_or(Pressure::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_warfare_core::Difficulty;

    fn draws(generator: &mut PressureGenerator, count: usize) -> Vec<Pressure> {
        (0..count).map(|_| generator.sample()).collect()
    }

    #[test]
    fn identical_seeds_replay_identical_shocks() {
        let profile = Difficulty::Normal.profile();
        let mut first = PressureGenerator::seeded(&profile, 42);
        let mut second = PressureGenerator::seeded(&profile, 42);

        assert_eq!(draws(&mut first, 64), draws(&mut second, 64));
    }

    #[test]
    fn different_seeds_diverge() {
        let profile = Difficulty::Normal.profile();
        let mut first = PressureGenerator::seeded(&profile, 1);
        let mut second = PressureGenerator::seeded(&profile, 2);

        assert_ne!(draws(&mut first, 64), draws(&mut second, 64));
    }

    #[test]
    fn clamp_truncates_toward_zero() {
        assert_eq!(clamp_shock(-7.9), Pressure::ZERO);
        assert_eq!(clamp_shock(-0.4), Pressure::ZERO);
        assert_eq!(clamp_shock(0.99), Pressure::ZERO);
        assert_eq!(clamp_shock(5.999), Pressure::new(5));
        assert_eq!(clamp_shock(41.2), Pressure::new(41));
    }

    #[test]
    fn harder_profiles_push_harder() {
        let mut easy = PressureGenerator::seeded(&Difficulty::Easy.profile(), 7);
        let mut hard = PressureGenerator::seeded(&Difficulty::Hard.profile(), 7);

        let easy_total: u64 = draws(&mut easy, 2_000)
            .iter()
            .map(|pressure| u64::from(pressure.get()))
            .sum();
        let hard_total: u64 = draws(&mut hard, 2_000)
            .iter()
            .map(|pressure| u64::from(pressure.get()))
            .sum();
        assert!(hard_total > easy_total);
    }

    #[test]
    fn sample_mean_tracks_profile() {
        let mut generator = PressureGenerator::seeded(&Difficulty::Normal.profile(), 99);
        let samples = draws(&mut generator, 10_000);
        let mean = samples
            .iter()
            .map(|pressure| pressure.as_f64())
            .sum::<f64>()
            / samples.len() as f64;

        // Truncation shaves roughly half a point off the distribution mean of 6.
        assert!((4.5..6.5).contains(&mean), "mean {mean} out of range");
    }

    #[test]
    fn scripted_source_falls_calm_after_script() {
        let mut source = ScriptedPressure::new([4, 9]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_pressure(), Pressure::new(4));
        assert_eq!(source.next_pressure(), Pressure::new(9));
        assert_eq!(source.next_pressure(), Pressure::ZERO);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn fixed_source_repeats() {
        let mut source = FixedPressure(Pressure::new(3));
        assert_eq!(source.next_pressure(), Pressure::new(3));
        assert_eq!(source.next_pressure(), Pressure::new(3));
    }
}
