//! Deterministic synthetic vehicle counts.
//!
//! Stands in for the detection pipeline in the harness binary and in tests.
//! Randomness comes from a seeded `ChaCha8Rng` so identical seeds produce
//! identical count streams.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Default seed used when no explicit seed is provided.
pub const DEFAULT_FEED_SEED: u64 = 42;

/// Build-up and decay of a rush-hour peak, one count per report.
pub const RUSH_HOUR_COUNTS: [u32; 9] = [2, 5, 10, 18, 25, 20, 12, 5, 2];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountPattern {
    /// Uniformly random in `0..=max`.
    Uniform { max: u32 },
    /// Replays the listed counts, wrapping around at the end.
    Sequence(Vec<u32>),
}

impl CountPattern {
    pub fn rush_hour() -> Self {
        CountPattern::Sequence(RUSH_HOUR_COUNTS.to_vec())
    }
}

impl Default for CountPattern {
    fn default() -> Self {
        Self::rush_hour()
    }
}

#[derive(Resource, Debug, Clone)]
pub struct VehicleCountFeed {
    rng: ChaCha8Rng,
    pattern: CountPattern,
    step: usize,
}

impl Default for VehicleCountFeed {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_FEED_SEED, CountPattern::default())
    }
}

impl VehicleCountFeed {
    pub fn from_seed_u64(seed: u64, pattern: CountPattern) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            pattern,
            step: 0,
        }
    }

    pub fn pattern(&self) -> &CountPattern {
        &self.pattern
    }

    /// Number of counts produced so far.
    pub fn steps(&self) -> usize {
        self.step
    }

    pub fn next_count(&mut self) -> u32 {
        let count = match &self.pattern {
            CountPattern::Uniform { max } => self.rng.gen_range(0..=*max),
            CountPattern::Sequence(counts) if counts.is_empty() => 0,
            CountPattern::Sequence(counts) => counts[self.step % counts.len()],
        };
        self.step += 1;
        count
    }

    /// The next `n` counts.
    pub fn take(&mut self, n: usize) -> Vec<u32> {
        (0..n).map(|_| self.next_count()).collect()
    }
}
