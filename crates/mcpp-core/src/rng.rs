//! Deterministic PRNG wrapper shared by every planning operation that needs
//! randomness (seed allocation, DARP jitter).
//!
//! # Determinism strategy
//!
//! A single `PlannerRng` is threaded through a planning session. It wraps
//! `SmallRng` for speed and is always constructed from an explicit seed —
//! the reference seed is `42069`, matching the fixed-seed contract every
//! run must honor to keep label matrices and trajectories bit-identical
//! across repeated runs with the same configuration.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The reference PRNG seed. Used by `Default` and by any caller that wants
/// the documented, reproducible behavior rather than a caller-chosen seed.
pub const REFERENCE_SEED: u64 = 42069;

/// Deterministic, single-threaded RNG for planner-level operations.
///
/// Not `Sync`; a planning session owns exactly one and threads it through
/// partitioner, balance driver, and DARP calls that need randomness.
pub struct PlannerRng(SmallRng);

impl PlannerRng {
    /// Seed from an explicit value.
    pub fn new(seed: u64) -> Self {
        PlannerRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// A jitter multiplier uniformly distributed in `[1 - level, 1 + level]`,
    /// used by DARP's cost-matrix random perturbation.
    #[inline]
    pub fn jitter(&mut self, level: f64) -> f64 {
        self.0.gen_range((1.0 - level)..=(1.0 + level))
    }

    /// Choose a random element from a non-empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}

impl Default for PlannerRng {
    /// Seeds from [`REFERENCE_SEED`] so determinism holds out of the box.
    fn default() -> Self {
        Self::new(REFERENCE_SEED)
    }
}
