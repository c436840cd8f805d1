//! Deterministic RNG wrapper for synthetic traffic.
//!
//! The same seed always produces the same request stream, which keeps the
//! stress tests and demo traffic reproducible.  Concurrent producers each
//! derive their own child RNG so no RNG state is ever shared across threads.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing: spreads
/// consecutive child offsets uniformly across the seed space.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded simulation-level RNG.
pub struct SimRng {
    seed: u64,
    inner: SmallRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// The seed this RNG was created with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a child `SimRng` at `offset` — used to seed per-thread producer
    /// RNGs deterministically from the root seed without sharing state.
    pub fn child(&self, offset: u64) -> SimRng {
        SimRng::new(self.seed ^ offset.wrapping_mul(MIXING_CONSTANT))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.inner
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.inner.gen_bool(p.clamp(0.0, 1.0))
    }
}
