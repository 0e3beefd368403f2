//! Injected random-number source.
//!
//! The allocator only ever needs one primitive: a uniform integer from an
//! inclusive range. Abstracting that behind a trait keeps the allocator a pure
//! function of its inputs, so tests can script the draws and reproductions can
//! seed them.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random integers for quantity step counts.
pub trait QuantityRng {
    /// Uniform draw from the inclusive range `[min, max]`.
    ///
    /// Callers guarantee `min <= max`.
    fn pick_in_range(&mut self, min: u64, max: u64) -> u64;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl ThreadRngSource {
    pub fn new() -> Self {
        Self
    }
}

impl QuantityRng for ThreadRngSource {
    fn pick_in_range(&mut self, min: u64, max: u64) -> u64 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Seeded source for reproducible allocations.
///
/// The same seed over the same inputs always yields the same configuration.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: StdRng,
}

impl SeededRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl QuantityRng for SeededRng {
    fn pick_in_range(&mut self, min: u64, max: u64) -> u64 {
        self.rng.gen_range(min..=max)
    }
}

/// Test double that replays scripted draws.
///
/// Each scripted value is clamped into the requested range; once the script is
/// exhausted every draw returns the range minimum.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    draws: VecDeque<u64>,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = u64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// A script with no draws: every pick returns the range minimum.
    pub fn always_min() -> Self {
        Self::default()
    }
}

impl QuantityRng for ScriptedRng {
    fn pick_in_range(&mut self, min: u64, max: u64) -> u64 {
        match self.draws.pop_front() {
            Some(v) => v.clamp(min, max),
            None => min,
        }
    }
}
