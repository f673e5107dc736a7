//! Local random implementations.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sheetroll_domain::DrawRange;

use crate::infrastructure::ports::LocalRandomPort;

/// Thread-local random - uses real randomness.
pub struct ThreadRandom;

impl ThreadRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRandomPort for ThreadRandom {
    fn generate(&self, range: DrawRange, count: u32) -> Vec<i64> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| rng.gen_range(range.min()..=range.max()))
            .collect()
    }
}

/// Seeded random - the same seed replays the same sequence.
///
/// Used as the fallback when `RANDOM_SEED` is set, so a session can be
/// reproduced while the remote service is down.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl LocalRandomPort for SeededRandom {
    fn generate(&self, range: DrawRange, count: u32) -> Vec<i64> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..count)
            .map(|_| rng.gen_range(range.min()..=range.max()))
            .collect()
    }
}

/// Fixed random for testing - every value is the same, clamped into range.
#[cfg(test)]
pub struct FixedRandom(pub i64);

#[cfg(test)]
impl LocalRandomPort for FixedRandom {
    fn generate(&self, range: DrawRange, count: u32) -> Vec<i64> {
        let value = self.0.clamp(range.min(), range.max());
        vec![value; count as usize]
    }
}
