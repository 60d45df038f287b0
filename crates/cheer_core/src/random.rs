//! Source of randomness for recipient and sound selection

use rand::Rng;

/// Uniform integer draws
pub trait RandomSource: Send + Sync {
    /// Draw uniformly from `[0, upper)`; `upper` must be positive
    fn below(&self, upper: u64) -> u64;
}

/// Thread-local `rand` generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}
