//! Injectable randomness for forecast jitter.
//!
//! Forecasters never touch a global RNG. They draw from a [`JitterSource`],
//! so a fixed seed reproduces a forecast exactly and production callers get
//! fresh jitter by choosing a fresh seed per call.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed multiplicative jitter.
pub trait JitterSource {
    /// Draw a value uniformly from `[low, high]`.
    fn sample(&mut self, low: f64, high: f64) -> f64;
}

impl<J: JitterSource + ?Sized> JitterSource for &mut J {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        (**self).sample(low, high)
    }
}

/// Always returns the middle of the requested range (1.0 for the default ranges).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Midpoint;

impl JitterSource for Midpoint {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        (low + high) / 2.0
    }
}

/// Jitter drawn from a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        match low.partial_cmp(&high) {
            Some(Ordering::Less) => self.rng.gen_range(low..=high),
            _ => low,
        }
    }
}

/// How a job obtains its jitter.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum JitterSeed {
    /// Same seed on every run: reproducible output.
    Fixed(u64),
    /// New seed per run.
    #[default]
    Fresh,
    /// No jitter at all (every draw is the range midpoint).
    Disabled,
}

impl JitterSeed {
    pub fn source(self) -> Box<dyn JitterSource + Send> {
        match self {
            JitterSeed::Fixed(seed) => Box::new(SeededJitter::from_seed(seed)),
            JitterSeed::Fresh => Box::new(SeededJitter::from_seed(rand::random())),
            JitterSeed::Disabled => Box::new(Midpoint),
        }
    }
}
