//! Injectable randomness for the early-exit draws and the synthetic index walk
//!
//! Every random value the engine consumes comes through [`RandomSource`], so a
//! caller can pin outcomes with a fixed seed or a scripted sequence.

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use crate::error::SimulationError;

/// Source of uniform draws in `[0, 1)`
///
/// Every `rand` generator is a source, as is a `&mut` borrow of one.
pub trait RandomSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_uniform(&mut self) -> f64 {
        Standard.sample(self)
    }
}

/// Seeded generator used by default
///
/// Remembers its seed so a run can be reported and replayed.
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: StdRng,
    seed: u64,
}

impl SimRng {
    /// Same seed, same sequence
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Fresh random seed
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::thread_rng().gen())
    }

    /// Seeded from the optional override, otherwise fresh
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::from_seed(s),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

/// Replays a fixed list of draws, cycling when exhausted
///
/// Used to force specific early-exit and index outcomes.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    pos: usize,
}

impl ScriptedDraws {
    /// Fails on an empty list, which has nothing to replay
    pub fn new(draws: Vec<f64>) -> Result<Self, SimulationError> {
        if draws.is_empty() {
            return Err(SimulationError::invalid("draws", "must not be empty"));
        }
        Ok(Self { draws, pos: 0 })
    }

    /// A source that always returns the same value
    pub fn constant(value: f64) -> Self {
        Self {
            draws: vec![value],
            pos: 0,
        }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedDraws {
    fn next_uniform(&mut self) -> f64 {
        let value = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        value
    }
}

impl RandomSource for &mut ScriptedDraws {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}
