//! Batch runner for simulating many products at once
//!
//! Each product gets its own generator seeded from the batch seed plus its
//! position, so results do not depend on how rayon schedules the work.

use rayon::prelude::*;
use crate::error::SimulationError;
use crate::product::ProductConfiguration;
use crate::simulation::{SimRng, SimulationConfig, SimulationEngine, SimulationResult};

/// One point of a barrier sweep
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SweepPoint {
    pub barrier_percent: f64,
    pub result: SimulationResult,
}

/// Runs simulations in bulk from a single configuration
///
/// # Example
/// ```ignore
/// let runner = SimulationRunner::with_seed(42);
/// let results = runner.run_batch(&products);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationRunner {
    engine: SimulationEngine,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            engine: SimulationEngine::new(config),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SimulationConfig::with_seed(seed))
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Simulate a single product
    pub fn run(&self, product: &ProductConfiguration) -> Result<SimulationResult, SimulationError> {
        self.engine.simulate(product)
    }

    /// Simulate products in parallel, preserving input order
    pub fn run_batch(
        &self,
        products: &[ProductConfiguration],
    ) -> Vec<Result<SimulationResult, SimulationError>> {
        let base_seed = self.engine.config().seed;
        products
            .par_iter()
            .enumerate()
            .map(|(idx, product)| -> Result<SimulationResult, SimulationError> {
                let mut rng = item_rng(base_seed, idx);
                let mut result = self.engine.simulate_with(product, &mut rng)?;
                result.seed = Some(rng.seed());
                Ok(result)
            })
            .collect()
    }

    /// Simulate one product across several barrier depths
    pub fn barrier_sweep(
        &self,
        product: &ProductConfiguration,
        barriers: &[f64],
    ) -> Result<Vec<SweepPoint>, SimulationError> {
        let variants: Vec<ProductConfiguration> = barriers
            .iter()
            .map(|&b| product.with_barrier_percent(b))
            .collect();

        self.run_batch(&variants)
            .into_iter()
            .zip(barriers)
            .map(|(result, &barrier_percent)| -> Result<SweepPoint, SimulationError> {
                Ok(SweepPoint {
                    barrier_percent,
                    result: result?,
                })
            })
            .collect()
    }
}

fn item_rng(base_seed: Option<u64>, idx: usize) -> SimRng {
    match base_seed {
        Some(seed) => SimRng::from_seed(seed.wrapping_add(idx as u64)),
        None => SimRng::from_entropy(),
    }
}
