//! Simulation entry point: validate, evaluate regimes, aggregate

use log::debug;
use serde::{Deserialize, Serialize};
use crate::error::SimulationError;
use crate::product::{validate, ProductConfiguration};
use super::aggregate::SimulationResult;
use super::rng::{RandomSource, SimRng};
use super::scenarios::ScenarioEngine;

/// Environment variable holding a fixed seed
pub const SEED_ENV_VAR: &str = "AUTOCALL_SEED";

/// Configuration for a simulation run
///
/// The payoff model constants are not part of the configuration; unknown
/// fields are rejected on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Fixed seed for the random draws; fresh entropy per call when None
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Read the seed override from `AUTOCALL_SEED`
    ///
    /// An unparseable value is ignored with a warning.
    pub fn from_env() -> Self {
        let seed = std::env::var(SEED_ENV_VAR).ok().and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    log::warn!("ignoring {}={:?}: not an unsigned integer", SEED_ENV_VAR, raw);
                    None
                }
            }
        });
        Self { seed }
    }

    /// Generator for one call
    pub fn rng(&self) -> SimRng {
        SimRng::from_optional_seed(self.seed)
    }
}

/// Main simulation engine
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    config: SimulationConfig,
    scenarios: ScenarioEngine,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            scenarios: ScenarioEngine::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn scenario_engine(&self) -> &ScenarioEngine {
        &self.scenarios
    }

    /// Simulate with a generator built from the engine config
    pub fn simulate(&self, product: &ProductConfiguration) -> Result<SimulationResult, SimulationError> {
        let mut rng = self.config.rng();
        let mut result = self.simulate_with(product, &mut rng)?;
        result.seed = Some(rng.seed());
        Ok(result)
    }

    /// Simulate with an explicit random source
    pub fn simulate_with<R: RandomSource + ?Sized>(
        &self,
        product: &ProductConfiguration,
        rng: &mut R,
    ) -> Result<SimulationResult, SimulationError> {
        let product = validate(product)?;
        let outcomes = self.scenarios.outcomes(product, rng);
        let result = SimulationResult::from_outcomes(outcomes.to_vec(), product.initial_capital);

        debug!(
            "simulated {} {}y {}% barrier {}: expected {:.2}, break-even {:.2}",
            product.underlying.code(),
            product.duration_years,
            product.annual_coupon_percent,
            product.barrier_percent,
            result.expected_return,
            result.break_even_probability,
        );

        Ok(result)
    }
}

/// Simulate one product with the reference model
pub fn simulate<R: RandomSource + ?Sized>(
    product: &ProductConfiguration,
    rng: &mut R,
) -> Result<SimulationResult, SimulationError> {
    SimulationEngine::default().simulate_with(product, rng)
}
