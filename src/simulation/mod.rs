//! Scenario payoff simulation and aggregation

mod aggregate;
mod engine;
mod scenarios;
pub mod rng;

pub use aggregate::SimulationResult;
pub use engine::{simulate, SimulationConfig, SimulationEngine, SEED_ENV_VAR};
pub use rng::{RandomSource, ScriptedDraws, SimRng};
pub use scenarios::{MarketRegime, ScenarioEngine, ScenarioOutcome, ScenarioPolicy};
