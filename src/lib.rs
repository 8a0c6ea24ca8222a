//! Autocall Simulator - payoff engine for autocallable, barrier-protected notes
//!
//! This library provides:
//! - Product term validation
//! - Four-regime payoff simulation (bullish, neutral, bearish, crash)
//! - Aggregate statistics (expected return, max gain/loss, break-even probability)
//! - Synthetic yearly price paths for charting
//! - Risk tiering and a comparison set for multiple products
//!
//! All random draws go through an injectable [`simulation::RandomSource`], so
//! results are reproducible under a fixed seed.

pub mod error;
pub mod product;
pub mod simulation;
pub mod path;
pub mod comparison;
pub mod runner;

// Re-export commonly used types
pub use error::SimulationError;
pub use product::{ProductConfiguration, Underlying, ProtectionType, ObservationFrequency, validate};
pub use simulation::{
    simulate, MarketRegime, RandomSource, ScenarioOutcome, SimRng, SimulationConfig,
    SimulationEngine, SimulationResult,
};
pub use path::{generate_price_path, PricePathGenerator, PricePathPoint};
pub use comparison::{classify_risk, ComparisonEntry, ComparisonSet, RiskClassification, RiskLevel};
pub use runner::SimulationRunner;
