//! Reduction of regime outcomes into summary statistics

use serde::{Deserialize, Serialize};
use super::scenarios::{MarketRegime, ScenarioOutcome};

/// Summary over the four regime outcomes of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Regime outcomes in canonical order
    pub scenarios: Vec<ScenarioOutcome>,

    /// Probability-weighted mean final value
    pub expected_return: f64,

    /// Best final value across regimes
    pub max_gain: f64,

    /// Worst final value across regimes
    pub max_loss: f64,

    /// Probability of getting at least the invested capital back
    pub break_even_probability: f64,

    /// Seed of the generator that produced the early-exit draws, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimulationResult {
    /// Aggregate outcomes against the invested capital
    pub fn from_outcomes(outcomes: Vec<ScenarioOutcome>, initial_capital: f64) -> Self {
        let expected_return: f64 = outcomes
            .iter()
            .map(|o| o.final_value * o.probability)
            .sum();

        let max_gain = outcomes
            .iter()
            .map(|o| o.final_value)
            .fold(f64::NEG_INFINITY, f64::max);

        let max_loss = outcomes
            .iter()
            .map(|o| o.final_value)
            .fold(f64::INFINITY, f64::min);

        let break_even_probability: f64 = outcomes
            .iter()
            .filter(|o| o.is_break_even(initial_capital))
            .map(|o| o.probability)
            .sum();

        Self {
            scenarios: outcomes,
            expected_return,
            max_gain,
            max_loss,
            break_even_probability,
            seed: None,
        }
    }

    /// Outcome for a given regime
    pub fn scenario(&self, regime: MarketRegime) -> Option<&ScenarioOutcome> {
        self.scenarios.iter().find(|o| o.regime == regime)
    }

    /// Total probability mass across the regimes
    pub fn total_probability(&self) -> f64 {
        self.scenarios.iter().map(|o| o.probability).sum()
    }
}
