//! Four-regime payoff model for one product

use serde::{Deserialize, Serialize};
use crate::product::ProductConfiguration;
use super::rng::RandomSource;

/// Market regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketRegime {
    Bullish,
    Neutral,
    Bearish,
    Crash,
}

impl MarketRegime {
    /// Canonical evaluation order
    pub const ALL: [MarketRegime; 4] = [
        MarketRegime::Bullish,
        MarketRegime::Neutral,
        MarketRegime::Bearish,
        MarketRegime::Crash,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MarketRegime::Bullish => "Bullish market",
            MarketRegime::Neutral => "Neutral market",
            MarketRegime::Bearish => "Bearish market",
            MarketRegime::Crash => "Market crash",
        }
    }
}

/// Fixed constants of the simplified payoff model
///
/// These are literal contractual constants, not calibrated market parameters. Only
/// [`ScenarioPolicy::reference`] can be constructed, so the regime
/// probabilities always sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioPolicy {
    bullish_probability: f64,
    neutral_probability: f64,
    bearish_probability: f64,
    crash_probability: f64,

    /// Share of the full coupon accrued in the neutral regime
    neutral_participation: f64,

    /// Bullish reports an early exit when the draw exceeds this
    bullish_exit_threshold: f64,
    /// Neutral reports an early exit when the draw exceeds this
    neutral_exit_threshold: f64,
    /// Exit year as a fraction of the duration (floored)
    bullish_exit_fraction: f64,
    neutral_exit_fraction: f64,

    /// Minimum fraction of capital returned in the bearish regime
    bearish_floor: f64,
    /// Minimum fraction of capital returned in a crash
    crash_floor: f64,
    /// Barrier depth multiplier for a crash breach
    crash_amplification: f64,
}

impl ScenarioPolicy {
    /// The reference model
    pub const fn reference() -> Self {
        Self {
            bullish_probability: 0.35,
            neutral_probability: 0.40,
            bearish_probability: 0.20,
            crash_probability: 0.05,
            neutral_participation: 0.8,
            bullish_exit_threshold: 0.5,
            neutral_exit_threshold: 0.3,
            bullish_exit_fraction: 0.6,
            neutral_exit_fraction: 0.7,
            bearish_floor: 0.5,
            crash_floor: 0.2,
            crash_amplification: 1.5,
        }
    }

    pub fn probability(&self, regime: MarketRegime) -> f64 {
        match regime {
            MarketRegime::Bullish => self.bullish_probability,
            MarketRegime::Neutral => self.neutral_probability,
            MarketRegime::Bearish => self.bearish_probability,
            MarketRegime::Crash => self.crash_probability,
        }
    }

    /// Bullish capital after `years` of full coupon accrual
    pub fn bullish_value(&self, config: &ProductConfiguration, years: f64) -> f64 {
        config.initial_capital * (1.0 + config.coupon_rate() * years)
    }

    /// Neutral capital after `years` of partial coupon accrual
    pub fn neutral_value(&self, config: &ProductConfiguration, years: f64) -> f64 {
        config.initial_capital * (1.0 + config.coupon_rate() * years * self.neutral_participation)
    }

    /// Bearish redemption value at maturity
    pub fn bearish_value(&self, config: &ProductConfiguration) -> f64 {
        if config.protection_type.is_guaranteed() {
            return config.initial_capital;
        }
        config.initial_capital * self.bearish_floor.max(1.0 - config.barrier_depth())
    }

    /// Crash redemption value at maturity
    pub fn crash_value(&self, config: &ProductConfiguration) -> f64 {
        if config.protection_type.is_guaranteed() {
            return config.initial_capital;
        }
        let breached = 1.0 - self.crash_amplification * config.barrier_depth();
        config.initial_capital * self.crash_floor.max(breached)
    }
}

impl Default for ScenarioPolicy {
    fn default() -> Self {
        Self::reference()
    }
}

/// One regime's result for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub regime: MarketRegime,
    pub final_value: f64,
    pub probability: f64,
    /// Autocall redemption year, when the regime reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_exit_year: Option<u32>,
}

impl ScenarioOutcome {
    /// Gain or loss relative to the invested capital, in percent
    pub fn return_percent(&self, initial_capital: f64) -> f64 {
        (self.final_value - initial_capital) / initial_capital * 100.0
    }

    pub fn is_break_even(&self, initial_capital: f64) -> bool {
        self.final_value >= initial_capital
    }
}

/// Computes the four regime outcomes for a validated product
#[derive(Debug, Clone, Default)]
pub struct ScenarioEngine {
    policy: ScenarioPolicy,
}

impl ScenarioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(&self) -> &ScenarioPolicy {
        &self.policy
    }

    /// Evaluate all regimes in canonical order
    ///
    /// Consumes exactly two draws: bullish exit, then neutral exit.
    pub fn outcomes<R: RandomSource + ?Sized>(
        &self,
        config: &ProductConfiguration,
        rng: &mut R,
    ) -> [ScenarioOutcome; 4] {
        let n = config.duration_years as f64;
        let p = &self.policy;

        let bullish_exit = early_exit(
            rng.next_uniform(),
            p.bullish_exit_threshold,
            p.bullish_exit_fraction,
            config.duration_years,
        );
        let neutral_exit = early_exit(
            rng.next_uniform(),
            p.neutral_exit_threshold,
            p.neutral_exit_fraction,
            config.duration_years,
        );

        [
            ScenarioOutcome {
                regime: MarketRegime::Bullish,
                final_value: p.bullish_value(config, n),
                probability: p.bullish_probability,
                early_exit_year: bullish_exit,
            },
            ScenarioOutcome {
                regime: MarketRegime::Neutral,
                final_value: p.neutral_value(config, n),
                probability: p.neutral_probability,
                early_exit_year: neutral_exit,
            },
            ScenarioOutcome {
                regime: MarketRegime::Bearish,
                final_value: p.bearish_value(config),
                probability: p.bearish_probability,
                early_exit_year: None,
            },
            ScenarioOutcome {
                regime: MarketRegime::Crash,
                final_value: p.crash_value(config),
                probability: p.crash_probability,
                early_exit_year: None,
            },
        ]
    }
}

/// Exit year when the draw triggers redemption, kept within [1, duration)
fn early_exit(draw: f64, threshold: f64, fraction: f64, duration_years: u32) -> Option<u32> {
    if draw <= threshold {
        return None;
    }
    let year = (duration_years as f64 * fraction).floor() as u32;
    if year >= 1 && year < duration_years {
        Some(year)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProtectionType;
    use crate::simulation::rng::ScriptedDraws;
    use approx::assert_relative_eq;

    fn reference_product() -> ProductConfiguration {
        ProductConfiguration::default()
    }

    #[test]
    fn test_reference_product_values() {
        let engine = ScenarioEngine::default();
        let outcomes = engine.outcomes(&reference_product(), &mut ScriptedDraws::constant(0.0));

        assert_relative_eq!(outcomes[0].final_value, 152_000.0, epsilon = 1e-6);
        assert_relative_eq!(outcomes[1].final_value, 141_600.0, epsilon = 1e-6);
        assert_relative_eq!(outcomes[2].final_value, 50_000.0, epsilon = 1e-6);
        assert_relative_eq!(outcomes[3].final_value, 25_000.0, epsilon = 1e-6);

        let regimes: Vec<_> = outcomes.iter().map(|o| o.regime).collect();
        assert_eq!(regimes, MarketRegime::ALL.to_vec());
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let engine = ScenarioEngine::default();
        let outcomes = engine.outcomes(&reference_product(), &mut ScriptedDraws::constant(0.5));
        let total: f64 = outcomes.iter().map(|o| o.probability).sum();
        assert_eq!(total, 1.0);
    }

    #[test]
    fn test_guaranteed_returns_capital_in_down_regimes() {
        let engine = ScenarioEngine::default();
        for barrier in [20.0, 35.0, 50.0, 70.0] {
            let config = reference_product()
                .with_protection_type(ProtectionType::Guaranteed)
                .with_barrier_percent(barrier);
            let outcomes = engine.outcomes(&config, &mut ScriptedDraws::constant(0.0));
            assert_eq!(outcomes[2].final_value, config.initial_capital);
            assert_eq!(outcomes[3].final_value, config.initial_capital);
        }
    }

    #[test]
    fn test_crash_never_beats_bearish() {
        let engine = ScenarioEngine::default();
        let mut barrier = 20.0;
        while barrier <= 70.0 {
            let config = reference_product().with_barrier_percent(barrier);
            let outcomes = engine.outcomes(&config, &mut ScriptedDraws::constant(0.0));
            assert!(
                outcomes[3].final_value <= outcomes[2].final_value,
                "barrier {}", barrier
            );
            barrier += 5.0;
        }
    }

    #[test]
    fn test_floors_apply_to_deep_barriers() {
        let engine = ScenarioEngine::default();
        let config = reference_product().with_barrier_percent(70.0);
        let outcomes = engine.outcomes(&config, &mut ScriptedDraws::constant(0.0));

        // 1 - 0.7 = 0.3 is below the 0.5 bearish floor
        assert_relative_eq!(outcomes[2].final_value, 50_000.0, epsilon = 1e-6);
        // 1 - 1.05 < 0 so the 0.2 crash floor applies
        assert_relative_eq!(outcomes[3].final_value, 20_000.0, epsilon = 1e-6);

        let shallow = reference_product().with_barrier_percent(20.0);
        let outcomes = engine.outcomes(&shallow, &mut ScriptedDraws::constant(0.0));
        assert_relative_eq!(outcomes[2].final_value, 80_000.0, epsilon = 1e-6);
        assert_relative_eq!(outcomes[3].final_value, 70_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_early_exit_draws() {
        let engine = ScenarioEngine::default();
        let config = reference_product();

        // Both draws trigger: floor(8 * 0.6) = 4, floor(8 * 0.7) = 5
        let mut both = ScriptedDraws::new(vec![0.9, 0.9]).unwrap();
        let outcomes = engine.outcomes(&config, &mut both);
        assert_eq!(outcomes[0].early_exit_year, Some(4));
        assert_eq!(outcomes[1].early_exit_year, Some(5));
        assert_eq!(outcomes[2].early_exit_year, None);
        assert_eq!(outcomes[3].early_exit_year, None);
        assert_eq!(both.consumed(), 2);

        // 0.4 is below the bullish threshold but above the neutral one
        let outcomes = engine.outcomes(&config, &mut ScriptedDraws::constant(0.4));
        assert_eq!(outcomes[0].early_exit_year, None);
        assert_eq!(outcomes[1].early_exit_year, Some(5));

        // Thresholds are strict
        let outcomes = engine.outcomes(&config, &mut ScriptedDraws::new(vec![0.5, 0.3]).unwrap());
        assert_eq!(outcomes[0].early_exit_year, None);
        assert_eq!(outcomes[1].early_exit_year, None);
    }

    #[test]
    fn test_exit_year_within_life() {
        let engine = ScenarioEngine::default();
        for years in 3..=12 {
            let config = reference_product().with_duration_years(years);
            let outcomes = engine.outcomes(&config, &mut ScriptedDraws::constant(0.99));
            for outcome in &outcomes[..2] {
                let year = outcome.early_exit_year.expect("exit expected");
                assert!(year >= 1 && year < years, "year {} for duration {}", year, years);
            }
        }
    }

    #[test]
    fn test_return_percent() {
        let outcome = ScenarioOutcome {
            regime: MarketRegime::Bearish,
            final_value: 50_000.0,
            probability: 0.2,
            early_exit_year: None,
        };
        assert_relative_eq!(outcome.return_percent(100_000.0), -50.0);
        assert!(!outcome.is_break_even(100_000.0));
    }
}
