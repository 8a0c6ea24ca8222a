//! Yearly capital trajectories and synthetic index level for charting

use std::iter::FusedIterator;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::error::SimulationError;
use crate::product::{validate, ProductConfiguration};
use crate::simulation::{RandomSource, ScenarioPolicy};

/// Index level at inception
pub const INDEX_BASE: f64 = 100.0;

/// Full width of the index perturbation at maturity
pub const INDEX_AMPLITUDE: f64 = 40.0;

/// One chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePathPoint {
    pub year: u32,
    /// Rounded bullish capital
    pub bullish: f64,
    /// Rounded neutral capital
    pub neutral: f64,
    /// Rounded bearish capital
    pub bearish: f64,
    /// Rounded synthetic index level (base 100)
    pub index: f64,
    /// Protection barrier on the index scale
    pub barrier: f64,
}

/// Builds price paths for one validated product
#[derive(Debug, Clone)]
pub struct PricePathGenerator<'a> {
    product: &'a ProductConfiguration,
    policy: ScenarioPolicy,
}

impl<'a> PricePathGenerator<'a> {
    /// Validate the product and build a generator for it
    pub fn new(product: &'a ProductConfiguration) -> Result<Self, SimulationError> {
        let product = validate(product)?;
        Ok(Self {
            product,
            policy: ScenarioPolicy::reference(),
        })
    }

    /// Lazy path over years `0..=duration`
    ///
    /// Draws one value per year from year 1 onward. Cloning the path before
    /// iterating replays the same points when the source is cloneable.
    pub fn path<R: RandomSource>(&self, rng: R) -> PricePath<'a, R> {
        debug!(
            "price path for {} over {} years",
            self.product.underlying.code(),
            self.product.duration_years
        );
        PricePath {
            product: self.product,
            policy: self.policy,
            rng,
            next_year: 0,
        }
    }
}

/// Finite iterator of chart points, one per year including year 0
#[derive(Debug, Clone)]
pub struct PricePath<'a, R> {
    product: &'a ProductConfiguration,
    policy: ScenarioPolicy,
    rng: R,
    next_year: u32,
}

impl<R: RandomSource> PricePath<'_, R> {
    fn point(&mut self, year: u32) -> PricePathPoint {
        let product = self.product;
        let capital = product.initial_capital;
        let n = product.duration_years;
        let elapsed = year as f64;

        let bearish = if year < n {
            capital
        } else {
            self.policy.bearish_value(product)
        };

        let index = if year == 0 {
            INDEX_BASE
        } else {
            let draw = self.rng.next_uniform();
            INDEX_BASE + (draw - 0.5) * INDEX_AMPLITUDE * elapsed / n as f64
        };

        PricePathPoint {
            year,
            bullish: self.policy.bullish_value(product, elapsed).round(),
            neutral: self.policy.neutral_value(product, elapsed).round(),
            bearish: bearish.round(),
            index: index.round(),
            barrier: product.barrier_level(),
        }
    }
}

impl<R: RandomSource> Iterator for PricePath<'_, R> {
    type Item = PricePathPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_year > self.product.duration_years {
            return None;
        }
        let year = self.next_year;
        self.next_year += 1;
        Some(self.point(year))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.product.duration_years + 1).saturating_sub(self.next_year) as usize;
        (remaining, Some(remaining))
    }
}

impl<R: RandomSource> ExactSizeIterator for PricePath<'_, R> {}

impl<R: RandomSource> FusedIterator for PricePath<'_, R> {}

/// Generate the full path for a product with the reference model
pub fn generate_price_path<R: RandomSource>(
    product: &ProductConfiguration,
    rng: R,
) -> Result<Vec<PricePathPoint>, SimulationError> {
    Ok(PricePathGenerator::new(product)?.path(rng).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProtectionType;
    use crate::simulation::{ScriptedDraws, SimRng, SimulationEngine};

    fn product() -> ProductConfiguration {
        ProductConfiguration::default()
    }

    #[test]
    fn test_length_and_years() {
        let config = product().with_duration_years(5);
        let path = PricePathGenerator::new(&config).unwrap().path(SimRng::from_seed(1));
        assert_eq!(path.len(), 6);

        let years: Vec<u32> = path.map(|p| p.year).collect();
        assert_eq!(years, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_trajectories() {
        let config = product();
        let points = generate_price_path(&config, ScriptedDraws::constant(0.5)).unwrap();

        assert_eq!(points[0].bullish, 100_000.0);
        assert_eq!(points[0].neutral, 100_000.0);
        assert_eq!(points[0].bearish, 100_000.0);
        assert_eq!(points[0].index, 100.0);

        // 100_000 * (1 + 0.065 * 3) and 100_000 * (1 + 0.065 * 3 * 0.8)
        assert_eq!(points[3].bullish, 119_500.0);
        assert_eq!(points[3].neutral, 115_600.0);
        assert_eq!(points[3].bearish, 100_000.0);

        assert_eq!(points[7].bearish, 100_000.0);
        assert_eq!(points[8].bearish, 50_000.0);
        assert!(points.iter().all(|p| p.barrier == 50.0));
    }

    #[test]
    fn test_terminal_values_match_scenarios() {
        let config = product().with_barrier_percent(30.0);
        let points = generate_price_path(&config, SimRng::from_seed(4)).unwrap();
        let result = SimulationEngine::default()
            .simulate_with(&config, &mut SimRng::from_seed(4))
            .unwrap();

        let last = points.last().unwrap();
        assert_eq!(last.bullish, result.scenarios[0].final_value.round());
        assert_eq!(last.neutral, result.scenarios[1].final_value.round());
        assert_eq!(last.bearish, result.scenarios[2].final_value.round());
    }

    #[test]
    fn test_guaranteed_bearish_stays_flat() {
        let config = product().with_protection_type(ProtectionType::Guaranteed);
        let points = generate_price_path(&config, SimRng::from_seed(2)).unwrap();
        assert!(points.iter().all(|p| p.bearish == 100_000.0));
    }

    #[test]
    fn test_index_walk_is_bounded() {
        let config = product().with_duration_years(10);

        // Extreme draws reach +/- 20 at maturity, scaled down earlier
        let low = generate_price_path(&config, ScriptedDraws::constant(0.0)).unwrap();
        assert_eq!(low[5].index, 90.0);
        assert_eq!(low[10].index, 80.0);

        let high = generate_price_path(&config, ScriptedDraws::constant(0.999_999)).unwrap();
        assert_eq!(high[10].index, 120.0);

        let random = generate_price_path(&config, SimRng::from_seed(77)).unwrap();
        for p in &random {
            let bound = 20.0 * p.year as f64 / 10.0;
            assert!((p.index - 100.0).abs() <= bound + 0.5, "year {} index {}", p.year, p.index);
        }
    }

    #[test]
    fn test_one_draw_per_year_after_inception() {
        let config = product();
        let mut draws = ScriptedDraws::constant(0.5);
        let _: Vec<_> = PricePathGenerator::new(&config).unwrap().path(&mut draws).collect();
        assert_eq!(draws.consumed(), 8);
    }

    #[test]
    fn test_restart_replays_same_points() {
        let config = product();
        let generator = PricePathGenerator::new(&config).unwrap();
        let path = generator.path(SimRng::from_seed(11));

        let first: Vec<_> = path.clone().collect();
        let second: Vec<_> = path.collect();
        assert_eq!(first, second);

        let again: Vec<_> = generator.path(SimRng::from_seed(11)).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_invalid_product_rejected() {
        let config = product().with_duration_years(1);
        let err = generate_price_path(&config, SimRng::from_seed(1)).unwrap_err();
        assert_eq!(err.field(), "duration_years");
    }
}
