//! Insertion-ordered set of products under comparison

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use crate::error::SimulationError;
use crate::product::{validate, ObservationFrequency, ProductConfiguration, ProtectionType, Underlying};
use super::risk::{classify_risk, RiskLevel};

/// A named product in the comparison set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    /// Unique within the set, never reused
    pub id: u64,
    pub name: String,
    pub configuration: ProductConfiguration,
    pub risk_tier: RiskLevel,
    /// Headline return from the risk classifier
    pub expected_return: f64,
    pub added_at: DateTime<Utc>,
}

/// Point on the risk/return comparison chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub risk: u8,
    pub risk_label: &'static str,
    pub expected_return: f64,
}

/// Products under comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSet {
    entries: Vec<ComparisonEntry>,
    #[serde(skip)]
    next_id: u64,
}

impl Default for ComparisonSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_id: 1 }
    }

    /// A set seeded with a conservative and a dynamic reference product
    pub fn with_reference_products() -> Self {
        let mut set = Self::new();

        let conservative = ProductConfiguration {
            underlying: Underlying::EuroStoxx50,
            duration_years: 8,
            annual_coupon_percent: 5.5,
            barrier_percent: 60.0,
            initial_capital: 100_000.0,
            protection_type: ProtectionType::Protected,
            observation_frequency: ObservationFrequency::Annual,
            decrement_rate: None,
        };
        let dynamic = ProductConfiguration {
            underlying: Underlying::Cac40,
            duration_years: 6,
            annual_coupon_percent: 8.0,
            barrier_percent: 40.0,
            initial_capital: 100_000.0,
            protection_type: ProtectionType::Protected,
            observation_frequency: ObservationFrequency::Quarterly,
            decrement_rate: None,
        };

        set.push("Autocall EuroStoxx 50 Conservateur".to_string(), conservative);
        set.push("Autocall CAC 40 Dynamique".to_string(), dynamic);
        set
    }

    /// Add a product under its default name
    pub fn add(&mut self, configuration: ProductConfiguration) -> Result<&ComparisonEntry, SimulationError> {
        let name = configuration.default_name();
        self.add_named(name, configuration)
    }

    /// Validate, classify and append a product
    pub fn add_named(
        &mut self,
        name: impl Into<String>,
        configuration: ProductConfiguration,
    ) -> Result<&ComparisonEntry, SimulationError> {
        validate(&configuration)?;
        Ok(self.push(name.into(), configuration))
    }

    fn push(&mut self, name: String, configuration: ProductConfiguration) -> &ComparisonEntry {
        let id = self.next_id;
        self.next_id += 1;

        let classification = classify_risk(&configuration);
        debug!("adding comparison entry {} ({}) as {:?}", id, name, classification.tier);

        self.entries.push(ComparisonEntry {
            id,
            name,
            configuration,
            risk_tier: classification.tier,
            expected_return: classification.expected_return,
            added_at: Utc::now(),
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Remove an entry, returning it if it existed
    pub fn remove(&mut self, id: u64) -> Option<ComparisonEntry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    pub fn get(&self, id: u64) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ComparisonEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Risk/return scatter points, one per entry
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.entries
            .iter()
            .map(|e| ChartPoint {
                name: e.name.clone(),
                risk: e.risk_tier.rank(),
                risk_label: e.risk_tier.label(),
                expected_return: e.expected_return,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ComparisonSet {
    type Item = &'a ComparisonEntry;
    type IntoIter = std::slice::Iter<'a, ComparisonEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_products() {
        let set = ComparisonSet::with_reference_products();
        assert_eq!(set.len(), 2);

        let entries: Vec<_> = set.iter().collect();
        assert_eq!(entries[0].risk_tier, RiskLevel::Low);
        assert_relative_eq!(entries[0].expected_return, 144_000.0, epsilon = 1e-6);
        assert_eq!(entries[1].risk_tier, RiskLevel::High);
        assert_relative_eq!(entries[1].expected_return, 148_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_add_assigns_name_and_unique_ids() {
        let mut set = ComparisonSet::with_reference_products();
        let product = ProductConfiguration::default().with_annual_coupon_percent(6.0);

        let entry = set.add(product).unwrap();
        assert_eq!(entry.id, 3);
        assert_eq!(entry.name, "Autocall EUROSTOXX50 6%");
        assert_eq!(entry.risk_tier, RiskLevel::Medium);

        assert!(set.remove(3).is_some());
        let again = set.add(ProductConfiguration::default()).unwrap();
        assert_eq!(again.id, 4);
    }

    #[test]
    fn test_add_rejects_invalid_product() {
        let mut set = ComparisonSet::new();
        let err = set
            .add(ProductConfiguration::default().with_initial_capital(500.0))
            .unwrap_err();
        assert_eq!(err.field(), "initial_capital");
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_keeps_insertion_order() {
        let mut set = ComparisonSet::new();
        for coupon in [4.0, 5.0, 6.0] {
            set.add(ProductConfiguration::default().with_annual_coupon_percent(coupon)).unwrap();
        }

        let removed = set.remove(2).expect("entry 2 exists");
        assert_eq!(removed.configuration.annual_coupon_percent, 5.0);
        assert!(set.remove(2).is_none());
        assert!(set.get(2).is_none());

        let ids: Vec<u64> = set.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_chart_points() {
        let set = ComparisonSet::with_reference_products();
        let points = set.chart_points();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].risk, 1);
        assert_eq!(points[1].risk, 3);
        assert_eq!(points[1].risk_label, "High");
        assert_eq!(points[1].name, "Autocall CAC 40 Dynamique");
    }

    #[test]
    fn test_default_set_starts_ids_at_one() {
        let mut set = ComparisonSet::default();
        let entry = set.add(ProductConfiguration::default()).unwrap();
        assert_eq!(entry.id, 1);
        let entry = set.add(ProductConfiguration::default()).unwrap();
        assert_eq!(entry.id, 2);
        assert!(ComparisonSet::default().is_empty());
    }
}
