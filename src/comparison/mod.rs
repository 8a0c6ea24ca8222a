//! Multi-product comparison: risk tiers and the comparison set

mod risk;
mod set;

pub use risk::{classify_risk, RiskClassification, RiskLevel};
pub use set::{ChartPoint, ComparisonEntry, ComparisonSet};
