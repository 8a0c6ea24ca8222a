//! Coarse risk tiering used to compare products side by side

use log::debug;
use serde::{Deserialize, Serialize};
use crate::product::ProductConfiguration;

/// Risk tier of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Position on the comparison chart's risk axis
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

/// Tier plus headline return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskClassification {
    pub tier: RiskLevel,
    /// Full-coupon redemption value, C * (1 + r * n)
    pub expected_return: f64,
}

/// Classify a product for comparison
///
/// Rules, first match wins:
/// 1. barrier > 55 and coupon < 7 -> low
/// 2. barrier < 45 or coupon > 9 -> high
/// 3. otherwise medium
pub fn classify_risk(product: &ProductConfiguration) -> RiskClassification {
    let barrier = product.barrier_percent;
    let coupon = product.annual_coupon_percent;

    let tier = if barrier > 55.0 && coupon < 7.0 {
        RiskLevel::Low
    } else if barrier < 45.0 || coupon > 9.0 {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    };

    let expected_return =
        product.initial_capital * (1.0 + product.coupon_rate() * product.duration_years as f64);

    debug!("classified barrier {} coupon {} as {:?}", barrier, coupon, tier);

    RiskClassification { tier, expected_return }
}
