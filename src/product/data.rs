//! Product configuration matching the structured note term sheet

use serde::{Deserialize, Serialize};

/// Reference index the note is written on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Underlying {
    #[serde(rename = "EUROSTOXX50")]
    EuroStoxx50,
    #[serde(rename = "CAC40")]
    Cac40,
    #[serde(rename = "SP500")]
    Sp500,
    #[serde(rename = "NIKKEI")]
    Nikkei,
    /// Custom equity basket
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl Underlying {
    /// All accepted underlyings, in display order
    pub const ALL: [Underlying; 5] = [
        Underlying::EuroStoxx50,
        Underlying::Cac40,
        Underlying::Sp500,
        Underlying::Nikkei,
        Underlying::Custom,
    ];

    /// Identifier used on the wire and in CSV files
    pub fn code(&self) -> &'static str {
        match self {
            Underlying::EuroStoxx50 => "EUROSTOXX50",
            Underlying::Cac40 => "CAC40",
            Underlying::Sp500 => "SP500",
            Underlying::Nikkei => "NIKKEI",
            Underlying::Custom => "CUSTOM",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Underlying::EuroStoxx50 => "DJ EuroStoxx 50",
            Underlying::Cac40 => "CAC 40",
            Underlying::Sp500 => "S&P 500",
            Underlying::Nikkei => "Nikkei 225",
            Underlying::Custom => "Custom equity basket",
        }
    }

    /// Parse from the identifier code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.code() == code)
    }
}

/// Capital protection mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionType {
    /// 100% of capital returned regardless of the underlying
    Guaranteed,
    /// Full capital only while the underlying stays above the barrier
    Protected,
}

impl ProtectionType {
    pub fn is_guaranteed(&self) -> bool {
        matches!(self, ProtectionType::Guaranteed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionType::Guaranteed => "guaranteed",
            ProtectionType::Protected => "protected",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "guaranteed" => Some(ProtectionType::Guaranteed),
            "protected" => Some(ProtectionType::Protected),
            _ => None,
        }
    }
}

/// Cadence of autocall observation dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationFrequency {
    Annual,
    Quarterly,
}

impl ObservationFrequency {
    pub fn observations_per_year(&self) -> u32 {
        match self {
            ObservationFrequency::Annual => 1,
            ObservationFrequency::Quarterly => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationFrequency::Annual => "annual",
            ObservationFrequency::Quarterly => "quarterly",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "annual" => Some(ObservationFrequency::Annual),
            "quarterly" => Some(ObservationFrequency::Quarterly),
            _ => None,
        }
    }
}

/// Contractual terms of one structured note
///
/// Treated as an immutable value: the `with_*` methods return a modified copy
/// and the engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConfiguration {
    /// Reference index
    pub underlying: Underlying,

    /// Maximum life of the note in years (3-12)
    pub duration_years: u32,

    /// Annual coupon in percent (3-12, step 0.5)
    pub annual_coupon_percent: f64,

    /// Tolerated drop of the underlying in percent (20-70, step 5)
    pub barrier_percent: f64,

    /// Amount invested (>= 10 000)
    pub initial_capital: f64,

    /// Guaranteed or barrier-protected capital
    pub protection_type: ProtectionType,

    /// Autocall observation cadence
    pub observation_frequency: ObservationFrequency,

    /// Annual decrement for decrement-index variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decrement_rate: Option<f64>,
}

impl Default for ProductConfiguration {
    fn default() -> Self {
        Self {
            underlying: Underlying::EuroStoxx50,
            duration_years: 8,
            annual_coupon_percent: 6.5,
            barrier_percent: 50.0,
            initial_capital: 100_000.0,
            protection_type: ProtectionType::Protected,
            observation_frequency: ObservationFrequency::Annual,
            decrement_rate: Some(0.0),
        }
    }
}

impl ProductConfiguration {
    /// Create a configuration with annual observation and no decrement
    pub fn new(
        underlying: Underlying,
        duration_years: u32,
        annual_coupon_percent: f64,
        barrier_percent: f64,
        initial_capital: f64,
        protection_type: ProtectionType,
    ) -> Self {
        Self {
            underlying,
            duration_years,
            annual_coupon_percent,
            barrier_percent,
            initial_capital,
            protection_type,
            observation_frequency: ObservationFrequency::Annual,
            decrement_rate: None,
        }
    }

    pub fn with_underlying(&self, underlying: Underlying) -> Self {
        Self { underlying, ..self.clone() }
    }

    pub fn with_duration_years(&self, duration_years: u32) -> Self {
        Self { duration_years, ..self.clone() }
    }

    pub fn with_annual_coupon_percent(&self, annual_coupon_percent: f64) -> Self {
        Self { annual_coupon_percent, ..self.clone() }
    }

    pub fn with_barrier_percent(&self, barrier_percent: f64) -> Self {
        Self { barrier_percent, ..self.clone() }
    }

    pub fn with_initial_capital(&self, initial_capital: f64) -> Self {
        Self { initial_capital, ..self.clone() }
    }

    pub fn with_protection_type(&self, protection_type: ProtectionType) -> Self {
        Self { protection_type, ..self.clone() }
    }

    pub fn with_observation_frequency(&self, observation_frequency: ObservationFrequency) -> Self {
        Self { observation_frequency, ..self.clone() }
    }

    pub fn with_decrement_rate(&self, decrement_rate: Option<f64>) -> Self {
        Self { decrement_rate, ..self.clone() }
    }

    /// Annual coupon as a decimal rate
    pub fn coupon_rate(&self) -> f64 {
        self.annual_coupon_percent / 100.0
    }

    /// Barrier depth as a decimal
    pub fn barrier_depth(&self) -> f64 {
        self.barrier_percent / 100.0
    }

    /// Index level (base 100) at which protection stops applying
    pub fn barrier_level(&self) -> f64 {
        100.0 - self.barrier_percent
    }

    /// Sum of all coupons over the full life, in percent
    pub fn total_potential_gain_percent(&self) -> f64 {
        self.annual_coupon_percent * self.duration_years as f64
    }

    /// Default comparison label, e.g. "Autocall CAC40 8%"
    pub fn default_name(&self) -> String {
        format!("Autocall {} {}%", self.underlying.code(), self.annual_coupon_percent)
    }
}
