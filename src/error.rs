//! Error types for configuration validation

use thiserror::Error;

/// Errors raised by the simulation engine
///
/// The engine has a single failure mode: a product configuration outside its
/// declared domain. Everything downstream of validation is infallible.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {field} {constraint}")]
    InvalidConfiguration {
        /// Name of the offending field
        field: &'static str,
        /// The constraint it violated
        constraint: String,
    },
}

impl SimulationError {
    pub(crate) fn invalid(field: &'static str, constraint: impl Into<String>) -> Self {
        SimulationError::InvalidConfiguration {
            field,
            constraint: constraint.into(),
        }
    }

    /// Field name carried by the error
    pub fn field(&self) -> &'static str {
        match self {
            SimulationError::InvalidConfiguration { field, .. } => field,
        }
    }
}
