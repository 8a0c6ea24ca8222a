//! Product terms, validation, and CSV loading

mod data;
mod validation;
pub mod loader;

pub use data::{ProductConfiguration, Underlying, ProtectionType, ObservationFrequency};
pub use validation::{
    validate, MIN_DURATION_YEARS, MAX_DURATION_YEARS, MIN_COUPON_PERCENT, MAX_COUPON_PERCENT,
    COUPON_STEP_PERCENT, MIN_BARRIER_PERCENT, MAX_BARRIER_PERCENT, BARRIER_STEP_PERCENT,
    MIN_INITIAL_CAPITAL,
};
pub use loader::{load_products, load_products_from_reader, LoadError, NamedProduct};
