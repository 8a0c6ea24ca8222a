//! Domain checks applied before any computation

use crate::error::SimulationError;
use super::ProductConfiguration;

pub const MIN_DURATION_YEARS: u32 = 3;
pub const MAX_DURATION_YEARS: u32 = 12;

pub const MIN_COUPON_PERCENT: f64 = 3.0;
pub const MAX_COUPON_PERCENT: f64 = 12.0;
pub const COUPON_STEP_PERCENT: f64 = 0.5;

pub const MIN_BARRIER_PERCENT: f64 = 20.0;
pub const MAX_BARRIER_PERCENT: f64 = 70.0;
pub const BARRIER_STEP_PERCENT: f64 = 5.0;

pub const MIN_INITIAL_CAPITAL: f64 = 10_000.0;

const STEP_TOLERANCE: f64 = 1e-9;

/// Validate a configuration, returning it unchanged on success
pub fn validate(config: &ProductConfiguration) -> Result<&ProductConfiguration, SimulationError> {
    check_duration(config.duration_years)?;
    check_stepped_range(
        "annual_coupon_percent",
        config.annual_coupon_percent,
        MIN_COUPON_PERCENT,
        MAX_COUPON_PERCENT,
        COUPON_STEP_PERCENT,
    )?;
    check_stepped_range(
        "barrier_percent",
        config.barrier_percent,
        MIN_BARRIER_PERCENT,
        MAX_BARRIER_PERCENT,
        BARRIER_STEP_PERCENT,
    )?;
    check_capital(config.initial_capital)?;

    if let Some(rate) = config.decrement_rate {
        if !rate.is_finite() || rate < 0.0 {
            return Err(SimulationError::invalid(
                "decrement_rate",
                format!("must be a non-negative number, got {}", rate),
            ));
        }
    }

    Ok(config)
}

fn check_duration(years: u32) -> Result<(), SimulationError> {
    if years == 0 {
        return Err(SimulationError::invalid("duration_years", "must be positive"));
    }
    if !(MIN_DURATION_YEARS..=MAX_DURATION_YEARS).contains(&years) {
        return Err(SimulationError::invalid(
            "duration_years",
            format!(
                "must be between {} and {}, got {}",
                MIN_DURATION_YEARS, MAX_DURATION_YEARS, years
            ),
        ));
    }
    Ok(())
}

fn check_capital(capital: f64) -> Result<(), SimulationError> {
    if !capital.is_finite() || capital <= 0.0 {
        return Err(SimulationError::invalid(
            "initial_capital",
            format!("must be positive, got {}", capital),
        ));
    }
    if capital < MIN_INITIAL_CAPITAL {
        return Err(SimulationError::invalid(
            "initial_capital",
            format!("must be at least {}, got {}", MIN_INITIAL_CAPITAL, capital),
        ));
    }
    Ok(())
}

fn check_stepped_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
) -> Result<(), SimulationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(SimulationError::invalid(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ));
    }
    let steps = (value - min) / step;
    if (steps - steps.round()).abs() > STEP_TOLERANCE {
        return Err(SimulationError::invalid(
            field,
            format!("must be a multiple of {}, got {}", step, value),
        ));
    }
    Ok(())
}
