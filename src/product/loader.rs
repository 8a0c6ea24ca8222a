//! Load product configurations from CSV

use super::{validate, ObservationFrequency, ProductConfiguration, ProtectionType, Underlying};
use crate::error::SimulationError;
use csv::Reader;
use log::warn;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a product file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown {column} value: {value}")]
    UnknownValue { column: &'static str, value: String },

    #[error("row {row}: {source}")]
    Invalid {
        row: usize,
        #[source]
        source: SimulationError,
    },
}

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    underlying: String,
    duration_years: u32,
    annual_coupon_percent: f64,
    barrier_percent: f64,
    initial_capital: f64,
    protection_type: String,
    #[serde(default)]
    observation_frequency: Option<String>,
    #[serde(default)]
    decrement_rate: Option<f64>,
}

/// A loaded product with its optional display name
#[derive(Debug, Clone, PartialEq)]
pub struct NamedProduct {
    pub name: Option<String>,
    pub configuration: ProductConfiguration,
}

impl CsvRow {
    fn into_product(self) -> Result<NamedProduct, LoadError> {
        let underlying = Underlying::from_code(self.underlying.trim()).ok_or_else(|| {
            LoadError::UnknownValue { column: "underlying", value: self.underlying.clone() }
        })?;

        let protection_type = ProtectionType::from_str_opt(self.protection_type.trim())
            .ok_or_else(|| LoadError::UnknownValue {
                column: "protection_type",
                value: self.protection_type.clone(),
            })?;

        let observation_frequency = match self.observation_frequency.as_deref().map(str::trim) {
            None | Some("") => ObservationFrequency::Annual,
            Some(other) => ObservationFrequency::from_str_opt(other).ok_or_else(|| {
                LoadError::UnknownValue { column: "observation_frequency", value: other.to_string() }
            })?,
        };

        Ok(NamedProduct {
            name: self.name.filter(|n| !n.trim().is_empty()),
            configuration: ProductConfiguration {
                underlying,
                duration_years: self.duration_years,
                annual_coupon_percent: self.annual_coupon_percent,
                barrier_percent: self.barrier_percent,
                initial_capital: self.initial_capital,
                protection_type,
                observation_frequency,
                decrement_rate: self.decrement_rate,
            },
        })
    }
}

/// Load and validate all products from a CSV file
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<NamedProduct>, LoadError> {
    let reader = Reader::from_path(path)?;
    read_products(reader)
}

/// Load products from any reader (e.g., string buffer, stdin)
pub fn load_products_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NamedProduct>, LoadError> {
    read_products(Reader::from_reader(reader))
}

fn read_products<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<NamedProduct>, LoadError> {
    let mut products = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        // Header is line 1
        let row_number = idx + 2;
        let row: CsvRow = result?;
        let product = row.into_product()?;

        if let Err(source) = validate(&product.configuration) {
            warn!("rejecting product on row {}: {}", row_number, source);
            return Err(LoadError::Invalid { row: row_number, source });
        }
        products.push(product);
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,underlying,duration_years,annual_coupon_percent,barrier_percent,initial_capital,protection_type,observation_frequency,decrement_rate\n";

    #[test]
    fn test_load_products() {
        let data = format!(
            "{}{}{}",
            HEADER,
            "Conservative,EUROSTOXX50,8,5.5,60,100000,protected,annual,\n",
            ",CAC40,6,8.0,40,50000,guaranteed,quarterly,0.05\n",
        );

        let products = load_products_from_reader(data.as_bytes()).expect("Failed to load products");
        assert_eq!(products.len(), 2);

        let p1 = &products[0];
        assert_eq!(p1.name.as_deref(), Some("Conservative"));
        assert_eq!(p1.configuration.underlying, Underlying::EuroStoxx50);
        assert_eq!(p1.configuration.barrier_percent, 60.0);
        assert_eq!(p1.configuration.decrement_rate, None);

        let p2 = &products[1];
        assert_eq!(p2.name, None);
        assert_eq!(p2.configuration.protection_type, ProtectionType::Guaranteed);
        assert_eq!(p2.configuration.observation_frequency, ObservationFrequency::Quarterly);
        assert_eq!(p2.configuration.decrement_rate, Some(0.05));
    }

    #[test]
    fn test_unknown_underlying() {
        let data = format!("{}{}", HEADER, "X,DAX,8,5.5,60,100000,protected,annual,\n");
        let err = load_products_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownValue { column: "underlying", .. }));
    }

    #[test]
    fn test_invalid_row_reports_line() {
        let data = format!(
            "{}{}{}",
            HEADER,
            "Ok,SP500,8,5.5,60,100000,protected,annual,\n",
            "Bad,SP500,8,5.5,90,100000,protected,annual,\n",
        );
        match load_products_from_reader(data.as_bytes()) {
            Err(LoadError::Invalid { row, source }) => {
                assert_eq!(row, 3);
                assert_eq!(source.field(), "barrier_percent");
            }
            other => panic!("expected invalid row, got {:?}", other),
        }
    }
}
