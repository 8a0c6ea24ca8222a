//! Synthetic price paths for charting

mod generator;
mod output;

pub use generator::{
    generate_price_path, PricePath, PricePathGenerator, PricePathPoint, INDEX_AMPLITUDE, INDEX_BASE,
};
pub use output::{write_price_path, write_price_path_file};
