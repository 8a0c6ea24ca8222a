//! CSV output for price paths

use std::io::Write;
use std::path::Path;
use super::PricePathPoint;

/// Write points with a `year,bullish,neutral,bearish,index,barrier` header
pub fn write_price_path<W: Write>(writer: W, points: &[PricePathPoint]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in points {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write points to a file
pub fn write_price_path_file<P: AsRef<Path>>(path: P, points: &[PricePathPoint]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_price_path(file, points)
}
