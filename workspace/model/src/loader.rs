//! CSV loader for store transactions.
//!
//! Reads a delimited table into a [`RecordSet`]. Every failure (missing file,
//! missing columns, unparsable values, an empty table) is reported as
//! [`ModelError::DataUnavailable`] naming the source and the first problem.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::error::{ModelError, Result};
use crate::record::SaleRecord;
use crate::record_set::RecordSet;

/// Required columns as (canonical header, store-export alias).
pub const REQUIRED_COLUMNS: [(&str, &str); 9] = [
    ("year", "anio"),
    ("month", "mes"),
    ("country", "pais"),
    ("category", "categoria"),
    ("product", "producto"),
    ("order_id", "orden"),
    ("quantity", "Cantidad"),
    ("total", "Total"),
    ("profit", "utilidad"),
];

/// Loads records from a CSV file path.
#[instrument]
pub fn load_csv(path: &Path) -> Result<RecordSet> {
    let source_name = path.display().to_string();
    let file = File::open(path).map_err(|e| {
        warn!("Failed to open '{}': {}", source_name, e);
        ModelError::unavailable(&source_name, format!("cannot open file: {}", e))
    })?;

    let records = load_reader(file, &source_name)?;
    info!("Loaded {} records from {}", records.len(), source_name);
    Ok(records)
}

/// Loads records from any reader. `source_name` only labels diagnostics.
pub fn load_reader<R: Read>(reader: R, source_name: &str) -> Result<RecordSet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ModelError::unavailable(source_name, format!("cannot read header row: {}", e)))?
        .clone();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|(canonical, alias)| !headers.iter().any(|h| h == *canonical || h == *alias))
        .map(|(canonical, _)| *canonical)
        .collect();
    if !missing.is_empty() {
        return Err(ModelError::unavailable(
            source_name,
            format!("missing required columns: {}", missing.join(", ")),
        ));
    }
    debug!("Header row of {} has {} columns", source_name, headers.len());

    let mut records = Vec::new();
    for (index, result) in csv_reader.deserialize::<SaleRecord>().enumerate() {
        // Data starts on the line after the header.
        let line = index + 2;
        let record = result.map_err(|e| {
            ModelError::unavailable(source_name, format!("malformed row at line {}: {}", line, e))
        })?;

        if !(1..=12).contains(&record.month()) {
            return Err(ModelError::unavailable(
                source_name,
                format!("month {} out of range 1-12 at line {}", record.month(), line),
            ));
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(ModelError::unavailable(source_name, "file contains no records"));
    }

    Ok(RecordSet::new(records))
}
