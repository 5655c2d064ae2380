// src/parser/mod.rs

use std::path::Path;
use log::info;

use crate::config::MatchConfig;
use crate::error::{Error, Result};
use crate::types::{Row, Table};

/// Loads a CSV file into a `Table`, keeping only the matching and display
/// fields of each record. Positions are assigned in file order.
///
/// Fails with a configuration error when the path is not a `.csv` file,
/// the file cannot be opened, or either configured field is missing from
/// the header row. A file with a header and no data rows loads as an
/// empty table.
pub fn load_table<P: AsRef<Path>>(path: P, config: &MatchConfig) -> Result<Table> {
    let path = path.as_ref();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => {}
        _ => {
            return Err(Error::config(format!(
                "Input file must be a .csv file: {}",
                path.display()
            )))
        }
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        Error::config(format!("Cannot open input file {}: {}", path.display(), e))
    })?;

    let headers = reader.headers()?.clone();
    let match_index = field_index(&headers, &config.match_field)?;
    let display_index = field_index(&headers, &config.display_field)?;

    let mut rows = Vec::new();
    for (position, record) in reader.records().enumerate() {
        let record = record?;
        let match_value = record.get(match_index).unwrap_or_default().to_string();
        let display_value = record.get(display_index).unwrap_or_default().to_string();
        rows.push(Row::new(position, match_value, display_value));
    }

    info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(Table::new(rows))
}

fn field_index(headers: &csv::StringRecord, field: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == field)
        .ok_or_else(|| Error::config(format!("Field '{}' is not part of the table", field)))
}
