use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchRecord, LaunchTable, Outcome};

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Columns that must be present in the header. Any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Data file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("reading CSV {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV missing '{column}' column")]
    MissingColumn { column: &'static str },

    #[error("CSV row {row}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("CSV row {row}: class must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: i64 },

    #[error("CSV row {row}: payload mass must be a non-negative number, got {value}")]
    InvalidPayload { row: usize, value: f64 },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Columns of interest, picked out of each CSV record by header name.
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

/// Load the full launch table from a CSV file.
///
/// The header must name every column in [`REQUIRED_COLUMNS`]. The first row
/// that fails to parse or validate aborts the whole load.
pub fn load_launch_data(path: &Path) -> Result<LaunchTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn { column });
        }
    }

    let mut records = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let raw: RawLaunchRow = result
            .and_then(|record| record.deserialize(Some(&headers)))
            .map_err(|source| LoadError::Row { row, source })?;
        records.push(validate_row(raw, row)?);
    }

    Ok(LaunchTable::new(records))
}

fn validate_row(raw: RawLaunchRow, row: usize) -> Result<LaunchRecord, LoadError> {
    let outcome = Outcome::from_class(raw.class).ok_or(LoadError::InvalidClass {
        row,
        value: raw.class,
    })?;

    if !raw.payload_mass_kg.is_finite() || raw.payload_mass_kg < 0.0 {
        return Err(LoadError::InvalidPayload {
            row,
            value: raw.payload_mass_kg,
        });
    }

    Ok(LaunchRecord {
        launch_site: raw.launch_site,
        payload_mass_kg: raw.payload_mass_kg,
        outcome,
        booster_category: raw.booster_category,
    })
}
