//! Validation point tables: interpreted reference labels vs. map predictions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CropscopeError, Result};
use crate::types::{Label, Region, Stratum};

use super::source::{read_with_provenance, InputProvenance};

/// Required columns for a validation point table.
const REQUIRED_COLUMNS: [&str; 5] = [
    "region_id",
    "stratum_id",
    "year",
    "reference_label",
    "predicted_label",
];

/// One visually interpreted sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPoint {
    /// Subregion the point was drawn in.
    pub region: Region,
    /// Sampling stratum the point falls in.
    pub stratum: Stratum,
    /// Year the interpretation applies to.
    pub year: i32,
    /// Reference (interpreted) class.
    pub reference: Label,
    /// Class predicted by the map.
    pub predicted: Label,
}

impl ValidationPoint {
    pub fn new(region: Region, stratum: Stratum, year: i32, reference: Label, predicted: Label) -> Self {
        Self {
            region,
            stratum,
            year,
            reference,
            predicted,
        }
    }

    /// Whether the reference label agrees with the map prediction.
    pub fn agrees(&self) -> bool {
        self.reference == self.predicted
    }
}

/// Load a validation point table from a CSV file.
///
/// Columns may appear in any order and extra columns are ignored, but every
/// column in `region_id,stratum_id,year,reference_label,predicted_label` must
/// be present. Labels use the 0/1 encoding, strata the 1-5 codes.
pub fn load_validation_points(path: impl AsRef<Path>) -> Result<(Vec<ValidationPoint>, InputProvenance)> {
    let path = path.as_ref();
    let (contents, hash) = read_with_provenance(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_slice());

    let headers = reader.headers()?.clone();
    let columns = resolve_columns(path, &headers)?;

    let mut points = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_idx + 2);

        let region = parse_field(path, line, &record, columns[0], "region_id", |s| {
            s.parse::<Region>().ok()
        })?;
        let stratum = parse_field(path, line, &record, columns[1], "stratum_id", |s| {
            s.parse::<u8>().ok().and_then(Stratum::from_code)
        })?;
        let year = parse_field(path, line, &record, columns[2], "year", |s| {
            s.parse::<i32>().ok()
        })?;
        let reference = parse_field(path, line, &record, columns[3], "reference_label", |s| {
            s.parse::<u8>().ok().and_then(Label::from_code)
        })?;
        let predicted = parse_field(path, line, &record, columns[4], "predicted_label", |s| {
            s.parse::<u8>().ok().and_then(Label::from_code)
        })?;

        points.push(ValidationPoint::new(region, stratum, year, reference, predicted));
    }

    let provenance = InputProvenance::new(path, hash, points.len());
    Ok((points, provenance))
}

/// Map required column names to header positions, reporting all missing
/// columns at once.
fn resolve_columns(path: &Path, headers: &csv::StringRecord) -> Result<[usize; 5]> {
    let mut indices = [0usize; 5];
    let mut missing = Vec::new();

    for (i, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h.eq_ignore_ascii_case(name)) {
            Some(idx) => indices[i] = idx,
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(CropscopeError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    Ok(indices)
}

fn parse_field<T>(
    path: &Path,
    line: usize,
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T> {
    let raw = record.get(index).unwrap_or("");
    parse(raw).ok_or_else(|| CropscopeError::Parse {
        path: path.to_path_buf(),
        line,
        message: format!("invalid value '{}' for column '{}'", raw, column),
    })
}
