//! Observed-area series: mapped cropland area per region and year, for one
//! footprint type.

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CropscopeError, Result};
use crate::types::Region;

use super::source::{read_with_provenance, InputProvenance};

/// Required columns for an observed-area table.
const REQUIRED_COLUMNS: [&str; 3] = ["region_id", "year", "observed_area"];

/// Observed (mapped) cropland areas for one footprint type, keyed by region
/// and year. Years are kept sorted per region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaSeries {
    areas: IndexMap<Region, BTreeMap<i32, f64>>,
}

impl AreaSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an observation. A later insert for the same (region, year)
    /// overwrites the earlier one.
    pub fn insert(&mut self, region: Region, year: i32, area: f64) {
        self.areas.entry(region).or_default().insert(year, area);
    }

    /// Observed area for a region/year, if present.
    pub fn observed(&self, region: Region, year: i32) -> Option<f64> {
        self.areas.get(&region).and_then(|m| m.get(&year)).copied()
    }

    /// Sorted years available for a region.
    pub fn years(&self, region: Region) -> Vec<i32> {
        self.areas
            .get(&region)
            .map(|m| m.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Number of (region, year) observations.
    pub fn len(&self) -> usize {
        self.areas.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load an observed-area table from a CSV file.
///
/// Required columns: `region_id,year,observed_area` (any order, extra
/// columns ignored).
pub fn load_area_series(path: impl AsRef<Path>) -> Result<(AreaSeries, InputProvenance)> {
    let path = path.as_ref();
    let (contents, hash) = read_with_provenance(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_slice());

    let headers = reader.headers()?.clone();

    let mut indices = [0usize; 3];
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

    let mut series = AreaSeries::new();
    let mut rows = 0usize;
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_idx + 2);

        let region = parse_cell(path, line, &record, indices[0], "region_id", |s| {
            s.parse::<Region>().ok()
        })?;
        let year = parse_cell(path, line, &record, indices[1], "year", |s| {
            s.parse::<i32>().ok()
        })?;
        let area = parse_cell(path, line, &record, indices[2], "observed_area", |s| {
            s.parse::<f64>().ok().filter(|a| a.is_finite() && *a >= 0.0)
        })?;

        series.insert(region, year, area);
        rows += 1;
    }

    let provenance = InputProvenance::new(path, hash, rows);
    Ok((series, provenance))
}

fn parse_cell<T>(
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
