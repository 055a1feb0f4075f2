//! Result document: the nested, persisted output of an estimation run.
//!
//! Shape: footprint type -> region key (or `"combined"`) -> `"total"` ->
//! ordered series of adjusted estimates.

mod persistence;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CropscopeError, Result};
use crate::estimate::AdjustedEstimate;
use crate::input::InputProvenance;
use crate::types::Footprint;

/// Region key for the cross-region combined series.
pub const COMBINED_KEY: &str = "combined";

/// The series bundle for one region key. Currently only the region-wide
/// `"total"` series; the level exists so finer breakdowns can be added
/// without reshaping the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSeries {
    pub total: Vec<AdjustedEstimate>,
}

impl RegionSeries {
    pub fn new(total: Vec<AdjustedEstimate>) -> Self {
        Self { total }
    }
}

/// All series for one footprint type, keyed by region key plus
/// [`COMBINED_KEY`]. Insertion order is preserved in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootprintResults {
    pub regions: IndexMap<String, RegionSeries>,
}

impl FootprintResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region's series under its key.
    pub fn insert(&mut self, key: impl Into<String>, series: Vec<AdjustedEstimate>) {
        self.regions.insert(key.into(), RegionSeries::new(series));
    }

    /// Series for a region key.
    pub fn series(&self, key: &str) -> Option<&[AdjustedEstimate]> {
        self.regions.get(key).map(|r| r.total.as_slice())
    }

    /// The combined cross-region series.
    pub fn combined(&self) -> Option<&[AdjustedEstimate]> {
        self.series(COMBINED_KEY)
    }
}

/// Root persisted artifact: every adjusted series from one estimation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedResult {
    pub gross: FootprintResults,
    pub net: FootprintResults,
    /// When the run completed.
    pub computed_at: DateTime<Utc>,
    /// Hashes of the input tables that produced this result.
    #[serde(default)]
    pub inputs: Vec<InputProvenance>,
}

impl CombinedResult {
    pub fn new(gross: FootprintResults, net: FootprintResults, inputs: Vec<InputProvenance>) -> Self {
        Self {
            gross,
            net,
            computed_at: Utc::now(),
            inputs,
        }
    }

    /// Results for one footprint type.
    pub fn footprint(&self, footprint: Footprint) -> &FootprintResults {
        match footprint {
            Footprint::Gross => &self.gross,
            Footprint::Net => &self.net,
        }
    }

    /// Series for one footprint type and region key.
    pub fn series(&self, footprint: Footprint, key: &str) -> Option<&[AdjustedEstimate]> {
        self.footprint(footprint).series(key)
    }

    /// Structural validation of the nested document.
    ///
    /// Every series must be non-empty and strictly ordered by year with no
    /// duplicates, and all series under one footprint must cover the same
    /// year set. Violations name the offending key path.
    pub fn validate(&self) -> Result<()> {
        for footprint in Footprint::all() {
            let results = self.footprint(footprint);
            let mut expected_years: Option<Vec<i32>> = None;

            for (key, region) in &results.regions {
                let key_path = format!("{}/{}/total", footprint.key(), key);

                if region.total.is_empty() {
                    return Err(CropscopeError::Malformed {
                        key_path,
                        message: "empty series".to_string(),
                    });
                }

                let years: Vec<i32> = region.total.iter().map(|e| e.year).collect();
                for pair in years.windows(2) {
                    if pair[1] <= pair[0] {
                        return Err(CropscopeError::Malformed {
                            key_path,
                            message: format!(
                                "series not strictly ordered by year ({} then {})",
                                pair[0], pair[1]
                            ),
                        });
                    }
                }

                match &expected_years {
                    None => expected_years = Some(years),
                    Some(expected) if *expected != years => {
                        return Err(CropscopeError::Malformed {
                            key_path,
                            message: format!(
                                "year set {:?} differs from sibling series {:?}",
                                years, expected
                            ),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }
}
