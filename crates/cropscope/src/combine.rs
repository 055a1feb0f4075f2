//! Regional combiner: merge independently estimated subregion series into a
//! single regional time series per footprint type.

use indexmap::IndexMap;

use crate::error::{CropscopeError, Result};
use crate::estimate::{AdjustedEstimate, CI_95_FACTOR};
use crate::types::{Footprint, Region};

/// Combine per-region adjusted series into one regional series.
///
/// Year sets must match 1:1 across regions; a year missing from any region is
/// a fatal [`CropscopeError::Alignment`] naming the region and the year(s),
/// never silently dropped or zero-filled.
///
/// Areas and adjustments sum per year. Standard errors combine as
/// `sqrt(sum se^2)`, which assumes the regions' sampling errors are
/// independent (they are validated with disjoint, independently drawn
/// samples); any cross-region covariance is not modeled. Low-confidence
/// flags and missing-stratum lists carry through by union.
pub fn combine_regions(
    series_by_region: &IndexMap<Region, Vec<AdjustedEstimate>>,
    footprint: Footprint,
) -> Result<Vec<AdjustedEstimate>> {
    // Union of years across all regions, ascending.
    let mut all_years: Vec<i32> = series_by_region
        .values()
        .flat_map(|series| series.iter().map(|e| e.year))
        .collect();
    all_years.sort_unstable();
    all_years.dedup();

    for (region, series) in series_by_region {
        let missing_years: Vec<i32> = all_years
            .iter()
            .copied()
            .filter(|year| !series.iter().any(|e| e.year == *year))
            .collect();
        if !missing_years.is_empty() {
            return Err(CropscopeError::Alignment {
                footprint,
                region: region.key().to_string(),
                missing_years,
            });
        }
    }

    let mut combined = Vec::with_capacity(all_years.len());
    for year in all_years {
        let mut observed = 0.0;
        let mut adjusted = 0.0;
        let mut adjustment = 0.0;
        let mut variance = 0.0;
        let mut low_confidence = false;
        let mut missing_strata = Vec::new();

        for series in series_by_region.values() {
            // Alignment was checked above; every year is present.
            let estimate = series
                .iter()
                .find(|e| e.year == year)
                .expect("year present in every region after alignment check");

            observed += estimate.observed;
            adjusted += estimate.adjusted;
            adjustment += estimate.adjustment;
            variance += estimate.standard_error * estimate.standard_error;
            low_confidence |= estimate.low_confidence;
            for &stratum in &estimate.missing_strata {
                if !missing_strata.contains(&stratum) {
                    missing_strata.push(stratum);
                }
            }
        }

        let standard_error = variance.sqrt();
        combined.push(AdjustedEstimate {
            year,
            observed,
            adjusted,
            adjustment,
            standard_error,
            ci_95: CI_95_FACTOR * standard_error,
            low_confidence,
            missing_strata,
        });
    }

    Ok(combined)
}
