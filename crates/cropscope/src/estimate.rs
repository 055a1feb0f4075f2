//! Area estimator: Olofsson-style bias adjustment with stratified standard
//! errors, applied per region, per year, per footprint type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::accuracy::{points_for, summarize_strata, StratumAccuracy};
use crate::config::RegionConfig;
use crate::error::{CropscopeError, Result};
use crate::input::{AreaSeries, ValidationPoint};
use crate::types::{Footprint, Stratum};

/// Multiplier for a 95% confidence interval.
pub(crate) const CI_95_FACTOR: f64 = 1.96;

/// Bias-adjusted area estimate for one region, year, and footprint type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedEstimate {
    pub year: i32,
    /// Raw mapped area from the classifier.
    pub observed: f64,
    /// Bias-adjusted area.
    pub adjusted: f64,
    /// Net correction applied (adjusted - observed).
    pub adjustment: f64,
    /// Standard error of the adjusted area, same units as the areas.
    pub standard_error: f64,
    /// 95% confidence half-width (1.96 * standard_error).
    pub ci_95: f64,
    /// Set when any configured stratum had zero or one validation point;
    /// the estimate stands but its uncertainty is understated.
    pub low_confidence: bool,
    /// Configured strata with no validation points for this year.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_strata: Vec<Stratum>,
}

impl AdjustedEstimate {
    /// The all-zero estimate used when there is no mapped area to correct.
    fn zero_base(year: i32) -> Self {
        Self {
            year,
            observed: 0.0,
            adjusted: 0.0,
            adjustment: 0.0,
            standard_error: 0.0,
            ci_95: 0.0,
            low_confidence: false,
            missing_strata: Vec::new(),
        }
    }
}

/// Compute the bias-adjusted area for one year.
///
/// The adjustment follows Olofsson et al. (2014):
/// `adjusted = observed + sum_s w_s * (O_s - C_s) * A_s`, with `w_s` the
/// stratum proportion, `O_s`/`C_s` the omission/commission error rates, and
/// `A_s` the stratum overlap area.
///
/// The standard error is the stratified-sampling form in area units:
/// `total_area * sqrt(sum_s w_s^2 * s2_s / n_s)` where `s2_s` is the sample
/// variance of the cropland reference indicator. A stratum with a single
/// point has zero variance by convention and marks the estimate
/// low-confidence; a stratum with no points contributes nothing and is
/// listed in `missing_strata`. Neither case divides by zero.
pub fn adjust_year(
    year: i32,
    observed: f64,
    accuracy: &IndexMap<Stratum, StratumAccuracy>,
    config: &RegionConfig,
) -> AdjustedEstimate {
    // No correction is possible on an empty base.
    if observed == 0.0 {
        return AdjustedEstimate::zero_base(year);
    }

    let mut adjustment = 0.0;
    let mut variance = 0.0;
    let mut low_confidence = false;
    let mut missing_strata = Vec::new();

    for (&stratum, &proportion) in &config.strata_proportions {
        let area = config.overlap_areas[&stratum];

        let Some(acc) = accuracy.get(&stratum) else {
            missing_strata.push(stratum);
            low_confidence = true;
            continue;
        };

        adjustment +=
            proportion * (acc.omission_error_rate - acc.commission_error_rate) * area;

        let n = acc.n_points as f64;
        if acc.n_points > 1 {
            let p = acc.cropland_fraction;
            let sample_variance = n * p * (1.0 - p) / (n - 1.0);
            variance += proportion * proportion * sample_variance / n;
        } else {
            // n == 1: within-stratum variance defined as zero.
            low_confidence = true;
        }
    }

    let standard_error = config.total_area() * variance.sqrt();

    AdjustedEstimate {
        year,
        observed,
        adjusted: observed + adjustment,
        adjustment,
        standard_error,
        ci_95: CI_95_FACTOR * standard_error,
        low_confidence,
        missing_strata,
    }
}

/// Compute the adjusted series for one region and footprint type across the
/// configured years.
///
/// Every configured year must be present in the observed-area table;
/// otherwise the run fails with an [`CropscopeError::Alignment`] naming the
/// missing years.
pub fn adjust_series(
    config: &RegionConfig,
    points: &[ValidationPoint],
    areas: &AreaSeries,
    years: &[i32],
    footprint: Footprint,
) -> Result<Vec<AdjustedEstimate>> {
    let missing_years: Vec<i32> = years
        .iter()
        .copied()
        .filter(|&year| areas.observed(config.region, year).is_none())
        .collect();
    if !missing_years.is_empty() {
        return Err(CropscopeError::Alignment {
            footprint,
            region: config.region.key().to_string(),
            missing_years,
        });
    }

    let mut estimates = Vec::with_capacity(years.len());
    for &year in years {
        let observed = areas
            .observed(config.region, year)
            .unwrap_or_default();
        let year_points = points_for(points, config.region, year);
        let accuracy = summarize_strata(&year_points);
        estimates.push(adjust_year(year, observed, &accuracy, config));
    }

    Ok(estimates)
}
