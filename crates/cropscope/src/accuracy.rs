//! Stratum accuracy calculator: per-stratum confusion statistics from
//! validation points.
//!
//! Everything here is a pure function of its inputs. Aggregation is keyed by
//! stratum, so results never depend on the row order of the point table.

use indexmap::IndexMap;

use crate::input::ValidationPoint;
use crate::types::{Label, Region, Stratum};

/// Confusion counts for one stratum, cropland as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    /// Map cropland, reference cropland.
    pub true_positive: usize,
    /// Map cropland, reference non-cropland (commission).
    pub false_positive: usize,
    /// Map non-cropland, reference cropland (omission).
    pub false_negative: usize,
    /// Map non-cropland, reference non-cropland.
    pub true_negative: usize,
}

impl ConfusionCounts {
    /// Tally one (reference, predicted) pair.
    pub fn record(&mut self, reference: Label, predicted: Label) {
        match (predicted, reference) {
            (Label::Cropland, Label::Cropland) => self.true_positive += 1,
            (Label::Cropland, Label::NonCropland) => self.false_positive += 1,
            (Label::NonCropland, Label::Cropland) => self.false_negative += 1,
            (Label::NonCropland, Label::NonCropland) => self.true_negative += 1,
        }
    }

    /// Total points tallied.
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.false_negative + self.true_negative
    }

    /// Points where reference and prediction agree.
    pub fn correct(&self) -> usize {
        self.true_positive + self.true_negative
    }

    /// Points whose reference label is cropland.
    pub fn reference_cropland(&self) -> usize {
        self.true_positive + self.false_negative
    }
}

/// Error-rate summary for one stratum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StratumAccuracy {
    /// Number of validation points in the stratum.
    pub n_points: usize,
    /// Points where the map agrees with the reference.
    pub correct_count: usize,
    /// FP / (FP + TP): fraction of mapped cropland that is not cropland.
    pub commission_error_rate: f64,
    /// FN / (FN + TP): fraction of true cropland the map missed.
    pub omission_error_rate: f64,
    /// Sample mean of the cropland reference indicator (p-bar).
    pub cropland_fraction: f64,
}

impl StratumAccuracy {
    /// Derive rates from confusion counts.
    ///
    /// Rates with an empty denominator are 0: a stratum with no mapped
    /// cropland has nothing to commit, and one with no reference cropland
    /// has nothing to omit.
    pub fn from_counts(counts: ConfusionCounts) -> Self {
        let tp = counts.true_positive as f64;
        let fp = counts.false_positive as f64;
        let fn_ = counts.false_negative as f64;
        let n = counts.total();

        let commission_error_rate = if fp + tp > 0.0 { fp / (fp + tp) } else { 0.0 };
        let omission_error_rate = if fn_ + tp > 0.0 { fn_ / (fn_ + tp) } else { 0.0 };
        let cropland_fraction = if n > 0 {
            counts.reference_cropland() as f64 / n as f64
        } else {
            0.0
        };

        Self {
            n_points: n,
            correct_count: counts.correct(),
            commission_error_rate,
            omission_error_rate,
            cropland_fraction,
        }
    }
}

/// Summarize validation points into per-stratum accuracy statistics.
///
/// Strata with no points are absent from the returned map; the estimator
/// treats absence as an undefined error rate and flags the estimate, rather
/// than assuming zero error. Keys come back in stratum code order.
pub fn summarize_strata(points: &[ValidationPoint]) -> IndexMap<Stratum, StratumAccuracy> {
    let mut counts: IndexMap<Stratum, ConfusionCounts> = Stratum::all()
        .into_iter()
        .map(|s| (s, ConfusionCounts::default()))
        .collect();

    for point in points {
        if let Some(c) = counts.get_mut(&point.stratum) {
            c.record(point.reference, point.predicted);
        }
    }

    counts
        .into_iter()
        .filter(|(_, c)| c.total() > 0)
        .map(|(stratum, c)| (stratum, StratumAccuracy::from_counts(c)))
        .collect()
}

/// Select the points for one region and year.
pub fn points_for(points: &[ValidationPoint], region: Region, year: i32) -> Vec<ValidationPoint> {
    points
        .iter()
        .filter(|p| p.region == region && p.year == year)
        .copied()
        .collect()
}
