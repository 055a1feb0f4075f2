//! Estimation configuration: strata proportions, overlap areas, and years.
//!
//! Configuration is plain values passed by reference into the estimator, with
//! no module-level state. `Default` reproduces the production sampling design
//! for the two subregions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CropscopeError, Result};
use crate::types::{Region, Stratum};

/// Tolerance for the proportion-sum invariant.
pub const PROPORTION_TOLERANCE: f64 = 1e-6;

/// Great Plains stratum proportions (fraction of mapped area per stratum).
const GREAT_PLAINS_PROPORTIONS: [(Stratum, f64); 5] = [
    (Stratum::StableCropland, 0.3399459905021893),
    (Stratum::Gain, 0.04854199924345394),
    (Stratum::Loss, 0.055592609114006625),
    (Stratum::StableNonCropland, 0.5540253044095518),
    (Stratum::PossibleError, 0.0018940967307983225),
];

/// Southern subregion stratum proportions.
const SOUTHERN_PROPORTIONS: [(Stratum, f64); 5] = [
    (Stratum::StableCropland, 0.03336170578959062),
    (Stratum::Gain, 0.008431742977548621),
    (Stratum::Loss, 0.001045225520779897),
    (Stratum::StableNonCropland, 0.9321715151583109),
    (Stratum::PossibleError, 0.02498981055377003),
];

/// Total mapped area per subregion, in million acres.
const GREAT_PLAINS_TOTAL_AREA: f64 = 690.1233086775592;
const SOUTHERN_TOTAL_AREA: f64 = 195.50;

/// First and last year of the production analysis period.
const DEFAULT_YEARS: (i32, i32) = (1996, 2021);

/// Sampling-design configuration for one subregion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    /// The subregion this configuration describes.
    pub region: Region,
    /// Fractional share of total mapped area per stratum. Must sum to 1.0.
    pub strata_proportions: IndexMap<Stratum, f64>,
    /// Mapped area (million acres) attributable to each stratum.
    pub overlap_areas: IndexMap<Stratum, f64>,
}

impl RegionConfig {
    /// Build a configuration from proportions and a region total area,
    /// deriving per-stratum overlap areas.
    pub fn from_proportions(
        region: Region,
        proportions: impl IntoIterator<Item = (Stratum, f64)>,
        total_area: f64,
    ) -> Self {
        let strata_proportions: IndexMap<Stratum, f64> = proportions.into_iter().collect();
        let overlap_areas = strata_proportions
            .iter()
            .map(|(&stratum, &w)| (stratum, w * total_area))
            .collect();

        Self {
            region,
            strata_proportions,
            overlap_areas,
        }
    }

    /// Production configuration for the Great Plains subregion.
    pub fn great_plains() -> Self {
        Self::from_proportions(
            Region::GreatPlains,
            GREAT_PLAINS_PROPORTIONS,
            GREAT_PLAINS_TOTAL_AREA,
        )
    }

    /// Production configuration for the Southern subregion.
    pub fn southern() -> Self {
        Self::from_proportions(Region::Southern, SOUTHERN_PROPORTIONS, SOUTHERN_TOTAL_AREA)
    }

    /// Total mapped area of the region (sum of stratum overlap areas).
    pub fn total_area(&self) -> f64 {
        self.overlap_areas.values().sum()
    }

    /// Check the configuration invariants.
    ///
    /// Proportions must sum to 1.0 within [`PROPORTION_TOLERANCE`], and the
    /// proportion and overlap-area maps must cover the same strata. Runs
    /// before any estimate is computed.
    pub fn validate(&self) -> Result<()> {
        if self.strata_proportions.is_empty() {
            return Err(CropscopeError::Config {
                region: self.region,
                message: "no strata configured".to_string(),
            });
        }

        let sum: f64 = self.strata_proportions.values().sum();
        if (sum - 1.0).abs() > PROPORTION_TOLERANCE {
            return Err(CropscopeError::Config {
                region: self.region,
                message: format!("strata proportions sum to {}, expected 1.0", sum),
            });
        }

        for &stratum in self.strata_proportions.keys() {
            if !self.overlap_areas.contains_key(&stratum) {
                return Err(CropscopeError::Config {
                    region: self.region,
                    message: format!("stratum {} has no overlap area", stratum),
                });
            }
        }
        for &stratum in self.overlap_areas.keys() {
            if !self.strata_proportions.contains_key(&stratum) {
                return Err(CropscopeError::Config {
                    region: self.region,
                    message: format!("stratum {} has an overlap area but no proportion", stratum),
                });
            }
        }

        Ok(())
    }
}

/// Full configuration for one estimation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationConfig {
    /// Per-subregion sampling configurations, in combination order.
    pub regions: Vec<RegionConfig>,
    /// Years to process, ascending.
    pub years: Vec<i32>,
}

impl EstimationConfig {
    /// Look up the configuration for a region.
    pub fn region(&self, region: Region) -> Option<&RegionConfig> {
        self.regions.iter().find(|c| c.region == region)
    }

    /// Validate every region configuration.
    pub fn validate(&self) -> Result<()> {
        for config in &self.regions {
            config.validate()?;
        }
        Ok(())
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            regions: vec![RegionConfig::great_plains(), RegionConfig::southern()],
            years: (DEFAULT_YEARS.0..=DEFAULT_YEARS.1).collect(),
        }
    }
}
