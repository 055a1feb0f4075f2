//! Main pipeline: load inputs, estimate per region, combine, assemble the
//! result document.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::combine::combine_regions;
use crate::config::EstimationConfig;
use crate::error::{CropscopeError, Result};
use crate::estimate::adjust_series;
use crate::input::{load_area_series, load_validation_points, AreaSeries, ValidationPoint};
use crate::results::{CombinedResult, FootprintResults, COMBINED_KEY};
use crate::types::{Footprint, Region};

/// Locations of the four input tables for one run.
#[derive(Debug, Clone)]
pub struct InputPaths {
    /// Gross (cumulative footprint) observed-area CSV.
    pub gross_areas: PathBuf,
    /// Net (active footprint) observed-area CSV.
    pub net_areas: PathBuf,
    /// Validation point CSV per region.
    pub validation_points: IndexMap<Region, PathBuf>,
}

impl InputPaths {
    pub fn new(gross_areas: impl AsRef<Path>, net_areas: impl AsRef<Path>) -> Self {
        Self {
            gross_areas: gross_areas.as_ref().to_path_buf(),
            net_areas: net_areas.as_ref().to_path_buf(),
            validation_points: IndexMap::new(),
        }
    }

    /// Add the validation point table for a region.
    pub fn with_points(mut self, region: Region, path: impl AsRef<Path>) -> Self {
        self.validation_points
            .insert(region, path.as_ref().to_path_buf());
        self
    }
}

/// The estimation pipeline.
///
/// Holds the sampling-design configuration and runs the whole batch: stratum
/// accuracy, per-year bias adjustment, and cross-region combination for both
/// footprint types.
pub struct Cropscope {
    config: EstimationConfig,
}

impl Cropscope {
    /// Create a pipeline with the production configuration.
    pub fn new() -> Self {
        Self::with_config(EstimationConfig::default())
    }

    /// Create a pipeline with a custom configuration.
    pub fn with_config(config: EstimationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimationConfig {
        &self.config
    }

    /// Run the full pipeline from input files.
    ///
    /// Loads and hashes every input, then computes as in [`run_tables`].
    /// All configuration errors surface before any file is read.
    ///
    /// [`run_tables`]: Cropscope::run_tables
    pub fn run(&self, paths: &InputPaths) -> Result<CombinedResult> {
        self.config.validate()?;

        let mut inputs = Vec::new();

        let (gross, provenance) = load_area_series(&paths.gross_areas)?;
        inputs.push(provenance);
        let (net, provenance) = load_area_series(&paths.net_areas)?;
        inputs.push(provenance);

        let mut points_by_region = IndexMap::new();
        for region_config in &self.config.regions {
            let region = region_config.region;
            let path = paths.validation_points.get(&region).ok_or_else(|| {
                CropscopeError::Config {
                    region,
                    message: "no validation point table provided".to_string(),
                }
            })?;
            let (points, provenance) = load_validation_points(path)?;
            inputs.push(provenance);
            points_by_region.insert(region, points);
        }

        let mut result = self.run_tables(&gross, &net, &points_by_region)?;
        result.inputs = inputs;
        Ok(result)
    }

    /// Run the pipeline over already-loaded tables. No I/O.
    ///
    /// `points_by_region` must contain an entry for every configured region.
    pub fn run_tables(
        &self,
        gross: &AreaSeries,
        net: &AreaSeries,
        points_by_region: &IndexMap<Region, Vec<ValidationPoint>>,
    ) -> Result<CombinedResult> {
        self.config.validate()?;

        let gross_results = self.process_footprint(Footprint::Gross, gross, points_by_region)?;
        let net_results = self.process_footprint(Footprint::Net, net, points_by_region)?;

        let result = CombinedResult::new(gross_results, net_results, Vec::new());
        result.validate()?;
        Ok(result)
    }

    /// Estimate and combine all regions for one footprint type.
    fn process_footprint(
        &self,
        footprint: Footprint,
        areas: &AreaSeries,
        points_by_region: &IndexMap<Region, Vec<ValidationPoint>>,
    ) -> Result<FootprintResults> {
        let mut series_by_region = IndexMap::new();

        for region_config in &self.config.regions {
            let region = region_config.region;
            let points = points_by_region.get(&region).ok_or_else(|| {
                CropscopeError::Config {
                    region,
                    message: "no validation points for region".to_string(),
                }
            })?;

            let series = adjust_series(
                region_config,
                points,
                areas,
                &self.config.years,
                footprint,
            )?;
            series_by_region.insert(region, series);
        }

        let combined = combine_regions(&series_by_region, footprint)?;

        let mut results = FootprintResults::new();
        for (region, series) in series_by_region {
            results.insert(region.key(), series);
        }
        results.insert(COMBINED_KEY, combined);

        Ok(results)
    }
}

impl Default for Cropscope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegionConfig;
    use crate::types::{Label, Stratum};

    fn two_region_config(years: Vec<i32>) -> EstimationConfig {
        EstimationConfig {
            regions: vec![
                RegionConfig::from_proportions(
                    Region::GreatPlains,
                    [(Stratum::StableCropland, 1.0)],
                    1000.0,
                ),
                RegionConfig::from_proportions(
                    Region::Southern,
                    [(Stratum::StableCropland, 1.0)],
                    1000.0,
                ),
            ],
            years,
        }
    }

    fn agree_points(region: Region, year: i32, n: usize) -> Vec<ValidationPoint> {
        (0..n)
            .map(|_| {
                ValidationPoint::new(
                    region,
                    Stratum::StableCropland,
                    year,
                    Label::Cropland,
                    Label::Cropland,
                )
            })
            .collect()
    }

    #[test]
    fn test_run_tables_end_to_end() {
        let pipeline = Cropscope::with_config(two_region_config(vec![2010]));

        let mut gross = AreaSeries::new();
        gross.insert(Region::GreatPlains, 2010, 500.0);
        gross.insert(Region::Southern, 2010, 300.0);
        let net = gross.clone();

        let mut points = IndexMap::new();
        points.insert(Region::GreatPlains, agree_points(Region::GreatPlains, 2010, 10));
        points.insert(Region::Southern, agree_points(Region::Southern, 2010, 10));

        let result = pipeline.run_tables(&gross, &net, &points).unwrap();

        let combined = result.series(Footprint::Gross, COMBINED_KEY).unwrap();
        assert_eq!(combined.len(), 1);
        assert!((combined[0].adjusted - 800.0).abs() < 1e-9);
        assert!((combined[0].observed - 800.0).abs() < 1e-9);

        assert!(result.series(Footprint::Net, "great_plains").is_some());
        assert!(result.series(Footprint::Net, "southern").is_some());
    }

    #[test]
    fn test_invalid_config_fails_before_compute() {
        let mut config = two_region_config(vec![2010]);
        config.regions[0]
            .strata_proportions
            .insert(Stratum::Gain, 0.5);

        let pipeline = Cropscope::with_config(config);
        let err = pipeline
            .run_tables(&AreaSeries::new(), &AreaSeries::new(), &IndexMap::new())
            .unwrap_err();
        assert!(matches!(err, CropscopeError::Config { .. }));
    }

    #[test]
    fn test_missing_region_points_is_config_error() {
        let pipeline = Cropscope::with_config(two_region_config(vec![2010]));

        let mut gross = AreaSeries::new();
        gross.insert(Region::GreatPlains, 2010, 500.0);
        gross.insert(Region::Southern, 2010, 300.0);
        let net = gross.clone();

        let mut points = IndexMap::new();
        points.insert(Region::GreatPlains, agree_points(Region::GreatPlains, 2010, 10));

        let err = pipeline.run_tables(&gross, &net, &points).unwrap_err();
        match err {
            CropscopeError::Config { region, .. } => assert_eq!(region, Region::Southern),
            other => panic!("expected Config, got {:?}", other),
        }
    }
}
