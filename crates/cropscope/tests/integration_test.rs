//! Integration tests for the cropscope pipeline.

use std::io::Write;

use tempfile::{tempdir, NamedTempFile};

use cropscope::{
    CombinedResult, CropscopeError, Cropscope, EstimationConfig, Footprint, InputPaths, Region,
    RegionConfig, Stratum, COMBINED_KEY,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// One single-stratum region config per subregion, 1000-unit areas.
fn single_stratum_config(years: Vec<i32>) -> EstimationConfig {
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

/// Point table rows: 8 agreements and 2 commission disagreements (80%
/// accuracy) for one region/year.
fn eighty_percent_points(region: &str, year: i32) -> String {
    let mut rows = String::new();
    for _ in 0..8 {
        rows.push_str(&format!("{},1,{},1,1\n", region, year));
    }
    for _ in 0..2 {
        rows.push_str(&format!("{},1,{},0,1\n", region, year));
    }
    rows
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn test_two_region_eighty_percent_scenario() {
    let header = "region_id,stratum_id,year,reference_label,predicted_label\n";
    let gp_points = create_test_file(&format!(
        "{}{}",
        header,
        eighty_percent_points("great_plains", 2010)
    ));
    let southern_points = create_test_file(&format!(
        "{}{}",
        header,
        eighty_percent_points("southern", 2010)
    ));

    let areas = "region_id,year,observed_area\n\
                 great_plains,2010,1000\n\
                 southern,2010,1000\n";
    let gross = create_test_file(areas);
    let net = create_test_file(areas);

    let paths = InputPaths::new(gross.path(), net.path())
        .with_points(Region::GreatPlains, gp_points.path())
        .with_points(Region::Southern, southern_points.path());

    let pipeline = Cropscope::with_config(single_stratum_config(vec![2010]));
    let result = pipeline.run(&paths).expect("pipeline failed");

    for footprint in Footprint::all() {
        // 20% commission error takes 200 off each region's 1000.
        for region in Region::all() {
            let series = result.series(footprint, region.key()).unwrap();
            assert_eq!(series.len(), 1);
            assert!((series[0].adjusted - 800.0).abs() < 1e-9);
            assert!(!series[0].low_confidence);
        }

        let combined = result.series(footprint, COMBINED_KEY).unwrap();
        assert!((combined[0].adjusted - 1600.0).abs() < 1e-9);

        // Regional errors combine as sqrt of summed squares.
        let region_se = result.series(footprint, "great_plains").unwrap()[0].standard_error;
        assert!((combined[0].standard_error - (2.0 * region_se * region_se).sqrt()).abs() < 1e-9);
    }

    // One provenance record per input file, all hashed.
    assert_eq!(result.inputs.len(), 4);
    assert!(result.inputs.iter().all(|p| p.sha256.starts_with("sha256:")));
}

#[test]
fn test_result_round_trips_through_disk() {
    let header = "region_id,stratum_id,year,reference_label,predicted_label\n";
    let gp_points = create_test_file(&format!(
        "{}{}{}",
        header,
        eighty_percent_points("great_plains", 2010),
        eighty_percent_points("great_plains", 2011)
    ));
    let southern_points = create_test_file(&format!(
        "{}{}{}",
        header,
        eighty_percent_points("southern", 2010),
        eighty_percent_points("southern", 2011)
    ));

    let areas = "region_id,year,observed_area\n\
                 great_plains,2010,1000\n\
                 great_plains,2011,987.5\n\
                 southern,2010,1000\n\
                 southern,2011,432.1\n";
    let gross = create_test_file(areas);
    let net = create_test_file(areas);

    let paths = InputPaths::new(gross.path(), net.path())
        .with_points(Region::GreatPlains, gp_points.path())
        .with_points(Region::Southern, southern_points.path());

    let pipeline = Cropscope::with_config(single_stratum_config(vec![2010, 2011]));
    let result = pipeline.run(&paths).expect("pipeline failed");

    let dir = tempdir().unwrap();
    let out = dir.path().join("corrected_cropland_area_estimates.json");
    result.save(&out).unwrap();

    let loaded = CombinedResult::load(&out).unwrap();
    assert_eq!(loaded, result);
}

#[test]
fn test_missing_year_surfaces_alignment_error() {
    let header = "region_id,stratum_id,year,reference_label,predicted_label\n";
    let gp_points = create_test_file(&format!(
        "{}{}",
        header,
        eighty_percent_points("great_plains", 2005)
    ));
    let southern_points = create_test_file(&format!(
        "{}{}",
        header,
        eighty_percent_points("southern", 2005)
    ));

    // Southern has no 2005 row in the area table.
    let gross = create_test_file(
        "region_id,year,observed_area\n\
         great_plains,2004,900\n\
         great_plains,2005,1000\n\
         southern,2004,800\n",
    );
    let net = create_test_file(
        "region_id,year,observed_area\n\
         great_plains,2004,900\n\
         great_plains,2005,1000\n\
         southern,2004,800\n\
         southern,2005,810\n",
    );

    let paths = InputPaths::new(gross.path(), net.path())
        .with_points(Region::GreatPlains, gp_points.path())
        .with_points(Region::Southern, southern_points.path());

    let pipeline = Cropscope::with_config(single_stratum_config(vec![2004, 2005]));
    let err = pipeline.run(&paths).unwrap_err();

    match err {
        CropscopeError::Alignment {
            footprint,
            region,
            missing_years,
        } => {
            assert_eq!(footprint, Footprint::Gross);
            assert_eq!(region, "southern");
            assert_eq!(missing_years, vec![2005]);
        }
        other => panic!("expected Alignment, got {:?}", other),
    }
}

#[test]
fn test_zero_base_year_in_full_run() {
    let header = "region_id,stratum_id,year,reference_label,predicted_label\n";
    let gp_points = create_test_file(&format!(
        "{}{}",
        header,
        eighty_percent_points("great_plains", 2010)
    ));
    let southern_points = create_test_file(&format!(
        "{}{}",
        header,
        eighty_percent_points("southern", 2010)
    ));

    let gross = create_test_file(
        "region_id,year,observed_area\n\
         great_plains,2010,1000\n\
         southern,2010,0\n",
    );
    let net = create_test_file(
        "region_id,year,observed_area\n\
         great_plains,2010,1000\n\
         southern,2010,0\n",
    );

    let paths = InputPaths::new(gross.path(), net.path())
        .with_points(Region::GreatPlains, gp_points.path())
        .with_points(Region::Southern, southern_points.path());

    let pipeline = Cropscope::with_config(single_stratum_config(vec![2010]));
    let result = pipeline.run(&paths).unwrap();

    let southern = result.series(Footprint::Gross, "southern").unwrap();
    assert_eq!(southern[0].adjusted, 0.0);
    assert_eq!(southern[0].standard_error, 0.0);

    // Combined equals the Great Plains estimate alone.
    let gp = result.series(Footprint::Gross, "great_plains").unwrap();
    let combined = result.series(Footprint::Gross, COMBINED_KEY).unwrap();
    assert!((combined[0].adjusted - gp[0].adjusted).abs() < 1e-9);
    assert!((combined[0].standard_error - gp[0].standard_error).abs() < 1e-9);
}

#[test]
fn test_unsampled_stratum_marks_series_low_confidence() {
    let header = "region_id,stratum_id,year,reference_label,predicted_label\n";
    // Great Plains config has two strata but only stratum 1 is sampled.
    let gp_points = create_test_file(&format!(
        "{}{}",
        header,
        eighty_percent_points("great_plains", 2010)
    ));
    let southern_points = create_test_file(&format!(
        "{}{}",
        header,
        eighty_percent_points("southern", 2010)
    ));

    let areas = "region_id,year,observed_area\n\
                 great_plains,2010,1000\n\
                 southern,2010,1000\n";
    let gross = create_test_file(areas);
    let net = create_test_file(areas);

    let mut config = single_stratum_config(vec![2010]);
    config.regions[0] = RegionConfig::from_proportions(
        Region::GreatPlains,
        [(Stratum::StableCropland, 0.8), (Stratum::Loss, 0.2)],
        1000.0,
    );

    let paths = InputPaths::new(gross.path(), net.path())
        .with_points(Region::GreatPlains, gp_points.path())
        .with_points(Region::Southern, southern_points.path());

    let result = Cropscope::with_config(config).run(&paths).unwrap();

    let gp = result.series(Footprint::Gross, "great_plains").unwrap();
    assert!(gp[0].low_confidence);
    assert_eq!(gp[0].missing_strata, vec![Stratum::Loss]);

    // The flag propagates into the combined series.
    let combined = result.series(Footprint::Gross, COMBINED_KEY).unwrap();
    assert!(combined[0].low_confidence);
}

#[test]
fn test_default_production_config_is_usable() {
    let config = EstimationConfig::default();
    config.validate().expect("production config must validate");
    assert_eq!(config.years.len(), 26);
    assert!(config.region(Region::GreatPlains).is_some());
    assert!(config.region(Region::Southern).is_some());
}

// =============================================================================
// Presentation Boundary
// =============================================================================

#[test]
fn test_flattened_view_matches_document() {
    let header = "region_id,stratum_id,year,reference_label,predicted_label\n";
    let gp_points = create_test_file(&format!(
        "{}{}",
        header,
        eighty_percent_points("great_plains", 2010)
    ));
    let southern_points = create_test_file(&format!(
        "{}{}",
        header,
        eighty_percent_points("southern", 2010)
    ));

    let areas = "region_id,year,observed_area\n\
                 great_plains,2010,1000\n\
                 southern,2010,1000\n";
    let gross = create_test_file(areas);
    let net = create_test_file(areas);

    let paths = InputPaths::new(gross.path(), net.path())
        .with_points(Region::GreatPlains, gp_points.path())
        .with_points(Region::Southern, southern_points.path());

    let result = Cropscope::with_config(single_stratum_config(vec![2010]))
        .run(&paths)
        .unwrap();

    let rows = cropscope::report::flatten(&result);
    // 2 footprints x 3 region keys x 1 year.
    assert_eq!(rows.len(), 6);

    let combined_row = rows
        .iter()
        .find(|r| r.footprint == Footprint::Gross && r.region_key == COMBINED_KEY)
        .unwrap();
    assert!((combined_row.adjusted - 1600.0).abs() < 1e-9);
}
