//! Cropscope: bias-corrected cropland area estimation.
//!
//! Cropscope converts a remote-sensing classifier's raw (observed) cropland
//! area time series into bias-adjusted estimates with standard errors, using
//! stratified validation samples and the Olofsson et al. (2014) methodology.
//! Each subregion is estimated independently, then combined into a single
//! regional series per footprint type (gross and net).
//!
//! # Core Principles
//!
//! - **Pure computation**: accuracy summaries, area adjustment, and regional
//!   combination are side-effect-free functions over immutable tables
//! - **No silent defaults**: configuration and alignment problems are
//!   structured errors; small-sample strata are flagged, never zeroed
//! - **Round-trip persistence**: the result document reloads field-for-field
//!
//! # Example
//!
//! ```no_run
//! use cropscope::{Cropscope, InputPaths, Region};
//!
//! let paths = InputPaths::new("gross.csv", "net.csv")
//!     .with_points(Region::GreatPlains, "gp_points.csv")
//!     .with_points(Region::Southern, "southern_points.csv");
//!
//! let result = Cropscope::new().run(&paths).unwrap();
//! result.save("corrected_cropland_area_estimates.json").unwrap();
//! ```

pub mod accuracy;
pub mod combine;
pub mod config;
pub mod error;
pub mod estimate;
pub mod input;
pub mod report;
pub mod results;
pub mod types;

mod pipeline;

pub use accuracy::{summarize_strata, ConfusionCounts, StratumAccuracy};
pub use config::{EstimationConfig, RegionConfig};
pub use error::{CropscopeError, Result};
pub use estimate::AdjustedEstimate;
pub use input::{AreaSeries, InputProvenance, ValidationPoint};
pub use pipeline::{Cropscope, InputPaths};
pub use results::{CombinedResult, FootprintResults, RegionSeries, COMBINED_KEY};
pub use types::{Footprint, Label, Region, Stratum};
