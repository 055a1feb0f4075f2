//! Core domain enums: regions, footprint types, strata, and class labels.
//!
//! The study area is split into two independently validated subregions and
//! the classifier output is tracked under two footprint definitions, so all
//! four enums here are closed sets with stable string/code forms used in CSV
//! inputs and JSON result keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A validated subregion of the study area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Great Plains subregion (US/Canada).
    GreatPlains,
    /// Southern subregion (US/Mexico).
    Southern,
}

impl Region {
    /// Stable string key used in CSV inputs and result documents.
    pub fn key(&self) -> &'static str {
        match self {
            Region::GreatPlains => "great_plains",
            Region::Southern => "southern",
        }
    }

    /// All regions, in canonical order.
    pub fn all() -> [Region; 2] {
        [Region::GreatPlains, Region::Southern]
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "great_plains" | "great plains" | "gp" => Ok(Region::GreatPlains),
            "southern" | "mexico" | "mx" => Ok(Region::Southern),
            other => Err(format!(
                "Unknown region: '{}'. Use great_plains or southern.",
                other
            )),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Cropland footprint definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Footprint {
    /// Cumulative area ever classified as cropland.
    Gross,
    /// Area classified as actively cropped in a given year.
    Net,
}

impl Footprint {
    /// Stable string key used in result documents.
    pub fn key(&self) -> &'static str {
        match self {
            Footprint::Gross => "gross",
            Footprint::Net => "net",
        }
    }

    /// Both footprint types, in canonical order.
    pub fn all() -> [Footprint; 2] {
        [Footprint::Gross, Footprint::Net]
    }
}

impl FromStr for Footprint {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gross" | "total" => Ok(Footprint::Gross),
            "net" | "active" => Ok(Footprint::Net),
            other => Err(format!("Unknown footprint: '{}'. Use gross or net.", other)),
        }
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A sampling stratum from the validation design.
///
/// Validation points are drawn per stratum with known area proportions.
/// Numeric codes 1-5 match the stratum column of the point tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stratum {
    /// Likely stable cropland (code 1).
    StableCropland,
    /// Cropland gain (code 2).
    Gain,
    /// Cropland loss (code 3).
    Loss,
    /// Likely stable non-cropland (code 4).
    StableNonCropland,
    /// Possible classification errors (code 5).
    PossibleError,
}

impl Stratum {
    /// Numeric code as used in validation point tables.
    pub fn code(&self) -> u8 {
        match self {
            Stratum::StableCropland => 1,
            Stratum::Gain => 2,
            Stratum::Loss => 3,
            Stratum::StableNonCropland => 4,
            Stratum::PossibleError => 5,
        }
    }

    /// Parse a numeric stratum code.
    pub fn from_code(code: u8) -> Option<Stratum> {
        match code {
            1 => Some(Stratum::StableCropland),
            2 => Some(Stratum::Gain),
            3 => Some(Stratum::Loss),
            4 => Some(Stratum::StableNonCropland),
            5 => Some(Stratum::PossibleError),
            _ => None,
        }
    }

    /// All five strata, in code order.
    pub fn all() -> [Stratum; 5] {
        [
            Stratum::StableCropland,
            Stratum::Gain,
            Stratum::Loss,
            Stratum::StableNonCropland,
            Stratum::PossibleError,
        ]
    }
}

impl fmt::Display for Stratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stratum::StableCropland => "stable_cropland",
            Stratum::Gain => "gain",
            Stratum::Loss => "loss",
            Stratum::StableNonCropland => "stable_non_cropland",
            Stratum::PossibleError => "possible_error",
        };
        f.write_str(name)
    }
}

/// Binary land-cover label, for both reference and predicted classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    NonCropland,
    Cropland,
}

impl Label {
    /// Parse the 0/1 encoding used in point tables.
    pub fn from_code(code: u8) -> Option<Label> {
        match code {
            0 => Some(Label::NonCropland),
            1 => Some(Label::Cropland),
            _ => None,
        }
    }

    pub fn is_cropland(&self) -> bool {
        matches!(self, Label::Cropland)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_key_round_trip() {
        for region in Region::all() {
            assert_eq!(region.key().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn test_region_aliases() {
        assert_eq!("GREAT PLAINS".parse::<Region>().unwrap(), Region::GreatPlains);
        assert_eq!("mexico".parse::<Region>().unwrap(), Region::Southern);
        assert!("atlantis".parse::<Region>().is_err());
    }

    #[test]
    fn test_stratum_codes() {
        for stratum in Stratum::all() {
            assert_eq!(Stratum::from_code(stratum.code()), Some(stratum));
        }
        assert_eq!(Stratum::from_code(0), None);
        assert_eq!(Stratum::from_code(6), None);
    }

    #[test]
    fn test_label_codes() {
        assert_eq!(Label::from_code(0), Some(Label::NonCropland));
        assert_eq!(Label::from_code(1), Some(Label::Cropland));
        assert_eq!(Label::from_code(2), None);
        assert!(Label::Cropland.is_cropland());
        assert!(!Label::NonCropland.is_cropland());
    }

    #[test]
    fn test_footprint_parse() {
        assert_eq!("total".parse::<Footprint>().unwrap(), Footprint::Gross);
        assert_eq!("active".parse::<Footprint>().unwrap(), Footprint::Net);
    }
}
