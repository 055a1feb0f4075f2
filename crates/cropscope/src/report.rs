//! Presentation adapter: flat views of a result document for external
//! plotting and report code. Boundary only; no rendering beyond plain text.

use serde::{Deserialize, Serialize};

use crate::results::CombinedResult;
use crate::types::Footprint;

/// One row of the flattened result, convenient for tabular consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub footprint: Footprint,
    pub region_key: String,
    pub year: i32,
    pub observed: f64,
    pub adjusted: f64,
    pub standard_error: f64,
    pub ci_95: f64,
    pub low_confidence: bool,
}

/// Flatten a result document into rows.
///
/// Order is stable: footprint (gross, net), then region key in document
/// order, then year ascending.
pub fn flatten(result: &CombinedResult) -> Vec<SeriesRow> {
    let mut rows = Vec::new();

    for footprint in Footprint::all() {
        for (key, region) in &result.footprint(footprint).regions {
            for estimate in &region.total {
                rows.push(SeriesRow {
                    footprint,
                    region_key: key.clone(),
                    year: estimate.year,
                    observed: estimate.observed,
                    adjusted: estimate.adjusted,
                    standard_error: estimate.standard_error,
                    ci_95: estimate.ci_95,
                    low_confidence: estimate.low_confidence,
                });
            }
        }
    }

    rows
}

/// Render a plain-text summary table of the whole document.
pub fn render_summary(result: &CombinedResult) -> String {
    let mut out = String::new();

    for footprint in Footprint::all() {
        out.push_str(&format!("== {} footprint ==\n", footprint.key()));

        for (key, region) in &result.footprint(footprint).regions {
            out.push_str(&format!("-- {} --\n", key));
            out.push_str(&format!(
                "{:>6} {:>14} {:>14} {:>12} {:>12}  {}\n",
                "year", "observed", "adjusted", "se", "ci_95", "flag"
            ));

            for e in &region.total {
                out.push_str(&format!(
                    "{:>6} {:>14.4} {:>14.4} {:>12.4} {:>12.4}  {}\n",
                    e.year,
                    e.observed,
                    e.adjusted,
                    e.standard_error,
                    e.ci_95,
                    if e.low_confidence { "low-confidence" } else { "" }
                ));
            }
        }
        out.push('\n');
    }

    out
}
