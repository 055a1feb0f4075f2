//! Input layer: validation point tables and observed-area series.

mod areas;
mod points;
mod source;

pub use areas::{load_area_series, AreaSeries};
pub use points::{load_validation_points, ValidationPoint};
pub use source::InputProvenance;

pub(crate) use source::read_with_provenance;
