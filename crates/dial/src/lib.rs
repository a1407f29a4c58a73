//! Geometry for the semicircular guessing dial.
//!
//! Values live on a 0..=100 scale. `0` sits at the left end of the arc, `50` at
//! the top and `100` at the right end. Coordinates are screen oriented: `y`
//! grows downwards, so points above the center have negative `y`.

pub mod arc;
pub mod projector;
pub mod ranges;

pub use arc::{build_arc, is_large_arc, ArcDescriptor, ArcStyle, LARGE_ARC_SPAN, SEAM_PADDING};
pub use projector::{project, project_from, Point};
pub use ranges::{merge_ranges, ValueRange};

/// Lowest value on the dial.
pub const SCALE_MIN: f64 = 0.0;
/// Highest value on the dial.
pub const SCALE_MAX: f64 = 100.0;
