use serde::{Deserialize, Serialize};

use crate::{
    projector::{project, Point},
    ranges::ValueRange,
    SCALE_MAX, SCALE_MIN,
};

/// Widening applied to each end of a range so neighbouring arcs overlap instead of leaving a seam.
pub const SEAM_PADDING: f64 = 0.1;
/// Padded spans wider than this many dial units use large-arc routing.
pub const LARGE_ARC_SPAN: f64 = 50.0;

/// Paint hints passed through untouched for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcStyle {
    pub color: String,
    pub opacity: f32,
}

impl ArcStyle {
    pub fn new(color: impl Into<String>, opacity: f32) -> Self {
        Self {
            color: color.into(),
            opacity,
        }
    }
}

/// Everything a 2D vector path renderer needs to draw one arc of the dial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcDescriptor {
    pub padded_start: f64,
    pub padded_end: f64,
    pub start: Point,
    pub end: Point,
    pub radius: f64,
    pub large_arc: bool,
    /// Always `true`: arcs run clockwise on screen from `start` to `end`.
    pub sweep: bool,
    pub style: ArcStyle,
}

impl ArcDescriptor {
    /// SVG path data for this arc with the dial center at `origin`.
    pub fn svg_path(&self, origin: Point) -> String {
        let start = self.start.offset(origin);
        let end = self.end.offset(origin);
        format!(
            "M {} {} A {} {} 0 {} {} {} {}",
            start.x,
            start.y,
            self.radius,
            self.radius,
            u8::from(self.large_arc),
            u8::from(self.sweep),
            end.x,
            end.y
        )
    }
}

pub fn is_large_arc(padded_start: f64, padded_end: f64) -> bool {
    padded_end - padded_start > LARGE_ARC_SPAN
}

/// Builds the arc covering `range` on a dial of `radius`.
///
/// Each end is pushed out by [`SEAM_PADDING`] but never past the ends of the scale.
pub fn build_arc(range: ValueRange, radius: f64, style: ArcStyle) -> ArcDescriptor {
    let padded_start = (f64::from(range.start) - SEAM_PADDING).max(SCALE_MIN);
    let padded_end = (f64::from(range.end) + SEAM_PADDING).min(SCALE_MAX);

    ArcDescriptor {
        padded_start,
        padded_end,
        start: project(padded_start, radius),
        end: project(padded_end, radius),
        radius,
        large_arc: is_large_arc(padded_start, padded_end),
        sweep: true,
        style,
    }
}

#[cfg(test)]
#[path = "tests/arc_tests.rs"]
mod tests;
