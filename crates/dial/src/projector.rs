use serde::{Deserialize, Serialize};

use crate::SCALE_MAX;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, origin: Point) -> Self {
        Self {
            x: self.x + origin.x,
            y: self.y + origin.y,
        }
    }
}

/// Maps a dial value in `0..=100` onto a semicircle of `radius` centered at the origin.
///
/// Linear in angle: value `v` sits at `180 - v * 1.8` degrees, measured
/// counter-clockwise from the positive x axis, with the y axis flipped.
pub fn project(value: f64, radius: f64) -> Point {
    let angle = value / SCALE_MAX * 180.0;
    let effective = (180.0 - angle).to_radians();
    Point {
        x: radius * snap(effective.cos()),
        y: -radius * snap(effective.sin()),
    }
}

/// [`project`] translated so the semicircle is centered on `origin`.
pub fn project_from(origin: Point, value: f64, radius: f64) -> Point {
    project(value, radius).offset(origin)
}

// cos(pi/2) and sin(pi) are ~1e-16 in f64; the dial ends and midpoint must land exactly.
fn snap(component: f64) -> f64 {
    if component.abs() < 1e-12 {
        0.0
    } else {
        component
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn dial_ends_and_midpoint_are_exact() {
        for radius in [1.0, 85.0, 90.0, 95.0, 100.0] {
            assert_eq!(project(0.0, radius), Point::new(-radius, 0.0));
            assert_eq!(project(50.0, radius), Point::new(0.0, -radius));
            assert_eq!(project(100.0, radius), Point::new(radius, 0.0));
        }
    }

    #[test]
    fn quarter_marks_sit_on_the_diagonals() {
        let p = project(25.0, 100.0);
        let expected = 100.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert!((p.x + expected).abs() < 1e-9);
        assert!((p.y + expected).abs() < 1e-9);
    }

    #[test]
    fn project_from_translates_by_origin() {
        let p = project_from(Point::new(100.0, 100.0), 50.0, 90.0);
        assert_eq!(p, Point::new(100.0, 10.0));
    }

    proptest! {
        #[test]
        fn x_is_monotonic_in_value(a in 0u32..=1000, b in 0u32..=1000, radius in 1.0f64..500.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo = project(f64::from(lo) / 10.0, radius);
            let hi = project(f64::from(hi) / 10.0, radius);
            prop_assert!(lo.x <= hi.x + 1e-9);
        }

        #[test]
        fn points_stay_on_the_upper_semicircle(value in 0.0f64..=100.0, radius in 1.0f64..500.0) {
            let p = project(value, radius);
            prop_assert!(p.y <= 0.0);
            prop_assert!(((p.x * p.x + p.y * p.y).sqrt() - radius).abs() < 1e-6 * radius);
        }
    }
}
