use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An inclusive run of consecutive dial values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ValueRange {
    pub start: u8,
    pub end: u8,
}

impl ValueRange {
    pub fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    pub fn single(point: u8) -> Self {
        Self::new(point, point)
    }

    /// Number of points covered.
    pub fn point_count(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }
}

/// Collapses scattered dial points into the fewest inclusive ranges covering exactly them.
///
/// `[1, 2, 3, 5, 6]` becomes `[1..=3, 5..=6]`. Input order and duplicates do not matter;
/// the output is ascending and no two ranges touch or overlap.
pub fn merge_ranges<I>(points: I) -> Vec<ValueRange>
where
    I: IntoIterator<Item = u8>,
{
    let sorted: BTreeSet<u8> = points.into_iter().collect();
    let mut ranges: Vec<ValueRange> = Vec::new();

    for point in sorted {
        match ranges.last_mut() {
            Some(current) if u16::from(current.end) + 1 == u16::from(point) => current.end = point,
            _ => ranges.push(ValueRange::single(point)),
        }
    }

    ranges
}
