//! Polygon geometry on a precomputed unit circle

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::gaps::GapSequence;

/// Default tolerance for "strictly larger area" comparisons.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// A point in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Cartesian coordinates of the `n` marked points on the unit circle.
///
/// Point `i` sits at angle `2πi/n`. The table is built once per solve and
/// only read afterwards.
#[derive(Debug, Clone)]
pub struct CircleTable {
    points: Vec<Point>,
}

impl CircleTable {
    pub fn new(n: u32) -> Self {
        let points = (0..n)
            .map(|i| {
                let angle = TAU * (f64::from(i) / f64::from(n));
                Point {
                    x: angle.cos(),
                    y: angle.sin(),
                }
            })
            .collect();
        CircleTable { points }
    }

    /// Number of marked points (`n`).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Point {
        self.points[index % self.points.len()]
    }

    /// Vertex coordinates of the counters described by `state`.
    ///
    /// The first counter sits on point 0 and each following counter is
    /// offset by the preceding gap, wrapping modulo `n`.
    pub fn coordinates(&self, state: &GapSequence) -> Vec<Point> {
        let mut coordinates = Vec::with_capacity(state.len());
        let mut index = 0usize;
        for &gap in state.gaps() {
            coordinates.push(self.point(index));
            index += gap as usize;
        }
        coordinates
    }

    /// Area of the polygon spanned by the counters of `state`.
    pub fn area(&self, state: &GapSequence) -> f64 {
        polygon_area(&self.coordinates(state))
    }
}

/// Absolute area of a simple polygon via the shoelace formula.
///
/// Accepts vertices in either winding order.
pub fn polygon_area(vertices: &[Point]) -> f64 {
    let Some(&last) = vertices.last() else {
        return 0.0;
    };

    let mut twice_area = 0.0;
    let mut prev = last;
    for &current in vertices {
        twice_area += (prev.x + current.x) * (prev.y - current.y);
        prev = current;
    }
    (twice_area / 2.0).abs()
}
