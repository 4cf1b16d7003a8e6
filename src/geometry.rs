//! Geometry helpers consumed by the angle pipeline.
//!
//! Every function tolerates an empty point set: the centroid and bounds of
//! nothing are the origin, and distances collapse to zero.

use glam::DVec2;

use crate::types::{Bounds, Point};

/// Arithmetic mean of all point positions, or `over` when it is finite.
pub fn centroid(points: &[Point], over: Option<DVec2>) -> DVec2 {
    if let Some(c) = over.filter(|c| c.is_finite()) {
        return c;
    }
    if points.is_empty() {
        return DVec2::ZERO;
    }
    let sum: DVec2 = points.iter().map(|p| p.pos).sum();
    sum / points.len() as f64
}

/// Min/max of x and y; all zero for an empty set.
pub fn bounds(points: &[Point]) -> Bounds {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return Bounds::default();
    };
    let mut b = Bounds::at(first.pos);
    for p in iter {
        b.expand(p.pos);
    }
    b
}

/// Map a coordinate in [-1,1] space onto the board.
///
/// The natural centroid is the origin of that space and one unit spans half
/// of the larger bounding-box dimension.
pub fn normalized_to_absolute(coord: DVec2, points: &[Point]) -> DVec2 {
    let half = bounds(points).extent() / 2.0;
    centroid(points, None) + coord * half
}

/// Largest distance from `center` over the set, 0 when empty.
pub fn max_distance(points: &[Point], center: DVec2) -> f64 {
    points
        .iter()
        .map(|p| p.pos.distance(center))
        .fold(0.0, f64::max)
}
