use crate::geometry::Path;
use crate::math::Point2;

use super::all_primitives;

/// Nearest point of a path to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// The nearest point on the path.
    pub point: Point2,
    /// Distance from the query point.
    pub distance: f64,
    /// Index of the segment in drawing order, closing lines included.
    pub segment: usize,
    /// Parameter on that segment.
    pub t: f64,
}

/// Finds the point of a path nearest to a given point.
pub struct ClosestPointOnPath<'a> {
    path: &'a Path,
    point: Point2,
}

impl<'a> ClosestPointOnPath<'a> {
    /// Creates a new `ClosestPointOnPath` query.
    #[must_use]
    pub fn new(path: &'a Path, point: Point2) -> Self {
        Self { path, point }
    }

    /// Executes the query. Returns `None` if the path draws nothing.
    #[must_use]
    pub fn execute(&self) -> Option<ClosestPoint> {
        let mut best: Option<ClosestPoint> = None;
        for (segment, prim) in all_primitives(self.path).iter().enumerate() {
            let (distance, t) = prim.distance(&self.point);
            if matches!(best, Some(b) if b.distance <= distance) {
                continue;
            }
            best = Some(ClosestPoint {
                point: prim.compute(t),
                distance,
                segment,
                t,
            });
        }
        best
    }
}
