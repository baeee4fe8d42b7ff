use crate::geometry::{Path, Primitive};
use crate::math::{length, Point2, PATH_TOLERANCE};

use super::all_primitives;

/// Points where a path crosses itself.
pub struct SelfIntersections<'a> {
    path: &'a Path,
    tolerance: f64,
}

impl<'a> SelfIntersections<'a> {
    /// Creates a new `SelfIntersections` query. Crossings closer than the
    /// default path tolerance are reported once.
    #[must_use]
    pub fn new(path: &'a Path) -> Self {
        Self {
            path,
            tolerance: PATH_TOLERANCE,
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the query, returning the crossing points.
    ///
    /// Neighbouring segments meeting at a shared end point do not count.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let prims = all_primitives(self.path);
        let mut points = Vec::new();
        for (i, a) in prims.iter().enumerate() {
            for hit in a.self_intersects() {
                push_unique(&mut points, a.compute(hit.t_self), self.tolerance);
            }
            for b in &prims[i + 1..] {
                for hit in a.intersects(b) {
                    push_unique(&mut points, a.compute(hit.t_self), self.tolerance);
                }
            }
        }
        points
    }
}

/// Points where two paths cross each other.
pub struct PathIntersections<'a> {
    first: &'a Path,
    second: &'a Path,
    tolerance: f64,
}

impl<'a> PathIntersections<'a> {
    /// Creates a new `PathIntersections` query.
    #[must_use]
    pub fn new(first: &'a Path, second: &'a Path) -> Self {
        Self {
            first,
            second,
            tolerance: PATH_TOLERANCE,
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the query, returning the crossing points on `first`.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let others: Vec<Primitive> = all_primitives(self.second);
        let mut points = Vec::new();
        for a in all_primitives(self.first) {
            for b in &others {
                if !a.overlaps(b) {
                    continue;
                }
                for hit in a.intersects(b) {
                    push_unique(&mut points, a.compute(hit.t_self), self.tolerance);
                }
            }
        }
        points
    }
}

fn push_unique(points: &mut Vec<Point2>, p: Point2, tolerance: f64) {
    if points.iter().all(|q| length(q, &p) >= tolerance) {
        points.push(p);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn bow_tie() -> Path {
        Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .line_to(Point2::new(10.0, 10.0))
            .line_to(Point2::new(10.0, 0.0))
            .line_to(Point2::new(0.0, 10.0))
            .close()
    }

    #[test]
    fn bow_tie_crosses_once() {
        let points = SelfIntersections::new(&bow_tie()).execute();
        assert_eq!(points.len(), 1);
        assert_abs_diff_eq!(points[0].x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[0].y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn looped_curve_is_reported() {
        let path = Path::new().move_to(Point2::new(0.0, 0.0)).curve_to(
            Point2::new(30.0, 30.0),
            Point2::new(-10.0, 30.0),
            Point2::new(20.0, 0.0),
        );
        let points = SelfIntersections::new(&path).execute();
        assert!(!points.is_empty());
        for p in &points {
            assert!(length(p, &points[0]) < 1.0, "points={points:?}");
        }
    }

    #[test]
    fn simple_square_has_no_self_intersection() {
        let square = Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .line_to(Point2::new(10.0, 0.0))
            .line_to(Point2::new(10.0, 10.0))
            .line_to(Point2::new(0.0, 10.0))
            .close();
        assert!(SelfIntersections::new(&square).execute().is_empty());
    }

    #[test]
    fn line_crosses_arch_twice() {
        let arch = Path::new().move_to(Point2::new(0.0, 0.0)).curve_to(
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
        );
        let line = Path::new()
            .move_to(Point2::new(-5.0, 5.0))
            .line_to(Point2::new(15.0, 5.0));
        let points = PathIntersections::new(&arch, &line).execute();
        assert_eq!(points.len(), 2);
        for p in &points {
            assert_abs_diff_eq!(p.y, 5.0, epsilon = 1e-6);
        }
    }
}
