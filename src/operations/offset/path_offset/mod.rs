mod cleanup;
mod divide;
mod filter;
mod joints;
pub mod raw_offset;
mod resolve;
mod split;

pub use joints::JointSet;
pub use resolve::{Resolved, TopologyResolver};

use tracing::debug;

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{Path, Primitive};
use crate::math::PATH_TOLERANCE;

use super::Corner;

/// Offsets a path by a signed distance along the right-hand normal of each
/// segment.
///
/// For a counter-clockwise contour (y up) a positive distance grows the
/// outline and a negative one shrinks it. Every subpath is offset, joined at
/// its corners and then repaired as one chain, so the result may contain
/// more or fewer paths than the input.
#[derive(Debug)]
pub struct PathOffset2D {
    path: Path,
    distance: f64,
    corner: Corner,
    tolerance: f64,
}

impl PathOffset2D {
    /// Creates a new path offset operation with bevel corners and the
    /// default tolerance.
    #[must_use]
    pub fn new(path: Path, distance: f64) -> Self {
        Self {
            path,
            distance,
            corner: Corner::default(),
            tolerance: PATH_TOLERANCE,
        }
    }

    #[must_use]
    pub fn with_corner(mut self, corner: Corner) -> Self {
        self.corner = corner;
        self
    }

    /// Sets the distance under which endpoints and joints are considered
    /// the same point.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the offset, returning the resulting paths.
    ///
    /// A zero distance returns the input path unchanged; a path with fewer
    /// than two elements yields no paths.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Unsupported` for miter and round corners and
    /// `OperationError::InvalidInput` if the distance is not finite or the
    /// tolerance is not a positive number. Returns
    /// `GeometryError::NonFinite` if the path has a non-finite coordinate.
    pub fn execute(&self) -> Result<Vec<Path>> {
        if self.corner != Corner::Bevel {
            return Err(OperationError::Unsupported(format!(
                "{:?} corners are not implemented",
                self.corner
            ))
            .into());
        }
        if !self.distance.is_finite() {
            return Err(
                OperationError::InvalidInput("offset distance must be finite".to_owned()).into(),
            );
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(OperationError::InvalidInput(
                "tolerance must be a positive number".to_owned(),
            )
            .into());
        }

        if !self.path.is_finite() {
            return Err(GeometryError::NonFinite("path").into());
        }

        if self.distance == 0.0 {
            return Ok(vec![self.path.clone()]);
        }
        if self.path.len() < 2 {
            return Ok(Vec::new());
        }

        let subpaths = self.path.subpaths(self.tolerance);
        let originals: Vec<Primitive> = subpaths
            .iter()
            .flat_map(|sub| sub.primitives.iter().copied())
            .collect();
        let raw: Vec<Primitive> = subpaths
            .iter()
            .flat_map(|sub| raw_offset::build(sub, self.distance, self.tolerance))
            .collect();
        debug!(
            subpaths = subpaths.len(),
            originals = originals.len(),
            raw = raw.len(),
            "raw offset built"
        );

        let resolver = TopologyResolver::new(self.tolerance);
        let resolved = resolver.resolve(&raw);
        let groups = resolver.extract_groups(&resolved, &originals, self.distance);
        Ok(Path::from_groups(&groups, self.tolerance))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::PathkernError;
    use crate::math::bounds_2d::Aabb2;
    use crate::math::Point2;
    use crate::operations::query::{PathBounds, SelfIntersections};

    fn init_tracing() {
        let env_filter = tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .try_init();
    }

    fn rectangle() -> Path {
        Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .line_to(Point2::new(50.0, 0.0))
            .line_to(Point2::new(50.0, 50.0))
            .line_to(Point2::new(0.0, 50.0))
            .close()
    }

    fn circle(r: f64) -> Path {
        let k = r * 0.552_284_749_830_793_4;
        Path::new()
            .move_to(Point2::new(r, 0.0))
            .curve_to(Point2::new(r, k), Point2::new(k, r), Point2::new(0.0, r))
            .curve_to(Point2::new(-k, r), Point2::new(-r, k), Point2::new(-r, 0.0))
            .curve_to(Point2::new(-r, -k), Point2::new(-k, -r), Point2::new(0.0, -r))
            .curve_to(Point2::new(k, -r), Point2::new(r, -k), Point2::new(r, 0.0))
            .close()
    }

    fn chain(path: &Path) -> Vec<Primitive> {
        path.subpaths(PATH_TOLERANCE)
            .into_iter()
            .flat_map(|s| s.primitives)
            .collect()
    }

    fn bounds(path: &Path) -> Aabb2 {
        PathBounds::new(path).execute().unwrap()
    }

    fn assert_bounds(b: &Aabb2, min: (f64, f64), max: (f64, f64)) {
        assert_abs_diff_eq!(b.min.x, min.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.min.y, min.1, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max.x, max.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max.y, max.1, epsilon = 1e-9);
    }

    #[test]
    fn rectangle_outward_offset() {
        init_tracing();
        let result = PathOffset2D::new(rectangle(), 5.0).execute().unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].subpaths(PATH_TOLERANCE)[0].closed);
        assert_bounds(&bounds(&result[0]), (-5.0, -5.0), (55.0, 55.0));
    }

    #[test]
    fn rectangle_inward_offset() {
        init_tracing();
        let result = PathOffset2D::new(rectangle(), -5.0).execute().unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].subpaths(PATH_TOLERANCE)[0].closed);
        assert_bounds(&bounds(&result[0]), (5.0, 5.0), (45.0, 45.0));
    }

    #[test]
    fn rectangle_collapses_when_offset_past_half_width() {
        let result = PathOffset2D::new(rectangle(), -30.0).execute().unwrap();
        assert!(result.is_empty(), "result={result:?}");
    }

    #[test]
    fn concave_outline_shrinks_to_one_loop() {
        let l_shape = Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .line_to(Point2::new(60.0, 0.0))
            .line_to(Point2::new(60.0, 20.0))
            .line_to(Point2::new(20.0, 20.0))
            .line_to(Point2::new(20.0, 60.0))
            .line_to(Point2::new(0.0, 60.0))
            .close();
        let result = PathOffset2D::new(l_shape.clone(), -4.0).execute().unwrap();
        assert_eq!(result.len(), 1);
        assert_bounds(&bounds(&result[0]), (4.0, 4.0), (56.0, 56.0));

        // Both arms are 20 wide, so shrinking by 12 leaves nothing.
        let collapsed = PathOffset2D::new(l_shape, -12.0).execute().unwrap();
        assert!(collapsed.is_empty());
    }

    #[test]
    fn zero_distance_returns_input() {
        let result = PathOffset2D::new(rectangle(), 0.0).execute().unwrap();
        assert_eq!(result, vec![rectangle()]);
    }

    #[test]
    fn single_element_path_yields_nothing() {
        let path = Path::new().move_to(Point2::new(1.0, 1.0));
        assert!(PathOffset2D::new(path, 3.0).execute().unwrap().is_empty());
    }

    #[test]
    fn grow_and_shrink_are_symmetric() {
        let grown = PathOffset2D::new(rectangle(), 3.0).execute().unwrap();
        let shrunk = PathOffset2D::new(rectangle(), -3.0).execute().unwrap();
        assert!(SelfIntersections::new(&grown[0]).execute().is_empty());
        assert!(SelfIntersections::new(&shrunk[0]).execute().is_empty());
        let outer = bounds(&grown[0]);
        let inner = bounds(&shrunk[0]);
        assert_abs_diff_eq!(outer.width() - 50.0, 50.0 - inner.width(), epsilon = 1e-9);
        assert_abs_diff_eq!(outer.height() - 50.0, 50.0 - inner.height(), epsilon = 1e-9);
    }

    #[test]
    fn curved_outline_offsets_are_clean_and_stable() {
        init_tracing();
        let resolver = TopologyResolver::default();
        assert!(SelfIntersections::new(&circle(20.0)).execute().is_empty());
        let once = resolver.resolve(&chain(&circle(20.0)));
        assert_eq!(once.segments, chain(&circle(20.0)));

        for (distance, radius) in [(5.0, 25.0), (-5.0, 15.0)] {
            let result = PathOffset2D::new(circle(20.0), distance).execute().unwrap();
            assert_eq!(result.len(), 1, "distance={distance}");
            let b = bounds(&result[0]);
            assert_abs_diff_eq!(b.max.x, radius, epsilon = 0.2);
            assert_abs_diff_eq!(b.min.y, -radius, epsilon = 0.2);

            let points = SelfIntersections::new(&result[0]).execute();
            assert!(points.is_empty(), "distance={distance} points={points:?}");

            let once = resolver.resolve(&chain(&result[0]));
            assert!(once.intersections.is_empty());
            assert_eq!(resolver.resolve(&once.segments), once);
        }
    }

    #[test]
    fn offset_result_resolves_to_itself() {
        let result = PathOffset2D::new(rectangle(), -5.0).execute().unwrap();
        let segments = chain(&result[0]);
        let resolver = TopologyResolver::default();
        let once = resolver.resolve(&segments);
        assert_eq!(once.segments, segments);
        assert_eq!(resolver.resolve(&once.segments), once);
    }

    #[test]
    fn open_curve_offset_stays_at_distance() {
        let path = Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .curve_to(
                Point2::new(0.0, 20.0),
                Point2::new(40.0, 20.0),
                Point2::new(40.0, 0.0),
            );
        let original = path.subpaths(PATH_TOLERANCE).remove(0).primitives[0];
        let result = PathOffset2D::new(path, 2.0).execute().unwrap();
        assert_eq!(result.len(), 1);
        for sub in result[0].subpaths(PATH_TOLERANCE) {
            assert!(!sub.closed);
            for seg in &sub.primitives {
                let (dist, _) = original.distance(&seg.compute(0.5));
                assert!((dist - 2.0).abs() < 0.1, "dist={dist}");
            }
        }
    }

    #[test]
    fn miter_and_round_are_unsupported() {
        for corner in [Corner::Miter, Corner::Round] {
            let err = PathOffset2D::new(rectangle(), 5.0)
                .with_corner(corner)
                .execute()
                .unwrap_err();
            assert!(matches!(
                err,
                PathkernError::Operation(OperationError::Unsupported(_))
            ));
        }
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(PathOffset2D::new(rectangle(), f64::NAN).execute().is_err());
        assert!(PathOffset2D::new(rectangle(), 1.0)
            .with_tolerance(0.0)
            .execute()
            .is_err());
        let bad = rectangle().line_to(Point2::new(f64::INFINITY, 0.0));
        assert!(matches!(
            PathOffset2D::new(bad, 1.0).execute(),
            Err(PathkernError::Geometry(GeometryError::NonFinite(_)))
        ));
    }
}
