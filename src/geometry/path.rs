use crate::math::{length, Point2};

use super::segment::{CurveSeg, LineSeg, Primitive};

/// One drawing command of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEl {
    /// Starts a new subpath at the point.
    MoveTo(Point2),
    /// Straight segment from the current point.
    LineTo(Point2),
    /// Cubic bezier from the current point.
    CurveTo {
        ctrl1: Point2,
        ctrl2: Point2,
        to: Point2,
    },
    /// Closes the current subpath back to its start point.
    ClosePath,
}

/// A path as an ordered list of drawing commands.
///
/// Commands issued before the first `MoveTo` start at the origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathEl>,
}

/// A decomposed subpath: its primitives in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub primitives: Vec<Primitive>,
    /// `true` if the subpath ended with `ClosePath`.
    pub closed: bool,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_elements(elements: Vec<PathEl>) -> Self {
        Self { elements }
    }

    #[must_use]
    pub fn elements(&self) -> &[PathEl] {
        &self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, el: PathEl) {
        self.elements.push(el);
    }

    #[must_use]
    pub fn move_to(mut self, p: Point2) -> Self {
        self.push(PathEl::MoveTo(p));
        self
    }

    #[must_use]
    pub fn line_to(mut self, p: Point2) -> Self {
        self.push(PathEl::LineTo(p));
        self
    }

    #[must_use]
    pub fn curve_to(mut self, ctrl1: Point2, ctrl2: Point2, to: Point2) -> Self {
        self.push(PathEl::CurveTo { ctrl1, ctrl2, to });
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        self.push(PathEl::ClosePath);
        self
    }

    /// `true` if every coordinate of the path is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        let finite = |p: &Point2| p.x.is_finite() && p.y.is_finite();
        self.elements.iter().all(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => finite(p),
            PathEl::CurveTo { ctrl1, ctrl2, to } => finite(ctrl1) && finite(ctrl2) && finite(to),
            PathEl::ClosePath => true,
        })
    }

    /// Decomposes the path into subpaths of primitives.
    ///
    /// Segments shorter than `tolerance` are skipped, so consecutive
    /// primitives always share an exact endpoint. `ClosePath` adds the
    /// closing line back to the subpath start unless it would be degenerate.
    /// Subpaths without primitives are dropped.
    #[must_use]
    pub fn subpaths(&self, tolerance: f64) -> Vec<Subpath> {
        let mut out = Vec::new();
        let mut current: Vec<Primitive> = Vec::new();
        let mut pre_point = Point2::origin();
        let mut last_moved = Point2::origin();

        for el in &self.elements {
            match *el {
                PathEl::MoveTo(p) => {
                    flush(&mut out, &mut current, false);
                    pre_point = p;
                    last_moved = p;
                }
                PathEl::LineTo(p) => {
                    if length(&pre_point, &p) >= tolerance {
                        current.push(LineSeg::new(pre_point, p).into());
                        pre_point = p;
                    }
                }
                PathEl::CurveTo { ctrl1, ctrl2, to } => {
                    let points = [pre_point, ctrl1, ctrl2, to];
                    if points.iter().any(|p| length(&pre_point, p) >= tolerance) {
                        current.push(CurveSeg::from_points(points).into());
                        pre_point = to;
                    }
                }
                PathEl::ClosePath => {
                    if current.is_empty() {
                        continue;
                    }
                    if length(&pre_point, &last_moved) >= tolerance {
                        current.push(LineSeg::new(pre_point, last_moved).into());
                    }
                    flush(&mut out, &mut current, true);
                    pre_point = last_moved;
                }
            }
        }
        flush(&mut out, &mut current, false);
        out
    }

    /// Re-encodes groups of chained primitives as paths, one per non-empty
    /// group. A group is closed when its last end point is within
    /// `tolerance` of its first start point.
    #[must_use]
    pub fn from_groups(groups: &[Vec<Primitive>], tolerance: f64) -> Vec<Self> {
        groups
            .iter()
            .filter_map(|group| {
                let first = group.first()?;
                let last = group.last()?;
                let mut path = Self::new().move_to(first.p1());
                for prim in group {
                    path = match prim {
                        Primitive::Line(l) => path.line_to(l.p2),
                        Primitive::Curve(c) => path.curve_to(c.c1(), c.c2(), c.p2()),
                    };
                }
                if length(&last.p2(), &first.p1()) < tolerance {
                    path = path.close();
                }
                Some(path)
            })
            .collect()
    }
}

fn flush(out: &mut Vec<Subpath>, current: &mut Vec<Primitive>, closed: bool) {
    if current.is_empty() {
        return;
    }
    out.push(Subpath {
        primitives: std::mem::take(current),
        closed,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PATH_TOLERANCE;

    fn square() -> Path {
        Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .line_to(Point2::new(50.0, 0.0))
            .line_to(Point2::new(50.0, 50.0))
            .line_to(Point2::new(0.0, 50.0))
            .close()
    }

    #[test]
    fn close_synthesizes_closing_line() {
        let subs = square().subpaths(PATH_TOLERANCE);
        assert_eq!(subs.len(), 1);
        assert!(subs[0].closed);
        assert_eq!(subs[0].primitives.len(), 4);
        let last = subs[0].primitives[3];
        assert_eq!(last.p1(), Point2::new(0.0, 50.0));
        assert_eq!(last.p2(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn explicit_closing_line_is_not_duplicated() {
        let path = Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .line_to(Point2::new(10.0, 0.0))
            .line_to(Point2::new(10.0, 10.0))
            .line_to(Point2::new(0.0, 0.0))
            .close();
        let subs = path.subpaths(PATH_TOLERANCE);
        assert_eq!(subs[0].primitives.len(), 3);
    }

    #[test]
    fn degenerate_segments_are_skipped() {
        let path = Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .line_to(Point2::new(10.0, 0.0))
            .line_to(Point2::new(10.1, 0.0))
            .line_to(Point2::new(10.0, 10.0));
        let subs = path.subpaths(PATH_TOLERANCE);
        assert_eq!(subs.len(), 1);
        assert!(!subs[0].closed);
        assert_eq!(subs[0].primitives.len(), 2);
        assert_eq!(subs[0].primitives[0].p2(), subs[0].primitives[1].p1());
    }

    #[test]
    fn multiple_subpaths_and_curves() {
        let path = square()
            .move_to(Point2::new(100.0, 0.0))
            .curve_to(
                Point2::new(100.0, 10.0),
                Point2::new(110.0, 10.0),
                Point2::new(110.0, 0.0),
            )
            .move_to(Point2::new(200.0, 0.0));
        let subs = path.subpaths(PATH_TOLERANCE);
        assert_eq!(subs.len(), 2);
        assert!(matches!(subs[1].primitives[0], Primitive::Curve(_)));
        assert!(!subs[1].closed);
    }

    #[test]
    fn groups_round_trip_through_paths() {
        let subs = square().subpaths(PATH_TOLERANCE);
        let groups: Vec<Vec<Primitive>> = subs.into_iter().map(|s| s.primitives).collect();
        let paths = Path::from_groups(&groups, PATH_TOLERANCE);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].elements().last(), Some(&PathEl::ClosePath));
        assert_eq!(paths[0].subpaths(PATH_TOLERANCE)[0].primitives, groups[0]);
    }

    #[test]
    fn non_finite_coordinates_are_detected() {
        assert!(square().is_finite());
        let bad = square().line_to(Point2::new(f64::NAN, 0.0));
        assert!(!bad.is_finite());
    }

    #[test]
    fn open_group_is_not_closed() {
        let group = vec![Primitive::Line(LineSeg::new(
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
        ))];
        let paths = Path::from_groups(&[group, Vec::new()], PATH_TOLERANCE);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 2);
    }
}
