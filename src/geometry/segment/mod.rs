mod clipping;
mod curve_seg;
mod intersect;
mod line_seg;

pub use clipping::{pair_iteration, CLIP_THRESHOLD, MAX_CLIP_DEPTH};
pub use curve_seg::{CurveSeg, REDUCE_STEP};
pub use line_seg::{LineSeg, SAMPLE_DENSITY};

use crate::math::bounds_2d::Aabb2;
use crate::math::{length, Point2};

/// A crossing between two segments.
///
/// Both parameters are in `[0, 1]` and refer to the current
/// parameterization of the queried segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersect {
    /// Parameter on the segment the query was made on.
    pub t_self: f64,
    /// Parameter on the other segment.
    pub t_other: f64,
}

impl Intersect {
    /// The same crossing seen from the other segment.
    #[must_use]
    pub fn swapped(self) -> Self {
        Self {
            t_self: self.t_other,
            t_other: self.t_self,
        }
    }
}

/// One piece of a path: a straight segment or a cubic bezier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Line(LineSeg),
    Curve(CurveSeg),
}

impl Primitive {
    /// Start point.
    #[must_use]
    pub fn p1(&self) -> Point2 {
        match self {
            Self::Line(l) => l.p1,
            Self::Curve(c) => c.p1(),
        }
    }

    /// End point.
    #[must_use]
    pub fn p2(&self) -> Point2 {
        match self {
            Self::Line(l) => l.p2,
            Self::Curve(c) => c.p2(),
        }
    }

    /// Moves the start point; curve control points stay where they are.
    pub fn set_p1(&mut self, p: Point2) {
        match self {
            Self::Line(l) => l.p1 = p,
            Self::Curve(c) => c.points[0] = p,
        }
    }

    /// Moves the end point; curve control points stay where they are.
    pub fn set_p2(&mut self, p: Point2) {
        match self {
            Self::Line(l) => l.p2 = p,
            Self::Curve(c) => c.points[3] = p,
        }
    }

    #[must_use]
    pub fn compute(&self, t: f64) -> Point2 {
        match self {
            Self::Line(l) => l.compute(t),
            Self::Curve(c) => c.compute(t),
        }
    }

    /// Nearest point to `q`, as `(distance, t)`.
    #[must_use]
    pub fn distance(&self, q: &Point2) -> (f64, f64) {
        match self {
            Self::Line(l) => l.distance(q),
            Self::Curve(c) => c.distance(q),
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Line(l) => l.length(),
            Self::Curve(c) => c.length(),
        }
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        match self {
            Self::Line(l) => l.center(),
            Self::Curve(c) => c.center(),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Aabb2 {
        match self {
            Self::Line(l) => l.bounds(),
            Self::Curve(c) => c.bounds(),
        }
    }

    /// Splits at `t` into `(left, right)`.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        match self {
            Self::Line(l) => {
                let (a, b) = l.split(t);
                (Self::Line(a), Self::Line(b))
            }
            Self::Curve(c) => {
                let (a, b) = c.split(t);
                (Self::Curve(a), Self::Curve(b))
            }
        }
    }

    /// `true` if the endpoints are closer than `tolerance`.
    #[must_use]
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        length(&self.p1(), &self.p2()) < tolerance
    }

    /// `true` if the bounding boxes touch.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// Crossings with another primitive, strictly inside both.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> Vec<Intersect> {
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => a.intersect(b).into_iter().collect(),
            (Self::Line(a), Self::Curve(b)) => a.intersects_curve(b),
            (Self::Curve(a), Self::Line(b)) => a.intersects_line(b),
            (Self::Curve(a), Self::Curve(b)) => a.intersects_curve(b),
        }
    }

    /// Self crossings; a line never crosses itself.
    #[must_use]
    pub fn self_intersects(&self) -> Vec<Intersect> {
        match self {
            Self::Line(_) => Vec::new(),
            Self::Curve(c) => c.self_intersects(),
        }
    }

    /// Minimum distance to another primitive; `0.0` when they cross.
    #[must_use]
    pub fn distance_between(&self, other: &Self) -> f64 {
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => a.distance_to_line(b),
            (Self::Line(a), Self::Curve(b)) => a.distance_to_curve(b),
            (Self::Curve(a), Self::Line(b)) => a.distance_to_line(b),
            (Self::Curve(a), Self::Curve(b)) => a.distance_to_curve(b),
        }
    }
}

impl From<LineSeg> for Primitive {
    fn from(line: LineSeg) -> Self {
        Self::Line(line)
    }
}

impl From<CurveSeg> for Primitive {
    fn from(curve: CurveSeg) -> Self {
        Self::Curve(curve)
    }
}
