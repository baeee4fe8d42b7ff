use crate::error::{GeometryError, Result};
use crate::math::bounds_2d::Aabb2;
use crate::math::vector_2d::right_normal;
use crate::math::{length, midpoint, Point2};

use super::CurveSeg;

/// Samples per unit length used by the sampled distance queries.
pub const SAMPLE_DENSITY: f64 = 0.1;

/// Largest perpendicular residual accepted by [`LineSeg::back_compute`].
const BACK_COMPUTE_TOLERANCE: f64 = 1e-4;

/// A straight segment `p1 → p2`.
///
/// The parametric form is `P(t) = (1 - t) * p1 + t * p2` for `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSeg {
    /// Start point.
    pub p1: Point2,
    /// End point.
    pub p2: Point2,
}

impl LineSeg {
    /// Creates a new segment between two points.
    #[must_use]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Creates a segment that starts at `p` and runs `length` units in the
    /// direction of `v`. A negative `length` runs away from `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CoincidentPoints`] if `p` and `v` coincide,
    /// since no direction is defined.
    pub fn toward(p: Point2, v: Point2, length: f64) -> Result<Self> {
        let dir = v - p;
        let len = dir.norm();
        if len == 0.0 || !len.is_finite() {
            return Err(GeometryError::CoincidentPoints { x: p.x, y: p.y }.into());
        }
        Ok(Self::new(p, p + dir * (length / len)))
    }

    /// Evaluates the segment at `t`. Exact at `t = 0` and `t = 1`.
    #[must_use]
    pub fn compute(&self, t: f64) -> Point2 {
        Point2::from(self.p1.coords * (1.0 - t) + self.p2.coords * t)
    }

    /// Inverts [`compute`](Self::compute): returns the parameter of `p` on the
    /// infinite line through the segment.
    ///
    /// Returns `None` if the segment is degenerate or `p` is not on the line.
    #[must_use]
    pub fn back_compute(&self, p: &Point2) -> Option<f64> {
        let d = self.p2 - self.p1;
        let len_sq = d.norm_squared();
        if len_sq == 0.0 {
            return None;
        }
        let t = (p - self.p1).dot(&d) / len_sq;
        let residual = (p - self.compute(t)).norm();
        (residual <= BACK_COMPUTE_TOLERANCE * len_sq.sqrt().max(1.0)).then_some(t)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        length(&self.p1, &self.p2)
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        midpoint(&self.p1, &self.p2)
    }

    #[must_use]
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_corners(&self.p1, &self.p2)
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.p2, self.p1)
    }

    /// Splits the segment at `t` into `(left, right)`.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let p = self.compute(t);
        (Self::new(self.p1, p), Self::new(p, self.p2))
    }

    /// Returns the part of the segment between `t1` and `t2`.
    #[must_use]
    pub fn split_range(&self, t1: f64, t2: f64) -> Self {
        let start = if t1 <= 0.0 { self.p1 } else { self.compute(t1) };
        let end = if t2 >= 1.0 { self.p2 } else { self.compute(t2) };
        Self::new(start, end)
    }

    /// Translates the segment by `d` along its right-hand normal.
    ///
    /// A degenerate segment is returned unchanged.
    #[must_use]
    pub fn offset(&self, d: f64) -> Self {
        match right_normal(&(self.p2 - self.p1)) {
            Some(n) => Self::new(self.p1 + n * d, self.p2 + n * d),
            None => *self,
        }
    }

    /// Quadrant sign test: `true` if each segment's endpoints lie strictly on
    /// opposite sides of the other segment's line.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let ab = self.p1 - self.p2;
        let cd = other.p1 - other.p2;

        let a = cd.x * (self.p1.y - other.p1.y) + cd.y * (other.p1.x - self.p1.x);
        let b = cd.x * (self.p2.y - other.p1.y) + cd.y * (other.p1.x - self.p2.x);
        let c = ab.x * (other.p1.y - self.p1.y) + ab.y * (self.p1.x - other.p1.x);
        let d = ab.x * (other.p2.y - self.p1.y) + ab.y * (self.p1.x - other.p2.x);

        a * b < 0.0 && c * d < 0.0
    }

    /// Closest point on the finite segment to `q`, as `(distance, t)`.
    ///
    /// Parameters outside `[0, 1]` clamp to the nearer endpoint.
    #[must_use]
    pub fn distance(&self, q: &Point2) -> (f64, f64) {
        let d = self.p2 - self.p1;
        let len_sq = d.norm_squared();
        if len_sq == 0.0 {
            return (length(q, &self.p1), 0.0);
        }
        let t = (q - self.p1).dot(&d) / len_sq;
        if t < 0.0 {
            return (length(q, &self.p1), 0.0);
        }
        if t > 1.0 {
            return (length(q, &self.p2), 1.0);
        }
        (length(q, &self.compute(t)), t)
    }

    /// Minimum distance to another segment; `0.0` when they cross.
    #[must_use]
    pub fn distance_to_line(&self, other: &Self) -> f64 {
        if self.intersect(other).is_some() {
            return 0.0;
        }
        [
            self.distance(&other.p1).0,
            self.distance(&other.p2).0,
            other.distance(&self.p1).0,
            other.distance(&self.p2).0,
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }

    /// Approximate minimum distance to a curve; `0.0` when they cross.
    ///
    /// The segment is sampled at [`SAMPLE_DENSITY`] points per unit length.
    #[must_use]
    pub fn distance_to_curve(&self, curve: &CurveSeg) -> f64 {
        if curve.overlaps_line(self) && !self.intersects_curve(curve).is_empty() {
            return 0.0;
        }
        let mut d = curve.distance(&self.p1).0;
        for p in self.samples() {
            d = d.min(curve.distance(&p).0);
        }
        d
    }

    /// Interior and end sample points at [`SAMPLE_DENSITY`], excluding `p1`.
    fn samples(&self) -> impl Iterator<Item = Point2> + '_ {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let limit = (SAMPLE_DENSITY * self.length()).max(1.0) as usize;
        (1..=limit).map(move |n| {
            #[allow(clippy::cast_precision_loss)]
            let t = n as f64 / limit as f64;
            self.compute(t)
        })
    }
}
