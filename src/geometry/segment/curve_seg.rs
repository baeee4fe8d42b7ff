use std::f64::consts::FRAC_PI_3;

use crate::error::{GeometryError, Result};
use crate::math::bounds_2d::Aabb2;
use crate::math::polynomial::droots;
use crate::math::quadrature::integrate_unit;
use crate::math::sturm::{bisection, newton, Quintic, SturmSequence};
use crate::math::vector_2d::{align, angle_at, exterior_angle, inner_angle, right_normal, rotate};
use crate::math::{approximately, map_range, Point2, Vector2, APPROX_EPSILON};

use super::LineSeg;

/// Parameter step used when merging sub-arcs in [`CurveSeg::reduce`].
pub const REDUCE_STEP: f64 = 0.01;

/// Perpendicular deviation under which a curve counts as a straight line.
const LINEAR_TOLERANCE: f64 = 1e-4;

/// Parameter shift used when the derivative vanishes at an endpoint.
const NORMAL_NUDGE: f64 = 1e-3;

/// Bracket width under which the root sweep stops subdividing.
const MIN_BRACKET: f64 = 0.001;

const BISECTION_EPSILON: f64 = 0.01;
const NEWTON_EPSILON: f64 = 1e-4;

/// A cubic bezier segment.
///
/// `points` are `[p1, c1, c2, p2]`. `t1..t2` is the parameter range this
/// curve occupies inside the curve it was split from (`0..1` when unsplit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSeg {
    /// Control polygon `[p1, c1, c2, p2]`.
    pub points: [Point2; 4],
    /// Start of the range inside the ancestor curve.
    pub t1: f64,
    /// End of the range inside the ancestor curve.
    pub t2: f64,
}

impl CurveSeg {
    /// Creates an unsplit curve from its endpoints and control points.
    #[must_use]
    pub fn new(p1: Point2, c1: Point2, c2: Point2, p2: Point2) -> Self {
        Self::from_points([p1, c1, c2, p2])
    }

    /// Creates an unsplit curve from its control polygon.
    #[must_use]
    pub fn from_points(points: [Point2; 4]) -> Self {
        Self {
            points,
            t1: 0.0,
            t2: 1.0,
        }
    }

    /// Creates a curve from a slice of control points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidPointCount`] unless exactly 4 points
    /// are given.
    pub fn from_slice(points: &[Point2]) -> Result<Self> {
        let array: [Point2; 4] =
            points
                .try_into()
                .map_err(|_| GeometryError::InvalidPointCount {
                    expected: 4,
                    found: points.len(),
                })?;
        Ok(Self::from_points(array))
    }

    /// Start point.
    #[must_use]
    pub fn p1(&self) -> Point2 {
        self.points[0]
    }

    /// First control point.
    #[must_use]
    pub fn c1(&self) -> Point2 {
        self.points[1]
    }

    /// Second control point.
    #[must_use]
    pub fn c2(&self) -> Point2 {
        self.points[2]
    }

    /// End point.
    #[must_use]
    pub fn p2(&self) -> Point2 {
        self.points[3]
    }

    /// The same geometry with its range reset to `0..1`.
    #[must_use]
    pub fn rebased(&self) -> Self {
        Self::from_points(self.points)
    }

    /// Evaluates the curve at `t` in Bernstein form. Exact at `t = 0` and `t = 1`.
    #[must_use]
    pub fn compute(&self, t: f64) -> Point2 {
        let mt = 1.0 - t;
        let [p0, p1, p2, p3] = self.points.map(|p| p.coords);
        Point2::from(
            p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t),
        )
    }

    /// First derivative (hodograph) at `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector2 {
        let [d0, d1, d2] = self.derivative_points();
        let mt = 1.0 - t;
        d0 * (mt * mt) + d1 * (2.0 * mt * t) + d2 * (t * t)
    }

    /// Unit right-hand normal at `t`.
    ///
    /// Where the derivative vanishes the normal is taken slightly inside the
    /// curve, then from the chord. A fully degenerate curve yields zero.
    #[must_use]
    pub fn normal(&self, t: f64) -> Vector2 {
        if let Some(n) = right_normal(&self.derivative(t)) {
            return n;
        }
        let nudged = if t < 0.5 {
            t + NORMAL_NUDGE
        } else {
            t - NORMAL_NUDGE
        };
        right_normal(&self.derivative(nudged))
            .or_else(|| right_normal(&(self.p2() - self.p1())))
            .unwrap_or_else(Vector2::zeros)
    }

    /// Arc length by Legendre-Gauss quadrature.
    #[must_use]
    pub fn length(&self) -> f64 {
        integrate_unit(|t| self.derivative(t).norm())
    }

    /// Mean of the four control points.
    #[must_use]
    pub fn center(&self) -> Point2 {
        let sum = self
            .points
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / 4.0)
    }

    /// Tight axis-aligned bounds: endpoints plus the axis extrema.
    #[must_use]
    pub fn bounds(&self) -> Aabb2 {
        let [d0, d1, d2] = self.derivative_points();
        let mut bounds = Aabb2::from_corners(&self.p1(), &self.p2());
        let roots = droots(&[d0.x, d1.x, d2.x])
            .into_iter()
            .chain(droots(&[d0.y, d1.y, d2.y]));
        for t in roots.filter(|t| (0.0..=1.0).contains(t)) {
            bounds.include(&self.compute(t));
        }
        bounds
    }

    /// De Casteljau subdivision at `t` into `(left, right)`.
    ///
    /// Both halves carry their range remapped into this curve's `t1..t2`.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let [p0, p1, p2, p3] = self.points;
        let q4 = lerp(&p0, &p1, t);
        let q5 = lerp(&p1, &p2, t);
        let q6 = lerp(&p2, &p3, t);
        let q7 = lerp(&q4, &q5, t);
        let q8 = lerp(&q5, &q6, t);
        let q9 = lerp(&q7, &q8, t);

        let mid = map_range(t, 0.0, 1.0, self.t1, self.t2);
        let left = Self {
            points: [p0, q4, q7, q9],
            t1: self.t1,
            t2: mid,
        };
        let right = Self {
            points: [q9, q8, q6, p3],
            t1: mid,
            t2: self.t2,
        };
        (left, right)
    }

    /// Returns the part of the curve between `t1` and `t2`.
    #[must_use]
    pub fn split_range(&self, t1: f64, t2: f64) -> Self {
        if t1 <= 0.0 {
            return self.split(t2).0;
        }
        if t2 >= 1.0 {
            return self.split(t1).1;
        }
        let right = self.split(t1).1;
        right.split(map_range(t2, t1, 1.0, 0.0, 1.0)).0
    }

    /// Parameters in `(0, 1)` where x or y is not monotonic or changes
    /// curvature, sorted and deduplicated.
    #[must_use]
    pub fn extrema(&self) -> Vec<f64> {
        let [d0, d1, d2] = self.derivative_points();
        let dd0 = (d1 - d0) * 2.0;
        let dd1 = (d2 - d1) * 2.0;

        let mut roots: Vec<f64> = [
            droots(&[d0.x, d1.x, d2.x]),
            droots(&[d0.y, d1.y, d2.y]),
            droots(&[dd0.x, dd1.x]),
            droots(&[dd0.y, dd1.y]),
        ]
        .concat()
        .into_iter()
        .filter(|t| *t > 0.0 && *t < 1.0)
        .collect();
        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|a, b| approximately(*a, *b, APPROX_EPSILON));
        roots
    }

    /// `true` if both control points lie on the same side of the chord and the
    /// endpoint normals differ by less than 60°.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        let [p1, c1, c2, p2] = &self.points;
        let a1 = angle_at(p1, p2, c1);
        let a2 = angle_at(p1, p2, c2);
        if (a1 > 0.0 && a2 < 0.0) || (a1 < 0.0 && a2 > 0.0) {
            return false;
        }
        inner_angle(&self.normal(0.0), &self.normal(1.0)) < FRAC_PI_3
    }

    /// Splits the curve into simple sub-arcs.
    ///
    /// The curve is cut at its extrema first; any piece that is still not
    /// simple is walked in [`REDUCE_STEP`] increments and cut wherever
    /// simplicity would break. Every piece covers at least one step.
    #[must_use]
    pub fn reduce(&self) -> Vec<Self> {
        let mut values = self.extrema();
        values.insert(0, 0.0);
        values.push(1.0);

        let mut reduced = Vec::new();
        for w in values.windows(2) {
            let pass = self.split_range(w[0], w[1]);
            if pass.is_simple() {
                reduced.push(pass);
            } else {
                reduce_pass(&pass, &mut reduced);
            }
        }
        reduced
    }

    /// `true` if every control point lies within `1e-4` of the chord line.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        align(&self.points, &self.p1(), &self.p2())
            .iter()
            .all(|p| p.y.abs() <= LINEAR_TOLERANCE)
    }

    /// Offsets the curve by `d` along its right-hand normal.
    ///
    /// A straight curve is translated as a whole. Otherwise each simple
    /// sub-arc is offset independently and every arc's start is snapped to the
    /// previous arc's end.
    #[must_use]
    pub fn offset(&self, d: f64) -> Vec<Self> {
        if self.is_linear() {
            let n = self.normal(0.0) * d;
            return vec![Self::from_points(self.points.map(|p| p + n))];
        }
        let mut reduced: Vec<Self> = self
            .reduce()
            .iter()
            .map(|arc| arc.offset_simple(d))
            .collect();
        for i in 1..reduced.len() {
            reduced[i].points[0] = reduced[i - 1].points[3];
        }
        reduced
    }

    /// `true` if the bounding boxes of both curves touch.
    #[must_use]
    pub fn overlaps_curve(&self, other: &Self) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// `true` if this curve's bounds touch the segment's bounds.
    #[must_use]
    pub fn overlaps_line(&self, line: &LineSeg) -> bool {
        self.bounds().intersects(&line.bounds())
    }

    /// Nearest point on the curve to `q`, as `(distance, t)`.
    ///
    /// The stationary points of the squared distance are the roots of a
    /// quintic. They are isolated with a Sturm sequence while sweeping `[0, 1]`
    /// with an adaptive bracket, then refined by bisection and Newton.
    #[must_use]
    pub fn distance(&self, q: &Point2) -> (f64, f64) {
        let [p0, p1, p2, p3] = self.points.map(|p| p - q);
        let a = -p0 + (p1 - p2) * 3.0 + p3;
        let b = (p0 - p1 * 2.0 + p2) * 3.0;
        let c = (p1 - p0) * 3.0;
        let d = p0;

        let quintic = Quintic::new([
            6.0 * a.dot(&a),
            10.0 * a.dot(&b),
            4.0 * (2.0 * a.dot(&c) + b.dot(&b)),
            6.0 * (a.dot(&d) + b.dot(&c)),
            2.0 * (2.0 * b.dot(&d) + c.dot(&c)),
            2.0 * c.dot(&d),
        ]);
        let squared_at = |t: f64| (((a * t + b) * t + c) * t + d).norm_squared();

        let d0 = p0.norm_squared();
        let d3 = p3.norm_squared();
        let (mut best, mut best_t) = if d0 < d3 { (d0, 0.0) } else { (d3, 1.0) };
        let mut consider = |t: f64| {
            let value = squared_at(t);
            if value < best {
                best = value;
                best_t = t;
            }
        };

        let sturm = SturmSequence::new(&quintic);
        let mut left = 0.0_f64;
        let mut mult = 1.0_f64;
        let mut flag: u64 = 0;
        loop {
            let right = (left + mult).min(1.0);
            let count = sturm.roots_between(left, right);
            if count > 1 && mult >= MIN_BRACKET {
                mult /= 2.0;
                flag *= 2;
                continue;
            }
            if count == 1 {
                if quintic.eval(left) <= 0.0 && quintic.eval(right) >= 0.0 {
                    let rough = bisection(&quintic, left, right, BISECTION_EPSILON);
                    consider(newton(&quintic, rough, NEWTON_EPSILON).clamp(left, right));
                }
            } else if count > 1 {
                consider((left + right) / 2.0);
            }

            left = right;
            while flag % 2 == 1 {
                flag /= 2;
                mult *= 2.0;
            }
            flag += 1;
            if left >= 1.0 {
                break;
            }
        }
        (best.sqrt(), best_t)
    }

    /// Approximate minimum distance to a segment; `0.0` when they cross.
    #[must_use]
    pub fn distance_to_line(&self, line: &LineSeg) -> f64 {
        line.distance_to_curve(self)
    }

    /// Distance to another curve; `0.0` when they intersect, otherwise the
    /// nearer of the other curve's endpoints.
    #[must_use]
    pub fn distance_to_curve(&self, other: &Self) -> f64 {
        if self.overlaps_curve(other) && !self.intersects_curve(other).is_empty() {
            return 0.0;
        }
        self.distance(&other.p1()).0.min(self.distance(&other.p2()).0)
    }

    fn derivative_points(&self) -> [Vector2; 3] {
        let p = &self.points;
        [
            (p[1] - p[0]) * 3.0,
            (p[2] - p[1]) * 3.0,
            (p[3] - p[2]) * 3.0,
        ]
    }

    /// Offset of a simple arc: endpoints move along their chord normals and
    /// the control points along the bisector of the adjacent chord normals.
    fn offset_simple(&self, d: f64) -> Self {
        let [p1, c1, c2, p2] = self.points;
        let line1 = c1 - p1;
        let bridge = c2 - c1;
        let line2 = p2 - c2;

        let n1 = right_normal(&line1).unwrap_or_else(|| self.normal(0.0)) * d;
        let n2 = right_normal(&line2).unwrap_or_else(|| self.normal(1.0)) * d;
        let nc1 = bisector(&n1, exterior_angle(&line1, &bridge) / 2.0);
        let nc2 = bisector(&n2, exterior_angle(&line2, &bridge) / 2.0);

        Self::from_points([p1 + n1, c1 + nc1, c2 + nc2, p2 + n2])
    }
}

/// Rotates `n` by `phi` and stretches it so its projection on `n` keeps
/// the original length.
fn bisector(n: &Vector2, phi: f64) -> Vector2 {
    let cos = phi.cos();
    if cos.abs() < APPROX_EPSILON {
        return *n;
    }
    rotate(n, phi) / cos
}

fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

fn reduce_pass(pass: &CurveSeg, out: &mut Vec<CurveSeg>) {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (1.0 / REDUCE_STEP).round() as usize;
    #[allow(clippy::cast_precision_loss)]
    let at = |k: usize| k as f64 / steps as f64;

    let mut start = 0;
    while start < steps {
        let mut end = start + 1;
        while end < steps && pass.split_range(at(start), at(end + 1)).is_simple() {
            end += 1;
        }
        out.push(pass.split_range(at(start), at(end)));
        start = end;
    }
}
