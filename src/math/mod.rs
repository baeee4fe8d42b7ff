pub mod bounds_2d;
pub mod polynomial;
pub mod quadrature;
pub mod sturm;
pub mod vector_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Default epsilon for [`approximately`] and [`between`].
pub const APPROX_EPSILON: f64 = 1e-6;

/// Default path tolerance (ε) used when matching endpoints and joints,
/// in path length units.
pub const PATH_TOLERANCE: f64 = 0.5;

/// Returns `true` if `a` and `b` differ by at most `epsilon`.
#[must_use]
pub fn approximately(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Strict interior test: `v` lies in `[lo, hi]` but is not approximately
/// equal to either bound.
///
/// Intersections landing on a segment boundary belong to the neighbouring
/// segment, so they are rejected here.
#[must_use]
pub fn between(v: f64, lo: f64, hi: f64) -> bool {
    if approximately(v, lo, APPROX_EPSILON) || approximately(v, hi, APPROX_EPSILON) {
        return false;
    }
    lo <= v && v <= hi
}

/// Linearly maps `v` from the range `[ds, de]` onto `[ts, te]`.
#[must_use]
pub fn map_range(v: f64, ds: f64, de: f64, ts: f64, te: f64) -> f64 {
    ts + (te - ts) * ((v - ds) / (de - ds))
}

/// Euclidean distance between two points.
#[must_use]
pub fn length(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}
