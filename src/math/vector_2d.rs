use super::{Point2, Vector2};

/// Vectors shorter than this are treated as zero-length directions.
const ZERO_LENGTH: f64 = 1e-12;

/// Returns the unsigned angle between `a` and `b` in `[0, π]`.
///
/// Returns `0.0` if either vector has zero length.
#[must_use]
pub fn inner_angle(a: &Vector2, b: &Vector2) -> f64 {
    let len = a.norm() * b.norm();
    if len < ZERO_LENGTH {
        return 0.0;
    }
    (a.dot(b) / len).clamp(-1.0, 1.0).acos()
}

/// Returns the signed turning angle from `a` to `b`.
///
/// The magnitude is the angle between the two vectors, the sign is positive
/// when the cross product `a × b` is positive.
#[must_use]
pub fn exterior_angle(a: &Vector2, b: &Vector2) -> f64 {
    let cross = a.perp(b);
    let theta = inner_angle(a, b);
    if cross > 0.0 {
        theta
    } else {
        -theta
    }
}

/// Returns the unit right-hand normal `(v.y, -v.x) / |v|`.
///
/// This is the normal used by every offset in the crate: a positive offset
/// distance moves a counter-clockwise (y-up) contour outward.
#[must_use]
pub fn right_normal(v: &Vector2) -> Option<Vector2> {
    let len = v.norm();
    if len < ZERO_LENGTH {
        return None;
    }
    Some(Vector2::new(v.y / len, -v.x / len))
}

/// Rotates `v` counter-clockwise by `angle` radians.
#[must_use]
pub fn rotate(v: &Vector2, angle: f64) -> Vector2 {
    let (sin, cos) = angle.sin_cos();
    Vector2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Signed angle at `o` between the rays `o → p1` and `o → p2`.
#[must_use]
pub fn angle_at(o: &Point2, p1: &Point2, p2: &Point2) -> f64 {
    let d1 = p1 - o;
    let d2 = p2 - o;
    d1.perp(&d2).atan2(d1.dot(&d2))
}

/// Translates and rotates `points` into the frame of the line `from → to`:
/// `from` becomes the origin and the line direction becomes the +x axis.
#[must_use]
pub fn align<const N: usize>(points: &[Point2; N], from: &Point2, to: &Point2) -> [Point2; N] {
    let a = -(to.y - from.y).atan2(to.x - from.x);
    let (sin, cos) = a.sin_cos();
    points.map(|v| {
        let dx = v.x - from.x;
        let dy = v.y - from.y;
        Point2::new(dx * cos - dy * sin, dx * sin + dy * cos)
    })
}
