//! Closed-form root finding for the low-degree polynomials that show up in
//! line/curve intersection and curve extrema.

use std::f64::consts::TAU;

use super::vector_2d::align;
use super::{approximately, Point2, APPROX_EPSILON};

/// Real cube root that keeps the sign of `v`.
#[must_use]
pub fn crt(v: f64) -> f64 {
    if v < 0.0 {
        -(-v).powf(1.0 / 3.0)
    } else {
        v.powf(1.0 / 3.0)
    }
}

/// Returns the parameters in `[0, 1]` where the cubic bezier with control
/// points `points` crosses the infinite line through `from` and `to`.
///
/// The control points are moved into the line's frame so the problem becomes
/// finding the roots of the curve's y-coordinate.
#[must_use]
pub fn roots_on_line(points: &[Point2; 4], from: &Point2, to: &Point2) -> Vec<f64> {
    let p = align(points, from, to);
    cubic_bernstein_roots([p[0].y, p[1].y, p[2].y, p[3].y])
}

/// Roots in `[0, 1]` of the cubic Bernstein polynomial with coefficients `y`.
///
/// Uses the trigonometric form for three real roots, the double-root form for
/// a zero discriminant and Cardano for a single real root. A vanishing cubic
/// term falls back to the quadratic and then the linear formula.
#[must_use]
pub fn cubic_bernstein_roots(y: [f64; 4]) -> Vec<f64> {
    let [pa, pb, pc, pd] = y;
    let d = -pa + 3.0 * pb - 3.0 * pc + pd;
    let mut a = 3.0 * pa - 6.0 * pb + 3.0 * pc;
    let mut b = -3.0 * pa + 3.0 * pb;
    let mut c = pa;

    if approximately(d, 0.0, APPROX_EPSILON) {
        if approximately(a, 0.0, APPROX_EPSILON) {
            if approximately(b, 0.0, APPROX_EPSILON) {
                return Vec::new();
            }
            return unit_interval(&[-c / b]);
        }
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return Vec::new();
        }
        let q = disc.sqrt();
        return unit_interval(&[(q - b) / (2.0 * a), -(q + b) / (2.0 * a)]);
    }

    a /= d;
    b /= d;
    c /= d;
    let e = (3.0 * b - a * a) / 3.0;
    let f = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 27.0;
    let g = f / 2.0;
    let discriminant = (e / 3.0).powi(3) + g * g;
    let shift = a / -3.0;

    if discriminant < 0.0 {
        let h = (-e / 3.0).powi(3).sqrt();
        let i = 2.0 * crt(h);
        let phi = (-f / (2.0 * h)).clamp(-1.0, 1.0).acos();
        unit_interval(&[
            shift + i * (phi / 3.0).cos(),
            shift + i * ((phi + TAU) / 3.0).cos(),
            shift + i * ((phi + 2.0 * TAU) / 3.0).cos(),
        ])
    } else if discriminant == 0.0 {
        let h = if g < 0.0 { crt(-g) } else { -crt(g) };
        unit_interval(&[shift + 2.0 * h, shift - h])
    } else {
        let h = discriminant.sqrt();
        unit_interval(&[shift + crt(h - g) - crt(h + g)])
    }
}

/// Roots of a linear (2 values) or quadratic (3 values) Bernstein polynomial.
///
/// Used on the derivative control values of a cubic to find its extrema.
/// Roots are not filtered to `[0, 1]`.
#[must_use]
pub fn droots(v: &[f64]) -> Vec<f64> {
    match *v {
        [a, b, c] => {
            let d = a - 2.0 * b + c;
            if d != 0.0 {
                let disc = b * b - a * c;
                if disc < 0.0 {
                    return Vec::new();
                }
                let m1 = -disc.sqrt();
                let m2 = -a + b;
                vec![-(m1 + m2) / d, -(-m1 + m2) / d]
            } else if b != c {
                vec![(2.0 * b - c) / (2.0 * (b - c))]
            } else {
                Vec::new()
            }
        }
        [a, b] if a != b => vec![a / (a - b)],
        _ => Vec::new(),
    }
}

fn unit_interval(roots: &[f64]) -> Vec<f64> {
    roots
        .iter()
        .copied()
        .filter(|t| (0.0..=1.0).contains(t))
        .collect()
}
