use tracing::debug;

use crate::math::approximately;

use super::{CurveSeg, Intersect};

/// Combined bounding-box size (width + height) under which a curve pair is
/// reported as an intersection.
pub const CLIP_THRESHOLD: f64 = 0.5;

/// Recursion limit for [`pair_iteration`]. Near-tangent pairs converge
/// slowly; at this depth the current pair is reported as a hit.
pub const MAX_CLIP_DEPTH: usize = 40;

/// Reported parameters are floored to a multiple of `1 / QUANTIZATION`.
const QUANTIZATION: f64 = 100_000.0;

/// Hits closer than this in both parameters are the same intersection.
const DUPLICATE_RADIUS: f64 = 0.005;

/// Bounding-box subdivision intersection of two curves.
///
/// Both curves are halved until their boxes are smaller than `threshold`;
/// each surviving pair reports the midpoints of its `t1..t2` ranges. Results
/// are therefore expressed in the ancestor parameterization the inputs
/// carry.
#[must_use]
pub fn pair_iteration(c1: &CurveSeg, c2: &CurveSeg, threshold: f64) -> Vec<Intersect> {
    iterate(c1, c2, threshold, 0)
}

fn iterate(c1: &CurveSeg, c2: &CurveSeg, threshold: f64, depth: usize) -> Vec<Intersect> {
    let b1 = c1.bounds();
    let b2 = c2.bounds();
    let small = b1.width() + b1.height() < threshold && b2.width() + b2.height() < threshold;
    if small || depth >= MAX_CLIP_DEPTH {
        if !small {
            debug!(depth, t_self = c1.t1, t_other = c2.t1, "curve clipping depth limit reached");
        }
        return vec![Intersect {
            t_self: quantize((c1.t1 + c1.t2) / 2.0),
            t_other: quantize((c2.t1 + c2.t2) / 2.0),
        }];
    }

    let (l1, r1) = c1.split(0.5);
    let (l2, r2) = c2.split(0.5);

    let mut results: Vec<Intersect> = Vec::new();
    for (a, b) in [(l1, l2), (l1, r2), (r1, r2), (r1, l2)] {
        if !a.bounds().intersects(&b.bounds()) {
            continue;
        }
        for hit in iterate(&a, &b, threshold, depth + 1) {
            let duplicate = results.iter().any(|kept| {
                approximately(kept.t_self, hit.t_self, DUPLICATE_RADIUS)
                    && approximately(kept.t_other, hit.t_other, DUPLICATE_RADIUS)
            });
            if !duplicate {
                results.push(hit);
            }
        }
    }
    results
}

fn quantize(t: f64) -> f64 {
    (QUANTIZATION * t).floor() / QUANTIZATION
}
