//! Intersection queries between line and curve segments.
//!
//! All results use the strict-interior rule of [`between`]: a crossing that
//! lands on a segment's endpoint belongs to the neighbouring segment and is
//! not reported.

use crate::math::polynomial::roots_on_line;
use crate::math::{between, length, Point2};

use super::clipping::{pair_iteration, CLIP_THRESHOLD};
use super::{CurveSeg, Intersect, LineSeg};

/// Cross products smaller than this are treated as parallel directions.
const PARALLEL_TOLERANCE: f64 = 1e-12;

/// Endpoints of two curves closer than this are one shared junction.
const SHARED_ENDPOINT_RADIUS: f64 = 1e-3;

/// Clipping hits within this distance of a shared junction are the junction
/// itself. Two touching sub-arcs below the clip threshold can sit up to twice
/// the threshold from it.
const JUNCTION_RADIUS: f64 = 2.0 * CLIP_THRESHOLD;

impl LineSeg {
    /// Crossing point of two segments, strictly inside both.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Intersect> {
        if !self.overlaps(other) {
            return None;
        }
        let d1 = self.p2 - self.p1;
        let d2 = other.p2 - other.p1;
        let cross = d1.perp(&d2);
        if cross.abs() < PARALLEL_TOLERANCE {
            return None;
        }
        let w = other.p1 - self.p1;
        let t = w.perp(&d2) / cross;
        let s = w.perp(&d1) / cross;
        (between(t, 0.0, 1.0) && between(s, 0.0, 1.0)).then_some(Intersect {
            t_self: t,
            t_other: s,
        })
    }

    /// Crossings with a curve. `t_self` is on this segment, `t_other` on the
    /// curve.
    #[must_use]
    pub fn intersects_curve(&self, curve: &CurveSeg) -> Vec<Intersect> {
        if !curve.overlaps_line(self) {
            return Vec::new();
        }
        roots_on_line(&curve.points, &self.p1, &self.p2)
            .into_iter()
            .filter(|t| between(*t, 0.0, 1.0))
            .filter_map(|t_other| {
                let t_self = self.back_compute(&curve.compute(t_other))?;
                between(t_self, 0.0, 1.0).then_some(Intersect { t_self, t_other })
            })
            .collect()
    }
}

impl CurveSeg {
    /// Crossings with a segment. `t_self` is on this curve.
    #[must_use]
    pub fn intersects_line(&self, line: &LineSeg) -> Vec<Intersect> {
        line.intersects_curve(self)
            .into_iter()
            .map(Intersect::swapped)
            .collect()
    }

    /// Crossings with another curve, found by clipping their simple sub-arcs
    /// against each other.
    ///
    /// Clipping cannot tell a junction from a crossing, so hits next to an
    /// endpoint both curves share are dropped.
    #[must_use]
    pub fn intersects_curve(&self, other: &Self) -> Vec<Intersect> {
        if !self.overlaps_curve(other) {
            return Vec::new();
        }
        let shared: Vec<Point2> = [self.p1(), self.p2()]
            .into_iter()
            .filter(|p| {
                [other.p1(), other.p2()]
                    .iter()
                    .any(|q| length(p, q) < SHARED_ENDPOINT_RADIUS)
            })
            .collect();
        let left = self.rebased().reduce();
        let right = other.rebased().reduce();
        clip_all(&left, &right)
            .into_iter()
            .filter(|hit| {
                let at = self.compute(hit.t_self);
                !shared.iter().any(|p| length(&at, p) < JUNCTION_RADIUS)
            })
            .collect()
    }

    /// Points where the curve crosses itself.
    ///
    /// Neighbouring sub-arcs share an endpoint and are never compared.
    #[must_use]
    pub fn self_intersects(&self) -> Vec<Intersect> {
        let reduced = self.rebased().reduce();
        if reduced.len() < 3 {
            return Vec::new();
        }
        let mut results = Vec::new();
        for i in 0..reduced.len() - 2 {
            results.extend(clip_all(&reduced[i..=i], &reduced[i + 2..]));
        }
        results
    }
}

fn clip_all(left: &[CurveSeg], right: &[CurveSeg]) -> Vec<Intersect> {
    let mut results = Vec::new();
    for a in left {
        for b in right {
            if !a.overlaps_curve(b) {
                continue;
            }
            results.extend(
                pair_iteration(a, b, CLIP_THRESHOLD)
                    .into_iter()
                    .filter(|hit| between(hit.t_self, 0.0, 1.0)),
            );
        }
    }
    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::Point2;

    fn arch() -> CurveSeg {
        CurveSeg::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
        )
    }

    #[test]
    fn perpendicular_lines_cross_in_the_middle() {
        let a = LineSeg::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let b = LineSeg::new(Point2::new(4.0, -2.0), Point2::new(4.0, 8.0));
        let hit = a.intersect(&b).unwrap();
        assert_abs_diff_eq!(hit.t_self, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.t_other, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn shared_endpoint_is_not_a_crossing() {
        let a = LineSeg::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let b = LineSeg::new(Point2::new(10.0, 0.0), Point2::new(10.0, 10.0));
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn parallel_lines_do_not_cross() {
        let a = LineSeg::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let b = LineSeg::new(Point2::new(0.0, 1.0), Point2::new(10.0, 1.0));
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn line_crosses_arch_twice() {
        let line = LineSeg::new(Point2::new(-5.0, 5.0), Point2::new(15.0, 5.0));
        let hits = line.intersects_curve(&arch());
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        for hit in &hits {
            let on_curve = arch().compute(hit.t_other);
            let on_line = line.compute(hit.t_self);
            assert_abs_diff_eq!(on_curve.y, 5.0, epsilon = 1e-6);
            assert_abs_diff_eq!(on_curve.x, on_line.x, epsilon = 1e-6);
        }

        let swapped = arch().intersects_line(&line);
        assert_eq!(swapped.len(), 2);
        assert_abs_diff_eq!(swapped[0].t_self, hits[0].t_other);
    }

    #[test]
    fn line_clear_of_arch_has_no_hits() {
        let line = LineSeg::new(Point2::new(-5.0, 9.0), Point2::new(15.0, 9.0));
        assert!(line.intersects_curve(&arch()).is_empty());
    }

    #[test]
    fn opposed_arches_cross_twice() {
        let down = CurveSeg::new(
            Point2::new(0.0, 8.0),
            Point2::new(0.0, -2.0),
            Point2::new(10.0, -2.0),
            Point2::new(10.0, 8.0),
        );
        let hits = arch().intersects_curve(&down);
        let expected = [0.158_4, 0.841_6];
        for t in expected {
            assert!(hits.iter().any(|h| (h.t_self - t).abs() < 0.02), "hits={hits:?}");
        }
        for hit in &hits {
            assert!(
                expected.iter().any(|t| (hit.t_self - t).abs() < 0.02
                    && (hit.t_other - t).abs() < 0.02),
                "hit={hit:?}"
            );
        }
    }

    #[test]
    fn adjacent_arcs_meet_without_crossing() {
        let k = 20.0 * 0.552_284_749_830_793_4;
        let first = CurveSeg::new(
            Point2::new(20.0, 0.0),
            Point2::new(20.0, k),
            Point2::new(k, 20.0),
            Point2::new(0.0, 20.0),
        );
        let second = CurveSeg::new(
            Point2::new(0.0, 20.0),
            Point2::new(-k, 20.0),
            Point2::new(-20.0, k),
            Point2::new(-20.0, 0.0),
        );
        assert!(first.intersects_curve(&second).is_empty());
        assert!(second.intersects_curve(&first).is_empty());

        // A curve through the shared endpoint still reports its other crossings.
        let arch_through = CurveSeg::new(
            Point2::new(0.0, 20.0),
            Point2::new(10.0, 0.0),
            Point2::new(20.0, 0.0),
            Point2::new(30.0, 20.0),
        );
        assert!(!first.intersects_curve(&arch_through).is_empty());
    }

    #[test]
    fn looped_curve_intersects_itself() {
        let looped = CurveSeg::new(
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 30.0),
            Point2::new(-10.0, 30.0),
            Point2::new(20.0, 0.0),
        );
        let hits = looped.self_intersects();
        assert!(!hits.is_empty());
        let hit = hits[0];
        let a = looped.compute(hit.t_self);
        let b = looped.compute(hit.t_other);
        assert!((a - b).norm() < 1.0, "a={a:?} b={b:?}");

        assert!(arch().self_intersects().is_empty());
    }
}
