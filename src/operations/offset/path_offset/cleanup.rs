use crate::geometry::Primitive;
use crate::math::{length, midpoint, Point2};

/// Drops segments shorter than `tolerance` and closes the small gaps between
/// neighbours by moving both ends to their midpoint.
pub fn clean(segments: &mut Vec<Primitive>, tolerance: f64) {
    segments.retain(|seg| !seg.is_degenerate(tolerance));
    for n in 1..segments.len() {
        let end = segments[n - 1].p2();
        let start = segments[n].p1();
        if length(&start, &end) < tolerance {
            let average = midpoint(&start, &end);
            segments[n].set_p1(average);
            segments[n - 1].set_p2(average);
        }
    }
}

/// Snaps the chain onto its joints and returns the joints that are real
/// crossings.
///
/// A joint within `tolerance` of the start of two or more segments (the
/// first segment excluded) is a crossing of the chain with itself. Ends
/// close to any joint are moved onto it exactly.
pub fn squeeze(segments: &mut [Primitive], joints: &[Point2], tolerance: f64) -> Vec<Point2> {
    joints
        .iter()
        .filter(|joint| {
            let mut count = 0;
            for n in 1..segments.len() {
                if length(joint, &segments[n].p1()) < tolerance {
                    count += 1;
                    segments[n].set_p1(**joint);
                    segments[n - 1].set_p2(**joint);
                }
            }
            count >= 2
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geometry::LineSeg;
    use crate::math::PATH_TOLERANCE;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Primitive {
        LineSeg::new(Point2::new(x1, y1), Point2::new(x2, y2)).into()
    }

    #[test]
    fn degenerate_segments_are_dropped_and_gaps_closed() {
        let mut segments = vec![
            line(0.0, 0.0, 10.0, 0.0),
            line(10.0, 0.0, 10.1, 0.1),
            line(10.2, 0.0, 10.0, 10.0),
        ];
        clean(&mut segments, PATH_TOLERANCE);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].p2(), segments[1].p1());
        assert_abs_diff_eq!(segments[1].p1().x, 10.1, epsilon = 1e-12);
        assert_abs_diff_eq!(segments[1].p1().y, 0.0);
    }

    #[test]
    fn crossing_joint_is_kept() {
        let mut segments = vec![
            line(0.0, 5.0, 45.0, 5.0),
            line(45.0, 5.0, 50.0, 5.0),
            line(50.0, 5.0, 45.0, 0.0),
            line(45.0, 0.0, 45.0, 5.0),
            line(45.1, 5.0, 45.0, 50.0),
        ];
        let joints = [Point2::new(45.0, 5.0), Point2::new(50.0, 5.0)];
        let crossings = squeeze(&mut segments, &joints, PATH_TOLERANCE);
        assert_eq!(crossings, vec![Point2::new(45.0, 5.0)]);
        assert_eq!(segments[4].p1(), Point2::new(45.0, 5.0));
        assert_eq!(segments[3].p2(), Point2::new(45.0, 5.0));
    }
}
