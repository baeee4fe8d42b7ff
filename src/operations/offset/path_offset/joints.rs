use crate::geometry::Primitive;
use crate::math::{length, midpoint, Point2};

/// Points where offset segments have to meet.
///
/// A point added within `2ε` of an existing joint is averaged into it
/// instead of being stored again.
#[derive(Debug, Clone)]
pub struct JointSet {
    points: Vec<Point2>,
    tolerance: f64,
}

impl JointSet {
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            points: Vec::new(),
            tolerance,
        }
    }

    pub fn add(&mut self, p: Point2) {
        let merge = 2.0 * self.tolerance;
        if let Some(existing) = self.points.iter_mut().find(|q| length(q, &p) < merge) {
            *existing = midpoint(existing, &p);
            return;
        }
        self.points.push(p);
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Collects the joints of a raw offset chain.
///
/// Records the midpoint of every junction whose ends are within `tolerance`
/// (including the junction from the last segment back to the first), every
/// curve self-intersection and every crossing between a segment and a later
/// one.
#[must_use]
pub fn collect(segments: &[Primitive], tolerance: f64) -> JointSet {
    let mut joints = JointSet::new(tolerance);
    let n = segments.len();
    for (i, seg) in segments.iter().enumerate() {
        let next = &segments[(i + 1) % n];
        if length(&seg.p2(), &next.p1()) < tolerance {
            joints.add(midpoint(&seg.p2(), &next.p1()));
        }
        for hit in seg.self_intersects() {
            joints.add(seg.compute(hit.t_self));
        }
        for other in &segments[i + 1..] {
            for hit in seg.intersects(other) {
                joints.add(seg.compute(hit.t_self));
            }
        }
    }
    joints
}
