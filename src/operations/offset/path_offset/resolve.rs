use tracing::debug;

use crate::geometry::Primitive;
use crate::math::{Point2, PATH_TOLERANCE};

use super::{cleanup, divide, filter, joints, split};

/// A chain whose crossings have been made explicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Segments split at every crossing, continuous within tolerance.
    pub segments: Vec<Primitive>,
    /// Points where the chain crosses itself. Segments start and end there
    /// exactly.
    pub intersections: Vec<Point2>,
}

/// Repairs a raw offset chain: finds where it meets or crosses itself,
/// splits it there and removes the loops that fall inside the offset band.
#[derive(Debug, Clone, Copy)]
pub struct TopologyResolver {
    tolerance: f64,
}

impl Default for TopologyResolver {
    fn default() -> Self {
        Self::new(PATH_TOLERANCE)
    }
}

impl TopologyResolver {
    /// Creates a resolver matching endpoints and joints within `tolerance`.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Splits the chain at its joints and squeezes it onto them.
    ///
    /// Fewer than two segments are returned as they are.
    #[must_use]
    pub fn resolve(&self, raw: &[Primitive]) -> Resolved {
        if raw.len() < 2 {
            return Resolved {
                segments: raw.to_vec(),
                intersections: Vec::new(),
            };
        }

        let joints = joints::collect(raw, self.tolerance);
        debug!(segments = raw.len(), joints = joints.len(), "joints collected");

        let (mut segments, splits) = split::split_at_joints(raw, joints.points(), self.tolerance);
        debug!(splits, segments = segments.len(), "segments split at joints");

        cleanup::clean(&mut segments, self.tolerance);
        let intersections = cleanup::squeeze(&mut segments, joints.points(), self.tolerance);
        debug!(intersections = intersections.len(), "chain squeezed");

        Resolved {
            segments,
            intersections,
        }
    }

    /// Cuts a resolved chain into groups and drops the ones that are not part
    /// of the offset outline.
    ///
    /// `originals` are the segments the chain was offset from and `distance`
    /// the signed offset distance.
    #[must_use]
    pub fn extract_groups(
        &self,
        resolved: &Resolved,
        originals: &[Primitive],
        distance: f64,
    ) -> Vec<Vec<Primitive>> {
        let d = distance.abs();
        let mut list = divide::divide(&resolved.segments, &resolved.intersections, self.tolerance);
        let divided = list.len();
        filter::exclude(&mut list, originals, d, self.tolerance);
        debug!(divided, excluded = divided - list.len(), "loops excluded");

        let flat: Vec<Primitive> = list.into_iter().flatten().collect();
        let mut groups = divide::group(flat, self.tolerance);
        filter::prune_inside(&mut groups, originals, d, self.tolerance);
        debug!(groups = groups.len(), "offset groups");
        groups
    }
}
