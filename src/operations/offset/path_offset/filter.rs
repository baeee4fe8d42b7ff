use tracing::trace;

use crate::geometry::Primitive;
use crate::math::{length, Point2};

/// Minimum distance from `p` to any of the `originals`.
fn distance_to_originals(p: &Point2, originals: &[Primitive]) -> f64 {
    originals
        .iter()
        .map(|orig| orig.distance(p).0)
        .fold(f64::INFINITY, f64::min)
}

fn is_closed(group: &[Primitive], tolerance: f64) -> bool {
    match (group.first(), group.last()) {
        (Some(first), Some(last)) => length(&first.p1(), &last.p2()) < tolerance,
        _ => false,
    }
}

/// Mean of the segment centers.
#[allow(clippy::cast_precision_loss)]
fn centroid(group: &[Primitive]) -> Point2 {
    if group.is_empty() {
        return Point2::origin();
    }
    let sum = group
        .iter()
        .fold(Point2::origin().coords, |acc, seg| acc + seg.center().coords);
    Point2::from(sum / group.len() as f64)
}

fn dips_into_band(group: &[Primitive], originals: &[Primitive], limit: f64) -> bool {
    group
        .iter()
        .any(|seg| distance_to_originals(&seg.compute(0.5), originals) < limit)
}

/// Removes closed loops that lie inside the offset band.
///
/// A closed group is dropped when any original segment passes closer than
/// `distance` to its centroid and one of its segment midpoints lies inside
/// the band, or when one of its segments crosses an original segment.
pub fn exclude(list: &mut Vec<Vec<Primitive>>, originals: &[Primitive], distance: f64, tolerance: f64) {
    list.retain(|group| {
        if !is_closed(group, tolerance) {
            return true;
        }
        let center = centroid(group);
        if distance_to_originals(&center, originals) < distance
            && dips_into_band(group, originals, distance - tolerance)
        {
            trace!(x = center.x, y = center.y, "loop near original excluded");
            return false;
        }
        let crosses = group.iter().any(|seg| {
            originals
                .iter()
                .any(|orig| seg.overlaps(orig) && !seg.intersects(orig).is_empty())
        });
        if crosses {
            trace!(x = center.x, y = center.y, "loop crossing original excluded");
        }
        !crosses
    });
}

/// Removes groups lying entirely inside the offset band: every segment
/// midpoint is closer than `distance - tolerance` to the originals.
pub fn prune_inside(
    groups: &mut Vec<Vec<Primitive>>,
    originals: &[Primitive],
    distance: f64,
    tolerance: f64,
) {
    let limit = distance - tolerance;
    groups.retain(|group| {
        !group.is_empty()
            && !group
                .iter()
                .all(|seg| distance_to_originals(&seg.compute(0.5), originals) < limit)
    });
}
