use tracing::debug;

use crate::geometry::Primitive;
use crate::math::{between, Point2};
use crate::topology::SegmentStore;

/// Upper bound on splits per segment and joint. A forward pass normally
/// needs at most one split per pair.
const SPLIT_GUARD_FACTOR: usize = 4;

/// Splits every segment of the closed chain at the joints lying on it.
///
/// A segment is split where it passes within `2ε` of a joint at a parameter
/// strictly inside `(0, 1)`; both new ends are snapped onto the joint. The
/// chain is walked once with its first segment repeated at the end, so the
/// wrap-around junction is seen like any other.
///
/// Returns the split chain (without the repeated segment) and the number of
/// splits performed.
#[must_use]
pub fn split_at_joints(segments: &[Primitive], joints: &[Point2], tolerance: f64) -> (Vec<Primitive>, usize) {
    let mut store = SegmentStore::from_primitives(segments.iter().copied());
    store.close_loop();

    let guard = SPLIT_GUARD_FACTOR * (segments.len() + 1) * (joints.len() + 1);
    let reach = 2.0 * tolerance;
    let mut splits = 0;
    let mut i = 0;
    'chain: while i < store.len() {
        for joint in joints {
            let Some(seg) = store.at(i) else {
                break;
            };
            let (dist, t) = seg.distance(joint);
            if dist > reach || !between(t, 0.0, 1.0) {
                continue;
            }
            if store.split_at(i, t, *joint).is_some() {
                splits += 1;
            }
            if splits >= guard {
                debug!(splits, "split guard reached");
                break 'chain;
            }
        }
        i += 1;
    }

    store.open_loop();
    (store.to_vec(), splits)
}
