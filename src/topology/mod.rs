use slotmap::SlotMap;

use crate::geometry::Primitive;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a segment in the segment store.
    pub struct SegmentId;
}

/// Arena of primitives plus the order in which they are chained.
///
/// Chain positions refer to segments by id, so one segment may appear at
/// several positions (the closing position of a loop repeats the first id).
/// Splitting replaces the arena slot in place, and every position holding
/// that id sees the new left half.
#[derive(Debug, Default, Clone)]
pub struct SegmentStore {
    segments: SlotMap<SegmentId, Primitive>,
    chain: Vec<SegmentId>,
}

impl SegmentStore {
    /// Creates a new, empty segment store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store whose chain is `primitives` in order.
    #[must_use]
    pub fn from_primitives<I>(primitives: I) -> Self
    where
        I: IntoIterator<Item = Primitive>,
    {
        let mut store = Self::new();
        for prim in primitives {
            store.push(prim);
        }
        store
    }

    /// Inserts a segment at the end of the chain and returns its id.
    pub fn push(&mut self, prim: Primitive) -> SegmentId {
        let id = self.segments.insert(prim);
        self.chain.push(id);
        id
    }

    /// Appends the first segment's id again so the chain wraps around.
    pub fn close_loop(&mut self) {
        if let Some(&first) = self.chain.first() {
            self.chain.push(first);
        }
    }

    /// Drops the wrap-around position added by [`close_loop`](Self::close_loop),
    /// even if segments were inserted after it.
    pub fn open_loop(&mut self) {
        let Some(&first) = self.chain.first() else {
            return;
        };
        if let Some(pos) = self.chain.iter().skip(1).rposition(|id| *id == first) {
            self.chain.remove(pos + 1);
        }
    }

    /// Number of chain positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    #[must_use]
    pub fn segment(&self, id: SegmentId) -> Option<&Primitive> {
        self.segments.get(id)
    }

    /// Segment at chain position `pos`.
    #[must_use]
    pub fn at(&self, pos: usize) -> Option<&Primitive> {
        self.chain.get(pos).and_then(|id| self.segments.get(*id))
    }

    /// Splits the segment at chain position `pos` at parameter `t`.
    ///
    /// Both new ends are snapped to `joint`. The left half replaces the
    /// arena slot and the right half is inserted at `pos + 1`. Returns the
    /// id of the right half.
    pub fn split_at(&mut self, pos: usize, t: f64, joint: Point2) -> Option<SegmentId> {
        let id = *self.chain.get(pos)?;
        let (mut left, mut right) = self.segments.get(id)?.split(t);
        left.set_p2(joint);
        right.set_p1(joint);
        *self.segments.get_mut(id)? = left;
        let right_id = self.segments.insert(right);
        self.chain.insert(pos + 1, right_id);
        Some(right_id)
    }

    /// Removes chain position `pos`. The segment itself is freed once no
    /// position refers to it.
    pub fn remove_at(&mut self, pos: usize) -> Option<Primitive> {
        if pos >= self.chain.len() {
            return None;
        }
        let id = self.chain.remove(pos);
        if self.chain.contains(&id) {
            self.segments.get(id).copied()
        } else {
            self.segments.remove(id)
        }
    }

    /// Segments in chain order.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.chain.iter().filter_map(|id| self.segments.get(*id))
    }

    /// Copies the segments out in chain order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Primitive> {
        self.iter().copied().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::LineSeg;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Primitive {
        LineSeg::new(Point2::new(x1, y1), Point2::new(x2, y2)).into()
    }

    fn triangle() -> SegmentStore {
        SegmentStore::from_primitives([
            line(0.0, 0.0, 10.0, 0.0),
            line(10.0, 0.0, 0.0, 10.0),
            line(0.0, 10.0, 0.0, 0.0),
        ])
    }

    #[test]
    fn split_is_seen_by_every_position() {
        let mut store = triangle();
        store.close_loop();
        assert_eq!(store.len(), 4);

        let joint = Point2::new(4.0, 0.1);
        let right = store.split_at(0, 0.4, joint).unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(store.segment(right).unwrap().p1(), joint);
        assert_eq!(store.at(0).unwrap().p2(), joint);
        assert_eq!(store.at(1).unwrap().p1(), joint);
        assert_eq!(store.at(4).unwrap(), store.at(0).unwrap());

        store.open_loop();
        assert_eq!(store.len(), 4);
        assert_eq!(store.to_vec()[1].p2(), Point2::new(10.0, 0.0));
    }

    #[test]
    fn remove_frees_unreferenced_segments() {
        let mut store = triangle();
        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.p1(), Point2::new(10.0, 0.0));
        assert_eq!(store.len(), 2);
        assert!(store.remove_at(5).is_none());
    }

    #[test]
    fn open_loop_without_wrap_is_noop() {
        let mut store = triangle();
        store.open_loop();
        assert_eq!(store.len(), 3);
    }
}
