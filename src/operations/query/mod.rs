mod bounding_box;
mod closest_point;
mod intersect;
mod length;
mod lookup_table;

pub use bounding_box::PathBounds;
pub use closest_point::{ClosestPoint, ClosestPointOnPath};
pub use intersect::{PathIntersections, SelfIntersections};
pub use length::PathLength;
pub use lookup_table::LookupTable;

use crate::geometry::{Path, Primitive};

/// Every primitive of `path`, in drawing order, including closing lines and
/// zero-length segments.
fn all_primitives(path: &Path) -> Vec<Primitive> {
    path.subpaths(0.0)
        .into_iter()
        .flat_map(|sub| sub.primitives)
        .collect()
}
