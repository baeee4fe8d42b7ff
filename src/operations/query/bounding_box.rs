use crate::geometry::Path;
use crate::math::bounds_2d::Aabb2;

use super::all_primitives;

/// Computes the tight axis-aligned bounding box of a path.
pub struct PathBounds<'a> {
    path: &'a Path,
}

impl<'a> PathBounds<'a> {
    /// Creates a new `PathBounds` query.
    #[must_use]
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Executes the query. Curves contribute their extrema, not their
    /// control points.
    ///
    /// Returns `None` if the path draws nothing.
    #[must_use]
    pub fn execute(&self) -> Option<Aabb2> {
        all_primitives(self.path)
            .iter()
            .map(|p| p.bounds())
            .reduce(|acc, b| acc.union(&b))
    }
}
