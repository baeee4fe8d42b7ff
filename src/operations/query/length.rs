use crate::geometry::Path;

use super::all_primitives;

/// Computes the total length of a path, closing edges included.
pub struct PathLength<'a> {
    path: &'a Path,
}

impl<'a> PathLength<'a> {
    /// Creates a new `PathLength` query.
    #[must_use]
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Executes the query, returning the sum of all segment lengths.
    #[must_use]
    pub fn execute(&self) -> f64 {
        all_primitives(self.path).iter().map(|p| p.length()).sum()
    }
}
