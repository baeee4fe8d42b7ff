use crate::error::{OperationError, Result};
use crate::geometry::{Path, Primitive};
use crate::math::Point2;

/// Samples points along a path.
///
/// Each segment contributes `round(density · length)` evenly spaced
/// parameter samples starting at its first point. The end point of the path
/// is added when its last subpath is open.
pub struct LookupTable<'a> {
    path: &'a Path,
    density: f64,
}

impl<'a> LookupTable<'a> {
    /// Creates a new `LookupTable` query with `density` samples per unit
    /// length.
    #[must_use]
    pub fn new(path: &'a Path, density: f64) -> Self {
        Self { path, density }
    }

    /// Executes the query, returning the sample points in drawing order.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the density is not in
    /// `(0, 1]`.
    pub fn execute(&self) -> Result<Vec<Point2>> {
        if !(self.density > 0.0 && self.density <= 1.0) {
            return Err(OperationError::InvalidInput(format!(
                "lookup density must be in (0, 1], got {}",
                self.density
            ))
            .into());
        }

        let subpaths = self.path.subpaths(0.0);
        let mut lut = Vec::new();
        for sub in &subpaths {
            for prim in &sub.primitives {
                lut.extend(samples(prim, self.density));
            }
        }
        if let Some(last) = subpaths.last().filter(|sub| !sub.closed) {
            if let Some(prim) = last.primitives.last() {
                lut.push(prim.p2());
            }
        }
        Ok(lut)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn samples(prim: &Primitive, density: f64) -> impl Iterator<Item = Point2> + '_ {
    let count = (density * prim.length()).round().max(0.0) as usize;
    (0..count).map(move |i| prim.compute(i as f64 / count as f64))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn open_line_is_sampled_with_end_point() {
        let path = Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .line_to(Point2::new(10.0, 0.0));
        let lut = LookupTable::new(&path, 0.5).execute().unwrap();
        assert_eq!(lut.len(), 6);
        assert_eq!(lut[0], Point2::new(0.0, 0.0));
        assert_eq!(lut[1], Point2::new(2.0, 0.0));
        assert_eq!(lut[5], Point2::new(10.0, 0.0));
    }

    #[test]
    fn closed_path_does_not_repeat_start() {
        let path = Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .line_to(Point2::new(10.0, 0.0))
            .line_to(Point2::new(10.0, 10.0))
            .line_to(Point2::new(0.0, 10.0))
            .close();
        let lut = LookupTable::new(&path, 0.1).execute().unwrap();
        assert_eq!(
            lut,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
                Point2::new(0.0, 10.0),
            ]
        );
    }

    #[test]
    fn short_segments_round_to_nearest_count() {
        let path = Path::new()
            .move_to(Point2::new(0.0, 0.0))
            .line_to(Point2::new(4.0, 0.0))
            .line_to(Point2::new(4.0, 6.0));
        // 0.4 rounds to 0 samples, 0.6 rounds to 1.
        let lut = LookupTable::new(&path, 0.1).execute().unwrap();
        assert_eq!(lut, vec![Point2::new(4.0, 0.0), Point2::new(4.0, 6.0)]);
    }

    #[test]
    fn invalid_density_is_rejected() {
        let path = Path::new().move_to(Point2::origin()).line_to(Point2::new(1.0, 0.0));
        assert!(LookupTable::new(&path, 0.0).execute().is_err());
        assert!(LookupTable::new(&path, 1.5).execute().is_err());
        assert!(LookupTable::new(&path, f64::NAN).execute().is_err());
    }
}
