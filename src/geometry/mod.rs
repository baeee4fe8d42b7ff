pub mod path;
pub mod segment;

pub use path::{Path, PathEl, Subpath};
pub use segment::{CurveSeg, Intersect, LineSeg, Primitive};
