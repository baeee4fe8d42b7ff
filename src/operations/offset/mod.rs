pub mod path_offset;

pub use path_offset::{PathOffset2D, Resolved, TopologyResolver};

/// Corner style used where two offset segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    /// Extend both segments and bridge them with a straight line.
    #[default]
    Bevel,
    /// Not implemented.
    Miter,
    /// Not implemented.
    Round,
}
