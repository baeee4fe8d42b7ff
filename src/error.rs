use thiserror::Error;

/// Top-level error type for the pathkern geometry kernel.
#[derive(Debug, Error)]
pub enum PathkernError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised when a primitive is constructed from invalid arguments.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("a cubic curve needs exactly {expected} points, got {found}")]
    InvalidPointCount { expected: usize, found: usize },

    #[error("coincident points ({x}, {y}) cannot define a direction")]
    CoincidentPoints { x: f64, y: f64 },

    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),
}

/// Errors related to path operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported option: {0}")]
    Unsupported(String),
}

/// Convenience type alias for results using [`PathkernError`].
pub type Result<T> = std::result::Result<T, PathkernError>;
