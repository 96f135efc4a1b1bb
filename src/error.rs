use thiserror::Error;

use crate::recognition::Identity;

/// Top-level error type for stroke recognition.
#[derive(Debug, Error)]
pub enum StrokeformError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("no points given")]
    EmptyInput,

    #[error("{0} has not been computed yet")]
    NotComputed(&'static str),

    #[error("vertex index {index} is out of range for {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },
}

/// Errors related to shape classification.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("invalid criteria: {0}")]
    InvalidCriteria(String),

    #[error("identity {0} was chosen without a candidate estimate")]
    MissingCandidate(Identity),
}

/// Errors related to the shape board.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("slot not found")]
    SlotNotFound,

    #[error("invalid surface: {0}")]
    InvalidSurface(String),
}

/// Convenience type alias for results using [`StrokeformError`].
pub type Result<T> = std::result::Result<T, StrokeformError>;
