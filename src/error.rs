use thiserror::Error;

/// Error type shared by all fallible operations in the crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid fill method: {0}")]
    InvalidMethod(String),

    #[error("Column {column} has no observed values to fill from")]
    UnfillableGap { column: usize },

    #[error("Index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Length mismatch: expected {expected}, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Data consistency error: {0}")]
    Consistency(String),

    #[error("Format error: {0}")]
    Format(String),
}

/// Result alias using the crate error type.
pub type Result<T> = std::result::Result<T, Error>;
