use crate::shape::Shape;

/// All errors that can occur within rowmat.
///
/// Every variant describes a caller contract violation detected *before* any
/// buffer is written, so a failed call never leaves an operand or an output
/// half-updated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The element buffer for a `rows x cols` matrix could not be obtained.
    #[error("allocation failed for a [{rows}, {cols}] matrix")]
    Allocation { rows: usize, cols: usize },

    /// A matrix must have at least one row and one column.
    #[error("invalid shape [{rows}, {cols}]: matrices need at least one row and one column")]
    InvalidShape { rows: usize, cols: usize },

    /// Operand or output shape does not satisfy the operation's contract.
    #[error("{op}: shape mismatch, expected {expected}, got {got}")]
    DimensionMismatch {
        op: &'static str,
        expected: Shape,
        got: Shape,
    },

    /// Matrix product whose inner dimensions disagree.
    #[error("{op}: inner dimensions differ, {lhs} x {rhs}")]
    InnerDimMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// Element accessor outside the matrix.
    #[error("index ({row}, {col}) out of bounds for matrix of shape {shape}")]
    IndexOutOfBounds { row: usize, col: usize, shape: Shape },

    /// Element count mismatch when building a matrix from a vec.
    #[error("element count mismatch: shape {shape} requires {expected} elements, got {got}")]
    ElementCount {
        shape: Shape,
        expected: usize,
        got: usize,
    },
}

impl Error {
    /// Whether this error reports an operand/output shape conflict, including
    /// the matrix product's inner-dimension check.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(
            self,
            Error::DimensionMismatch { .. } | Error::InnerDimMismatch { .. }
        )
    }
}

/// Convenience Result type used throughout rowmat.
pub type Result<T> = std::result::Result<T, Error>;

/// Require `got == expected` for operation `op`.
pub(crate) fn check_shape(op: &'static str, expected: Shape, got: Shape) -> Result<()> {
    if expected == got {
        return Ok(());
    }
    tracing::debug!(op, %expected, %got, "shape contract violated");
    Err(Error::DimensionMismatch { op, expected, got })
}

/// Require `lhs.cols == rhs.rows` for matrix product `op`.
pub(crate) fn check_inner(op: &'static str, lhs: Shape, rhs: Shape) -> Result<()> {
    if lhs.cols() == rhs.rows() {
        return Ok(());
    }
    tracing::debug!(op, %lhs, %rhs, "inner dimensions differ");
    Err(Error::InnerDimMismatch { op, lhs, rhs })
}

/// Require a square shape for operation `op`.
pub(crate) fn check_square(op: &'static str, shape: Shape) -> Result<()> {
    check_shape(op, Shape::new(shape.rows(), shape.rows()), shape)
}
