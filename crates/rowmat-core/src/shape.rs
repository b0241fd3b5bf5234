use std::fmt;

// Shape — (rows, cols) of a matrix
//
// A Shape is fixed for the whole lifetime of a matrix. It determines:
//   1. How many elements the buffer holds (rows * cols)
//   2. Where element (i, j) lives in the row-major buffer (i * cols + j)
//   3. Whether two matrices are compatible for an operation
//
// Shapes are plain values: every operation compares them up front and
// reports the offending pair inside the error.

/// Two-dimensional shape of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements, `None` if `rows * cols` overflows.
    pub fn checked_elem_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Total number of elements.
    ///
    /// Only meaningful for shapes of live matrices, whose element count is
    /// known to fit in memory.
    pub fn elem_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major offset of element (i, j). Bounds are not checked.
    ///
    /// For shape [3, 4], element (1, 2) lives at 1 * 4 + 2 = 6.
    #[inline]
    pub fn offset(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Whether (i, j) addresses an element of this shape.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.rows && j < self.cols
    }

    /// The shape with rows and cols swapped.
    pub fn transposed(&self) -> Shape {
        Shape::new(self.cols, self.rows)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Whether this is a `1 x n` or `n x 1` shape.
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}

impl From<Shape> for (usize, usize) {
    fn from(s: Shape) -> Self {
        (s.rows, s.cols)
    }
}
