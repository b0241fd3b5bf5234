use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{check_shape, Error, Result};
use crate::shape::Shape;

// Matrix — The fundamental data structure
//
// A Matrix is a rows x cols grid of f32 values stored contiguously in
// row-major order: element (i, j) lives at offset i * cols + j.
//
// MEMORY MODEL:
//
//   Each Matrix exclusively owns its Vec<f32>. There is no sharing, no
//   reference counting and no views. Cloning is a deep copy. Giving a
//   matrix away (destroy, into_vec, move_into) consumes it, so the
//   compiler rejects any later use of the old handle.
//
// SHAPE:
//
//   The shape is fixed at construction and both dimensions are at least 1.
//   The buffer length is always exactly rows * cols. Operations that
//   produce a different shape (transpose, reductions, products) either
//   allocate a new matrix or write into an output the caller already
//   shaped correctly.
//
// CALLING CONVENTIONS:
//
//   Every operation family comes in up to three forms that share one
//   kernel and differ only in where the result lands:
//     - `op(..)`          allocate and return a new Matrix
//     - `op_inplace(..)`  overwrite `self`
//     - `op_into(.., out)` overwrite a caller-owned, pre-shaped `out`
//   Shapes are validated before any write, so a failed call leaves
//   every operand untouched.

/// A dense, row-major matrix of `f32`.
///
/// # Example
/// ```
/// use rowmat_core::Matrix;
///
/// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0])?;
/// let b = Matrix::identity(2)?;
/// let c = a.matmul(&b)?;
/// assert_eq!(c, a);
/// # Ok::<(), rowmat_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MatrixRepr", into = "MatrixRepr")
)]
pub struct Matrix {
    pub(crate) shape: Shape,
    pub(crate) data: Vec<f32>,
}

/// Obtain a buffer of `shape.elem_count()` elements, all set to `value`.
///
/// Uses a fallible reservation so that an impossible request surfaces as
/// `Error::Allocation` instead of aborting the process.
pub(crate) fn alloc_buffer(shape: Shape, value: f32) -> Result<Vec<f32>> {
    let (rows, cols) = (shape.rows(), shape.cols());
    if rows == 0 || cols == 0 {
        tracing::debug!(rows, cols, "rejecting zero-sized matrix");
        return Err(Error::InvalidShape { rows, cols });
    }
    let len = shape
        .checked_elem_count()
        .ok_or(Error::Allocation { rows, cols })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| {
        tracing::debug!(rows, cols, "matrix buffer reservation failed");
        Error::Allocation { rows, cols }
    })?;
    data.resize(len, value);
    tracing::trace!(rows, cols, "allocated matrix buffer");
    Ok(data)
}

impl Matrix {
    // Creation methods

    /// Create a zero-filled `rows x cols` matrix.
    pub fn create(rows: usize, cols: usize) -> Result<Self> {
        Self::fill(rows, cols, 0.0)
    }

    /// Create a matrix with every element set to `value`.
    pub fn fill(rows: usize, cols: usize, value: f32) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        let data = alloc_buffer(shape, value)?;
        Ok(Matrix { shape, data })
    }

    /// Create a zero-filled matrix with the given shape.
    pub fn zeros(shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        Self::create(shape.rows(), shape.cols())
    }

    /// Create a matrix with values drawn uniformly from `[0, 1)`.
    ///
    /// The random source belongs to the caller: seed it once and reuse it.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let mut m = Self::create(rows, cols)?;
        m.data.iter_mut().for_each(|x| *x = rng.gen::<f32>());
        Ok(m)
    }

    /// Create a matrix with values drawn from the standard normal distribution.
    pub fn random_normal<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let mut m = Self::create(rows, cols)?;
        m.data
            .iter_mut()
            .for_each(|x| *x = StandardNormal.sample(rng));
        Ok(m)
    }

    /// Take ownership of a row-major buffer of exactly `rows * cols` elements.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidShape { rows, cols });
        }
        let expected = shape
            .checked_elem_count()
            .ok_or(Error::Allocation { rows, cols })?;
        if data.len() != expected {
            return Err(Error::ElementCount {
                shape,
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix { shape, data })
    }

    /// Square `dim x dim` identity matrix.
    pub fn identity(dim: usize) -> Result<Self> {
        Self::scaled_identity(dim, 1.0)
    }

    /// Square `dim x dim` matrix with `scalar` on the diagonal, 0 elsewhere.
    pub fn scaled_identity(dim: usize, scalar: f32) -> Result<Self> {
        let mut m = Self::create(dim, dim)?;
        for i in 0..dim {
            m.data[i * dim + i] = scalar;
        }
        Ok(m)
    }

    /// Allocate a zero-filled matrix of the same shape as `self`.
    pub fn zeros_like(&self) -> Result<Self> {
        Self::zeros(self.shape)
    }

    /// Overwrite every element with `value`.
    pub fn fill_with_value(&mut self, value: f32) {
        self.data.fill(value);
    }

    // Accessors

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Total number of elements (`rows * cols`).
    pub fn elem_count(&self) -> usize {
        self.data.len()
    }

    /// The whole buffer in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the buffer. Its length cannot be changed through it.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> Result<&[f32]> {
        if i >= self.rows() {
            return Err(self.out_of_bounds(i, 0));
        }
        let start = self.shape.offset(i, 0);
        Ok(&self.data[start..start + self.cols()])
    }

    /// Element (i, j).
    pub fn get(&self, i: usize, j: usize) -> Result<f32> {
        if !self.shape.contains(i, j) {
            return Err(self.out_of_bounds(i, j));
        }
        Ok(self.data[self.shape.offset(i, j)])
    }

    /// Overwrite element (i, j) with `value`.
    pub fn set(&mut self, i: usize, j: usize, value: f32) -> Result<()> {
        if !self.shape.contains(i, j) {
            return Err(self.out_of_bounds(i, j));
        }
        let offset = self.shape.offset(i, j);
        self.data[offset] = value;
        Ok(())
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> Error {
        tracing::debug!(row, col, shape = %self.shape, "index out of bounds");
        Error::IndexOutOfBounds {
            row,
            col,
            shape: self.shape,
        }
    }

    // Copies and ownership transfer

    /// Deep copy with an independent buffer.
    ///
    /// Unlike `clone()`, a failed allocation is reported instead of aborting.
    pub fn deep_copy(&self) -> Result<Self> {
        let mut data = alloc_buffer(self.shape, 0.0)?;
        data.copy_from_slice(&self.data);
        Ok(Matrix {
            shape: self.shape,
            data,
        })
    }

    /// Copy the contents of `self` into `dest`, which must have the same shape.
    pub fn copy_into(&self, dest: &mut Matrix) -> Result<()> {
        check_shape("copy_into", self.shape, dest.shape)?;
        dest.data.copy_from_slice(&self.data);
        Ok(())
    }

    /// Hand the buffer of `self` over to `dest` without copying.
    ///
    /// `dest` must have the same shape; its previous buffer is released.
    /// On a shape mismatch `self` is dropped and `dest` is left untouched.
    pub fn move_into(self, dest: &mut Matrix) -> Result<()> {
        check_shape("move_into", self.shape, dest.shape)?;
        dest.data = self.data;
        Ok(())
    }

    /// Release the matrix and its buffer.
    pub fn destroy(self) {
        tracing::trace!(shape = %self.shape, "releasing matrix buffer");
    }

    /// Release the matrix, returning its row-major buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

#[cfg(feature = "serde")]
impl TryFrom<MatrixRepr> for Matrix {
    type Error = Error;

    fn try_from(repr: MatrixRepr) -> Result<Self> {
        Matrix::from_vec(repr.rows, repr.cols, repr.data)
    }
}

#[cfg(feature = "serde")]
impl From<Matrix> for MatrixRepr {
    fn from(m: Matrix) -> Self {
        MatrixRepr {
            rows: m.rows(),
            cols: m.cols(),
            data: m.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_create_is_zeroed() -> Result<()> {
        let m = Matrix::create(2, 3)?;
        assert_eq!(m.shape(), Shape::new(2, 3));
        assert_eq!(m.elem_count(), 6);
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
        Ok(())
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Matrix::create(0, 3).unwrap_err(),
            Error::InvalidShape { rows: 0, cols: 3 }
        );
        assert!(Matrix::fill(3, 0, 1.0).is_err());
        assert!(Matrix::identity(0).is_err());
    }

    #[test]
    fn test_overflowing_allocation() {
        let err = Matrix::create(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            Error::Allocation {
                rows: usize::MAX,
                cols: 2
            }
        );
    }

    #[test]
    fn test_fill() -> Result<()> {
        let m = Matrix::fill(2, 2, 7.5)?;
        assert_eq!(m.as_slice(), &[7.5; 4]);
        Ok(())
    }

    #[test]
    fn test_identity() -> Result<()> {
        let m = Matrix::identity(3)?;
        assert_eq!(
            m.as_slice(),
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
        Ok(())
    }

    #[test]
    fn test_scaled_identity() -> Result<()> {
        let m = Matrix::scaled_identity(3, 2.0)?;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 2.0 } else { 0.0 };
                assert_eq!(m.get(i, j)?, expected);
            }
        }
        Ok(())
    }

    #[test]
    fn test_from_vec_length_checked() {
        let err = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            Error::ElementCount {
                shape: Shape::new(2, 2),
                expected: 4,
                got: 3
            }
        );
        assert!(Matrix::from_vec(0, 0, vec![]).is_err());
    }

    #[test]
    fn test_get_set_row_major() -> Result<()> {
        let mut m = Matrix::create(2, 3)?;
        m.set(1, 2, 9.0)?;
        assert_eq!(m.get(1, 2)?, 9.0);
        assert_eq!(m.as_slice()[5], 9.0);
        assert_eq!(m.row(1)?, &[0.0, 0.0, 9.0]);
        Ok(())
    }

    #[test]
    fn test_set_out_of_bounds_leaves_matrix() -> Result<()> {
        let mut m = Matrix::fill(2, 2, 1.0)?;
        let err = m.set(2, 0, 5.0).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { row: 2, col: 0, .. }));
        assert!(m.set(0, 2, 5.0).is_err());
        assert!(m.get(0, 2).is_err());
        assert!(m.row(2).is_err());
        assert_eq!(m.as_slice(), &[1.0; 4]);
        Ok(())
    }

    #[test]
    fn test_deep_copy_is_independent() -> Result<()> {
        let mut a = Matrix::from_vec(1, 2, vec![1.0, 2.0])?;
        let b = a.deep_copy()?;
        a.set(0, 0, 10.0)?;
        assert_eq!(b.as_slice(), &[1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_copy_into() -> Result<()> {
        let a = Matrix::from_vec(2, 1, vec![3.0, 4.0])?;
        let mut dest = Matrix::create(2, 1)?;
        a.copy_into(&mut dest)?;
        assert_eq!(dest, a);

        let mut wrong = Matrix::fill(1, 2, 8.0)?;
        let err = a.copy_into(&mut wrong).unwrap_err();
        assert!(err.is_dimension_mismatch());
        assert_eq!(wrong.as_slice(), &[8.0, 8.0]);
        Ok(())
    }

    #[test]
    fn test_move_into() -> Result<()> {
        let src = Matrix::fill(2, 2, 3.0)?;
        let mut dest = Matrix::create(2, 2)?;
        src.move_into(&mut dest)?;
        assert_eq!(dest.as_slice(), &[3.0; 4]);

        let src = Matrix::fill(3, 1, 1.0)?;
        assert!(src.move_into(&mut dest).is_err());
        assert_eq!(dest.as_slice(), &[3.0; 4]);
        Ok(())
    }

    #[test]
    fn test_fill_with_value_and_into_vec() -> Result<()> {
        let mut m = Matrix::create(1, 3)?;
        m.fill_with_value(-1.0);
        assert_eq!(m.into_vec(), vec![-1.0, -1.0, -1.0]);
        Matrix::identity(2)?.destroy();
        Ok(())
    }

    #[test]
    fn test_random_is_seeded_by_caller() -> Result<()> {
        let a = Matrix::random(3, 3, &mut StdRng::seed_from_u64(42))?;
        let b = Matrix::random(3, 3, &mut StdRng::seed_from_u64(42))?;
        assert_eq!(a, b);
        assert!(a.as_slice().iter().all(|&x| (0.0..1.0).contains(&x)));

        let n = Matrix::random_normal(4, 4, &mut StdRng::seed_from_u64(7))?;
        assert!(n.as_slice().iter().all(|x| x.is_finite()));
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates_shape() {
        let m = Matrix::from_vec(1, 2, vec![1.0, 2.0]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        let bad = r#"{"rows":2,"cols":2,"data":[1.0]}"#;
        assert!(serde_json::from_str::<Matrix>(bad).is_err());
    }
}
