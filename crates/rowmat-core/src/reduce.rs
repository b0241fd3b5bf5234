use crate::error::{check_shape, Error, Result};
use crate::kernel::{self, ReduceOp};
use crate::matrix::Matrix;
use crate::shape::Shape;

/// Which axis a directional reduction collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Collapse across rows: one result per column, shaped `1 x cols`.
    Row,
    /// Collapse across columns: one result per row, shaped `rows x 1`.
    Column,
}

impl Direction {
    /// Shape of the result of reducing a matrix of shape `src` along `self`.
    pub fn reduced_shape(self, src: Shape) -> Shape {
        match self {
            Direction::Row => Shape::new(1, src.cols()),
            Direction::Column => Shape::new(src.rows(), 1),
        }
    }
}

impl Matrix {
    fn reduce_along(&self, op: ReduceOp, dir: Direction) -> Result<Matrix> {
        let mut out = Matrix::zeros(dir.reduced_shape(self.shape))?;
        kernel::reduce(op, dir, &self.data, self.shape, &mut out.data);
        Ok(out)
    }

    fn reduce_along_into(
        &self,
        op: ReduceOp,
        dir: Direction,
        out: &mut Matrix,
        name: &'static str,
    ) -> Result<()> {
        check_shape(name, dir.reduced_shape(self.shape), out.shape)?;
        kernel::reduce(op, dir, &self.data, self.shape, &mut out.data);
        Ok(())
    }

    /// Sum along `dir`: column totals (`1 x cols`) for `Row`, row totals
    /// (`rows x 1`) for `Column`.
    pub fn sum_along(&self, dir: Direction) -> Result<Matrix> {
        self.reduce_along(ReduceOp::Sum, dir)
    }

    /// Like [`Matrix::sum_along`], writing into a pre-shaped `out`.
    pub fn sum_along_into(&self, dir: Direction, out: &mut Matrix) -> Result<()> {
        self.reduce_along_into(ReduceOp::Sum, dir, out, "sum_along_into")
    }

    /// Product along `dir`, shaped like [`Matrix::sum_along`].
    pub fn product_along(&self, dir: Direction) -> Result<Matrix> {
        self.reduce_along(ReduceOp::Prod, dir)
    }

    pub fn product_along_into(&self, dir: Direction, out: &mut Matrix) -> Result<()> {
        self.reduce_along_into(ReduceOp::Prod, dir, out, "product_along_into")
    }

    /// Sum of every element, accumulated column by column (each column top
    /// to bottom, columns left to right).
    pub fn sum(&self) -> f32 {
        let (rows, cols) = (self.rows(), self.cols());
        let mut total = 0.0;
        for j in 0..cols {
            for i in 0..rows {
                total += self.data[i * cols + j];
            }
        }
        total
    }

    /// Dot product of two vectors.
    ///
    /// Both operands must be vectors (`1 x n` or `n x 1`, in any pairing)
    /// holding the same number of elements.
    pub fn dot(&self, rhs: &Matrix) -> Result<f32> {
        let vectors = self.shape.is_vector() && rhs.shape.is_vector();
        if !vectors || self.data.len() != rhs.data.len() {
            tracing::debug!(
                lhs = %self.shape,
                rhs = %rhs.shape,
                "dot: operands are not matching vectors"
            );
            // Report the operand as it would have to look to pair with `self`.
            let expected = if rhs.shape.rows() == 1 {
                Shape::new(1, self.data.len())
            } else {
                Shape::new(self.data.len(), 1)
            };
            return Err(Error::DimensionMismatch {
                op: "dot",
                expected,
                got: rhs.shape,
            });
        }
        Ok(kernel::dot(&self.data, &rhs.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: usize, cols: usize, data: &[f32]) -> Matrix {
        Matrix::from_vec(rows, cols, data.to_vec()).unwrap()
    }

    #[test]
    fn test_sum_along_row_gives_column_totals() -> Result<()> {
        let a = m(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let s = a.sum_along(Direction::Row)?;
        assert_eq!(s.shape(), Shape::new(1, 3));
        assert_eq!(s.as_slice(), &[5.0, 7.0, 9.0]);
        Ok(())
    }

    #[test]
    fn test_sum_along_column_gives_row_totals() -> Result<()> {
        let a = m(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let s = a.sum_along(Direction::Column)?;
        assert_eq!(s.shape(), Shape::new(2, 1));
        assert_eq!(s.as_slice(), &[6.0, 15.0]);
        Ok(())
    }

    #[test]
    fn test_product_along() -> Result<()> {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.product_along(Direction::Row)?.as_slice(), &[3.0, 8.0]);
        assert_eq!(a.product_along(Direction::Column)?.as_slice(), &[2.0, 12.0]);
        Ok(())
    }

    #[test]
    fn test_reduce_into_resets_output() -> Result<()> {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut out = Matrix::fill(1, 2, 100.0)?;
        a.sum_along_into(Direction::Row, &mut out)?;
        assert_eq!(out.as_slice(), &[4.0, 6.0]);
        a.product_along_into(Direction::Row, &mut out)?;
        assert_eq!(out.as_slice(), &[3.0, 8.0]);
        Ok(())
    }

    #[test]
    fn test_reduce_into_wrong_shape() -> Result<()> {
        let a = m(2, 3, &[1.0; 6]);
        // Row reduction of a 2x3 needs 1x3, not 3x1.
        let mut out = Matrix::fill(3, 1, 7.0)?;
        let err = a.sum_along_into(Direction::Row, &mut out).unwrap_err();
        assert!(err.is_dimension_mismatch());
        assert_eq!(out.as_slice(), &[7.0; 3]);
        assert!(a.product_along_into(Direction::Column, &mut out).is_err());
        Ok(())
    }

    #[test]
    fn test_sum_all() {
        assert_eq!(m(2, 2, &[1.0, 2.0, 3.0, 4.0]).sum(), 10.0);
    }

    #[test]
    fn test_sum_all_is_column_ordered() {
        // Column order cancels the large pair first: (1e8 + -1e8) + 1 + 1.
        // Row order would lose the first 1.0 to rounding inside 1e8 + 1.
        let a = m(2, 2, &[1.0e8, 1.0, -1.0e8, 1.0]);
        assert_eq!(a.sum(), 2.0);
    }

    #[test]
    fn test_dot_accepted_pairs() -> Result<()> {
        let row = m(1, 3, &[1.0, 2.0, 3.0]);
        let col = m(3, 1, &[4.0, 5.0, 6.0]);
        assert_eq!(row.dot(&row)?, 14.0);
        assert_eq!(col.dot(&col)?, 77.0);
        assert_eq!(row.dot(&col)?, 32.0);
        assert_eq!(col.dot(&row)?, 32.0);
        assert_eq!(m(1, 1, &[3.0]).dot(&m(1, 1, &[2.0]))?, 6.0);
        Ok(())
    }

    #[test]
    fn test_dot_rejected_pairs() {
        let row3 = m(1, 3, &[1.0; 3]);
        let row2 = m(1, 2, &[1.0; 2]);
        let square = m(2, 2, &[1.0; 4]);
        let wide = m(2, 3, &[1.0; 6]);
        assert!(row3.dot(&row2).unwrap_err().is_dimension_mismatch());
        assert!(square.dot(&m(4, 1, &[1.0; 4])).is_err());
        assert!(row2.dot(&square).is_err());
        assert!(wide.dot(&wide).is_err());
    }

    #[test]
    fn test_reduced_shape() {
        let s = Shape::new(4, 7);
        assert_eq!(Direction::Row.reduced_shape(s), Shape::new(1, 7));
        assert_eq!(Direction::Column.reduced_shape(s), Shape::new(4, 1));
    }
}
