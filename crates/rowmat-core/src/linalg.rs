use crate::error::{check_inner, check_shape, check_square, Result};
use crate::kernel;
use crate::matrix::{alloc_buffer, Matrix};
use crate::shape::Shape;

// Linear algebra — product, integer power, transpose
//
// PRODUCT:
//
//   [m, k] x [k, n] -> [m, n], each element summed in f32 in ascending k.
//   `matmul_into` zeroes its output before summing, so calling it twice on
//   the same output yields the same result. `matmul_acc_into` is the
//   accumulating form: out += a x b.
//
// POWER:
//
//   m^n for square m, computed as n successive products starting from the
//   identity. No repeated squaring: the summation order of every step is the
//   plain product's, which keeps results reproducible against `matmul`.

impl Matrix {
    /// Shape of `self x rhs`, after checking the inner dimensions.
    fn product_shape(&self, rhs: &Matrix, name: &'static str) -> Result<Shape> {
        check_inner(name, self.shape, rhs.shape)?;
        Ok(Shape::new(self.rows(), rhs.cols()))
    }

    fn gemm_acc_into(&self, rhs: &Matrix, out: &mut [f32]) {
        kernel::gemm_acc(
            &self.data,
            &rhs.data,
            out,
            self.rows(),
            rhs.cols(),
            self.cols(),
        );
    }

    /// Matrix product `self x rhs`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        let shape = self.product_shape(rhs, "matmul")?;
        let mut out = Matrix::zeros(shape)?;
        self.gemm_acc_into(rhs, &mut out.data);
        Ok(out)
    }

    /// `out = self x rhs`. `out` must be `self.rows() x rhs.cols()`; its
    /// previous contents are discarded.
    pub fn matmul_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<()> {
        let shape = self.product_shape(rhs, "matmul_into")?;
        check_shape("matmul_into", shape, out.shape)?;
        out.data.fill(0.0);
        self.gemm_acc_into(rhs, &mut out.data);
        Ok(())
    }

    /// `out += self x rhs`. `out` must be `self.rows() x rhs.cols()`.
    pub fn matmul_acc_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<()> {
        let shape = self.product_shape(rhs, "matmul_acc_into")?;
        check_shape("matmul_acc_into", shape, out.shape)?;
        self.gemm_acc_into(rhs, &mut out.data);
        Ok(())
    }

    /// `self = self x rhs`. `rhs` must be square so that the shape of `self`
    /// is preserved.
    pub fn matmul_inplace(&mut self, rhs: &Matrix) -> Result<()> {
        check_inner("matmul_inplace", self.shape, rhs.shape)?;
        check_square("matmul_inplace", rhs.shape)?;
        let mut scratch = alloc_buffer(self.shape, 0.0)?;
        self.gemm_acc_into(rhs, &mut scratch);
        self.data = scratch;
        Ok(())
    }

    // Power

    /// Write `self^n` into `dest`, a buffer of `self`'s (square) shape.
    fn power(&self, n: u32, dest: &mut [f32]) -> Result<()> {
        let dim = self.rows();
        // Obtain the scratch buffer before `dest` is touched.
        let mut scratch = if n == 0 {
            Vec::new()
        } else {
            alloc_buffer(self.shape, 0.0)?
        };
        dest.fill(0.0);
        for i in 0..dim {
            dest[i * dim + i] = 1.0;
        }
        for _ in 0..n {
            scratch.fill(0.0);
            kernel::gemm_acc(dest, &self.data, &mut scratch, dim, dim, dim);
            dest.copy_from_slice(&scratch);
        }
        Ok(())
    }

    /// `self^n` for a square matrix; `n = 0` gives the identity.
    pub fn pow(&self, n: u32) -> Result<Matrix> {
        check_square("pow", self.shape)?;
        let mut out = self.zeros_like()?;
        self.power(n, &mut out.data)?;
        Ok(out)
    }

    /// `out = self^n`; `out` must have the (square) shape of `self`.
    pub fn pow_into(&self, n: u32, out: &mut Matrix) -> Result<()> {
        check_square("pow_into", self.shape)?;
        check_shape("pow_into", self.shape, out.shape)?;
        self.power(n, &mut out.data)
    }

    /// `self = self^n` for a square matrix.
    pub fn pow_inplace(&mut self, n: u32) -> Result<()> {
        check_square("pow_inplace", self.shape)?;
        let base = self.deep_copy()?;
        base.power(n, &mut self.data)
    }

    // Transpose

    /// The `cols x rows` transpose.
    pub fn transpose(&self) -> Result<Matrix> {
        let mut out = Matrix::zeros(self.shape.transposed())?;
        kernel::transpose(&self.data, self.shape, &mut out.data);
        Ok(out)
    }

    /// Write the transpose into `out`, which must be `cols x rows`.
    pub fn transpose_into(&self, out: &mut Matrix) -> Result<()> {
        check_shape("transpose_into", self.shape.transposed(), out.shape)?;
        kernel::transpose(&self.data, self.shape, &mut out.data);
        Ok(())
    }

    /// Transpose a square matrix in place.
    pub fn transpose_inplace(&mut self) -> Result<()> {
        check_square("transpose_inplace", self.shape)?;
        let dim = self.rows();
        kernel::transpose_square_assign(&mut self.data, dim);
        Ok(())
    }
}
