use crate::error::{check_shape, Result};
use crate::kernel::{self, BinaryOp, ScalarOp};
use crate::matrix::Matrix;
use crate::shape::Shape;

// Elementwise operations
//
//   add / sub / hadamard   two operands of identical shape
//   k_add / k_sub / k_mul / k_div   one scalar applied to every element
//   add_column             a rows x 1 vector added to every column
//
// All checks happen before the destination is touched.

impl Matrix {
    fn binary(&self, rhs: &Matrix, op: BinaryOp, name: &'static str) -> Result<Matrix> {
        check_shape(name, self.shape, rhs.shape)?;
        let mut out = self.deep_copy()?;
        kernel::binary_assign(op, &mut out.data, &rhs.data);
        Ok(out)
    }

    fn binary_inplace(&mut self, rhs: &Matrix, op: BinaryOp, name: &'static str) -> Result<()> {
        check_shape(name, self.shape, rhs.shape)?;
        kernel::binary_assign(op, &mut self.data, &rhs.data);
        Ok(())
    }

    fn binary_into(
        &self,
        rhs: &Matrix,
        out: &mut Matrix,
        op: BinaryOp,
        name: &'static str,
    ) -> Result<()> {
        check_shape(name, self.shape, rhs.shape)?;
        check_shape(name, self.shape, out.shape)?;
        out.data.copy_from_slice(&self.data);
        kernel::binary_assign(op, &mut out.data, &rhs.data);
        Ok(())
    }

    // Matrix + matrix

    /// `self + rhs`, elementwise.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.binary(rhs, BinaryOp::Add, "add")
    }

    /// `self += rhs`, elementwise.
    pub fn add_inplace(&mut self, rhs: &Matrix) -> Result<()> {
        self.binary_inplace(rhs, BinaryOp::Add, "add_inplace")
    }

    /// `out = self + rhs`; `out` must already have the operands' shape.
    pub fn add_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<()> {
        self.binary_into(rhs, out, BinaryOp::Add, "add_into")
    }

    /// `self - rhs`, elementwise.
    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.binary(rhs, BinaryOp::Sub, "sub")
    }

    /// `self -= rhs`, elementwise.
    pub fn sub_inplace(&mut self, rhs: &Matrix) -> Result<()> {
        self.binary_inplace(rhs, BinaryOp::Sub, "sub_inplace")
    }

    /// `out = self - rhs`; `out` must already have the operands' shape.
    pub fn sub_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<()> {
        self.binary_into(rhs, out, BinaryOp::Sub, "sub_into")
    }

    /// Element-by-element product `self[i, j] * rhs[i, j]`.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix> {
        self.binary(rhs, BinaryOp::Mul, "hadamard")
    }

    pub fn hadamard_inplace(&mut self, rhs: &Matrix) -> Result<()> {
        self.binary_inplace(rhs, BinaryOp::Mul, "hadamard_inplace")
    }

    pub fn hadamard_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<()> {
        self.binary_into(rhs, out, BinaryOp::Mul, "hadamard_into")
    }

    // Matrix (op) scalar

    fn scalar(&self, k: f32, op: ScalarOp) -> Result<Matrix> {
        let mut out = self.deep_copy()?;
        kernel::scalar_assign(op, &mut out.data, k);
        Ok(out)
    }

    fn scalar_into(
        &self,
        k: f32,
        out: &mut Matrix,
        op: ScalarOp,
        name: &'static str,
    ) -> Result<()> {
        check_shape(name, self.shape, out.shape)?;
        out.data.copy_from_slice(&self.data);
        kernel::scalar_assign(op, &mut out.data, k);
        Ok(())
    }

    /// Add `k` to every element.
    pub fn k_add(&self, k: f32) -> Result<Matrix> {
        self.scalar(k, ScalarOp::Add)
    }

    pub fn k_add_inplace(&mut self, k: f32) {
        kernel::scalar_assign(ScalarOp::Add, &mut self.data, k);
    }

    pub fn k_add_into(&self, k: f32, out: &mut Matrix) -> Result<()> {
        self.scalar_into(k, out, ScalarOp::Add, "k_add_into")
    }

    /// Subtract `k` from every element; identical to `k_add(-k)`.
    pub fn k_sub(&self, k: f32) -> Result<Matrix> {
        self.k_add(-k)
    }

    pub fn k_sub_inplace(&mut self, k: f32) {
        self.k_add_inplace(-k)
    }

    pub fn k_sub_into(&self, k: f32, out: &mut Matrix) -> Result<()> {
        self.scalar_into(-k, out, ScalarOp::Add, "k_sub_into")
    }

    /// Multiply every element by `k`.
    pub fn k_mul(&self, k: f32) -> Result<Matrix> {
        self.scalar(k, ScalarOp::Mul)
    }

    pub fn k_mul_inplace(&mut self, k: f32) {
        kernel::scalar_assign(ScalarOp::Mul, &mut self.data, k);
    }

    pub fn k_mul_into(&self, k: f32, out: &mut Matrix) -> Result<()> {
        self.scalar_into(k, out, ScalarOp::Mul, "k_mul_into")
    }

    /// Divide every element by `k`. Division by zero follows IEEE-754.
    pub fn k_div(&self, k: f32) -> Result<Matrix> {
        self.scalar(k, ScalarOp::Div)
    }

    pub fn k_div_inplace(&mut self, k: f32) {
        kernel::scalar_assign(ScalarOp::Div, &mut self.data, k);
    }

    pub fn k_div_into(&self, k: f32, out: &mut Matrix) -> Result<()> {
        self.scalar_into(k, out, ScalarOp::Div, "k_div_into")
    }

    // Column broadcast

    fn check_column(&self, column: &Matrix, name: &'static str) -> Result<()> {
        check_shape(name, Shape::new(self.rows(), 1), column.shape)
    }

    /// Add the `rows x 1` vector `column` to every column of `self`.
    pub fn add_column(&self, column: &Matrix) -> Result<Matrix> {
        self.check_column(column, "add_column")?;
        let mut out = self.deep_copy()?;
        kernel::add_column_assign(&mut out.data, self.shape, &column.data);
        Ok(out)
    }

    pub fn add_column_inplace(&mut self, column: &Matrix) -> Result<()> {
        self.check_column(column, "add_column_inplace")?;
        kernel::add_column_assign(&mut self.data, self.shape, &column.data);
        Ok(())
    }

    pub fn add_column_into(&self, column: &Matrix, out: &mut Matrix) -> Result<()> {
        self.check_column(column, "add_column_into")?;
        check_shape("add_column_into", self.shape, out.shape)?;
        out.data.copy_from_slice(&self.data);
        kernel::add_column_assign(&mut out.data, self.shape, &column.data);
        Ok(())
    }
}
