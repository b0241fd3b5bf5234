use crate::error::{check_shape, Result};
use crate::kernel;
use crate::matrix::Matrix;

impl Matrix {
    /// Apply `f` to every element, returning a new matrix.
    ///
    /// `f` should be a pure function: the order in which elements are
    /// visited is unspecified. Non-finite results are kept as they are.
    pub fn apply<F>(&self, f: F) -> Result<Matrix>
    where
        F: Fn(f32) -> f32,
    {
        let mut out = self.deep_copy()?;
        kernel::map_assign(&mut out.data, f);
        Ok(out)
    }

    /// Apply `f` to every element of `self`.
    pub fn apply_inplace<F>(&mut self, f: F)
    where
        F: Fn(f32) -> f32,
    {
        kernel::map_assign(&mut self.data, f);
    }

    /// Write `f(self[i, j])` into `out`, which must have the shape of `self`.
    pub fn apply_into<F>(&self, f: F, out: &mut Matrix) -> Result<()>
    where
        F: Fn(f32) -> f32,
    {
        check_shape("apply_into", self.shape, out.shape)?;
        out.data.copy_from_slice(&self.data);
        kernel::map_assign(&mut out.data, f);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_abs() -> Result<()> {
        let a = Matrix::from_vec(2, 2, vec![1.0, -2.0, 3.0, -4.0])?;
        let r = a.apply(f32::abs)?;
        assert_eq!(r.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        // The source is untouched.
        assert_eq!(a.as_slice(), &[1.0, -2.0, 3.0, -4.0]);
        Ok(())
    }

    #[test]
    fn test_apply_closure_captures() -> Result<()> {
        let offset = 0.5;
        let mut a = Matrix::fill(1, 3, 1.0)?;
        a.apply_inplace(|x| x * 2.0 + offset);
        assert_eq!(a.as_slice(), &[2.5; 3]);
        Ok(())
    }

    #[test]
    fn test_apply_into() -> Result<()> {
        let a = Matrix::from_vec(1, 2, vec![4.0, 9.0])?;
        let mut out = Matrix::create(1, 2)?;
        a.apply_into(f32::sqrt, &mut out)?;
        assert_eq!(out.as_slice(), &[2.0, 3.0]);

        let mut wrong = Matrix::fill(2, 1, 8.0)?;
        assert!(a
            .apply_into(f32::sqrt, &mut wrong)
            .unwrap_err()
            .is_dimension_mismatch());
        assert_eq!(wrong.as_slice(), &[8.0, 8.0]);
        Ok(())
    }

    #[test]
    fn test_apply_non_finite_propagates() -> Result<()> {
        let a = Matrix::from_vec(1, 2, vec![-1.0, 0.0])?;
        let r = a.apply(f32::ln)?;
        assert!(r.as_slice()[0].is_nan());
        assert_eq!(r.as_slice()[1], f32::NEG_INFINITY);
        Ok(())
    }
}
