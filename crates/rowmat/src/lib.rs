//! # rowmat
//!
//! Dense, row-major `f32` matrix arithmetic.
//!
//! This is the top-level facade crate that re-exports everything you need.
//!
//! ## Usage
//!
//! ```rust
//! use rowmat::prelude::*;
//!
//! let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0])?;
//! let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0])?;
//!
//! // allocate and return
//! let sum = a.add(&b)?;
//!
//! // write into a caller-owned output
//! let mut prod = Matrix::create(2, 2)?;
//! a.matmul_into(&b, &mut prod)?;
//!
//! // mutate in place
//! let mut c = a.clone();
//! c.k_mul_inplace(2.0);
//!
//! assert_eq!(sum.as_slice(), &[6.0, 8.0, 10.0, 12.0]);
//! assert_eq!(prod.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! assert_eq!(c.as_slice(), &[2.0, 4.0, 6.0, 8.0]);
//! # Ok::<(), rowmat::Error>(())
//! ```
//!
//! ## Operation families
//!
//! | Family | Return-new | In-place | Into-result |
//! |--------|------------|----------|-------------|
//! | add / sub / hadamard | `add` | `add_inplace` | `add_into` |
//! | scalar | `k_add`, `k_sub`, `k_mul`, `k_div` | `*_inplace` | `*_into` |
//! | column broadcast | `add_column` | `add_column_inplace` | `add_column_into` |
//! | reduction | `sum_along`, `product_along` | — | `*_into` |
//! | product | `matmul` | `matmul_inplace` (square rhs) | `matmul_into`, `matmul_acc_into` |
//! | power | `pow` | `pow_inplace` | `pow_into` |
//! | transpose | `transpose` | `transpose_inplace` (square) | `transpose_into` |
//! | map | `apply` | `apply_inplace` | `apply_into` |

/// Re-export core types.
pub use rowmat_core::{error, matrix, reduce, shape, Direction, Error, Matrix, Result, Shape};

/// Prelude: import this for the most common types.
pub mod prelude {
    pub use crate::{Direction, Error, Matrix, Result, Shape};
}
