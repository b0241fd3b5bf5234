//! # rowmat-core
//!
//! Dense, row-major, single-precision matrices and their operations.
//!
//! This crate provides:
//! - [`Matrix`] — an owned `rows x cols` buffer of `f32`
//! - [`Shape`] — the `(rows, cols)` pair every operation validates against
//! - [`Direction`] — `Row` / `Column` selector for directional reductions
//! - [`Error`] — the typed contract violations every operation can report
//!
//! Every operation family exposes up to three calling conventions:
//! `op` allocates and returns, `op_inplace` mutates `self`, and `op_into`
//! writes into a caller-owned output of the right shape.
// - matrix: construction, element access, copies, ownership transfer
// - kernel: one slice routine per operation, shared by all three forms
// - elementwise: add/sub/hadamard, scalar ops, column broadcast
// - reduce: directional sum/product, total sum, dot product
// - linalg: product, power, transpose
// - apply: elementwise closure

mod apply;
mod elementwise;
pub mod error;
mod kernel;
mod linalg;
pub mod matrix;
pub mod reduce;
pub mod shape;


pub use error::{Error, Result};
pub use matrix::Matrix;
pub use reduce::Direction;
pub use shape::Shape;
