use crate::reduce::Direction;
use crate::shape::Shape;

// Kernels — one routine per mathematical operation
//
// Each kernel works on plain row-major slices whose lengths the caller has
// already validated. The public Matrix methods are thin adapters that pick
// the destination buffer (a fresh allocation, `self`, or a caller-owned
// output) and then run exactly one of these loops, so the three calling
// conventions cannot drift apart.
//
// Elementwise kernels are written in "assign" form: the destination already
// holds the left operand and is updated in place. The allocate and into
// forms first copy the left operand into the destination.

/// Element-wise binary operations between two equally shaped matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    /// Hadamard (element-by-element) product.
    Mul,
}

impl BinaryOp {
    #[inline]
    fn eval(self, lhs: f32, rhs: f32) -> f32 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
        }
    }
}

/// Operations applying one scalar to every element.
///
/// Scalar subtraction is expressed as `Add` of the negated scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarOp {
    Add,
    Mul,
    Div,
}

impl ScalarOp {
    #[inline]
    fn eval(self, x: f32, k: f32) -> f32 {
        match self {
            ScalarOp::Add => x + k,
            ScalarOp::Mul => x * k,
            ScalarOp::Div => x / k,
        }
    }
}

/// Reductions along a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReduceOp {
    Sum,
    Prod,
}

impl ReduceOp {
    /// Starting value of the accumulator.
    #[inline]
    fn init(self) -> f32 {
        match self {
            ReduceOp::Sum => 0.0,
            ReduceOp::Prod => 1.0,
        }
    }

    #[inline]
    fn combine(self, acc: f32, x: f32) -> f32 {
        match self {
            ReduceOp::Sum => acc + x,
            ReduceOp::Prod => acc * x,
        }
    }
}

/// `acc[i] = op(acc[i], rhs[i])`
pub(crate) fn binary_assign(op: BinaryOp, acc: &mut [f32], rhs: &[f32]) {
    debug_assert_eq!(acc.len(), rhs.len());
    for (a, &b) in acc.iter_mut().zip(rhs) {
        *a = op.eval(*a, b);
    }
}

/// `acc[i] = op(acc[i], k)`
pub(crate) fn scalar_assign(op: ScalarOp, acc: &mut [f32], k: f32) {
    for a in acc.iter_mut() {
        *a = op.eval(*a, k);
    }
}

/// `acc[i] = f(acc[i])`
pub(crate) fn map_assign<F>(acc: &mut [f32], f: F)
where
    F: Fn(f32) -> f32,
{
    for a in acc.iter_mut() {
        *a = f(*a);
    }
}

/// Add `column` (length `shape.rows()`) to every column of `acc`.
pub(crate) fn add_column_assign(acc: &mut [f32], shape: Shape, column: &[f32]) {
    debug_assert_eq!(column.len(), shape.rows());
    for (row, &c) in acc.chunks_exact_mut(shape.cols()).zip(column) {
        for x in row.iter_mut() {
            *x += c;
        }
    }
}

/// Simple GEMM, accumulating: C += A × B
///
/// A: [m, k], B: [k, n], C: [m, n]
/// All row-major. Each C[i, j] receives its products in ascending k.
#[inline]
pub(crate) fn gemm_acc(a: &[f32], b: &[f32], c: &mut [f32], m: usize, n: usize, k: usize) {
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(c.len(), m * n);
    for i in 0..m {
        let a_row = i * k;
        let c_row = i * n;
        for p in 0..k {
            let a_val = a[a_row + p];
            let b_row = p * n;
            for j in 0..n {
                c[c_row + j] += a_val * b[b_row + j];
            }
        }
    }
}

/// `out[j, i] = src[i, j]` where `src` has shape `shape` and `out` has
/// `shape.transposed()`.
pub(crate) fn transpose(src: &[f32], shape: Shape, out: &mut [f32]) {
    let (rows, cols) = (shape.rows(), shape.cols());
    for i in 0..rows {
        for j in 0..cols {
            out[j * rows + i] = src[i * cols + j];
        }
    }
}

/// Transpose a square `dim x dim` buffer in place.
pub(crate) fn transpose_square_assign(acc: &mut [f32], dim: usize) {
    for i in 0..dim {
        for j in (i + 1)..dim {
            acc.swap(i * dim + j, j * dim + i);
        }
    }
}

/// Reduce `src` along `dir` into `out`.
///
/// `Direction::Row` collapses the rows: `out` has length `shape.cols()`.
/// `Direction::Column` collapses the columns: `out` has length `shape.rows()`.
/// `out` is reset to the reduction's initial value first.
pub(crate) fn reduce(op: ReduceOp, dir: Direction, src: &[f32], shape: Shape, out: &mut [f32]) {
    out.fill(op.init());
    match dir {
        Direction::Row => {
            for row in src.chunks_exact(shape.cols()) {
                for (acc, &x) in out.iter_mut().zip(row) {
                    *acc = op.combine(*acc, x);
                }
            }
        }
        Direction::Column => {
            for (acc, row) in out.iter_mut().zip(src.chunks_exact(shape.cols())) {
                *acc = row.iter().fold(*acc, |a, &x| op.combine(a, x));
            }
        }
    }
}

/// Sum of `a[i] * b[i]` in ascending i.
pub(crate) fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).fold(0.0, |acc, (&x, &y)| acc + x * y)
}
