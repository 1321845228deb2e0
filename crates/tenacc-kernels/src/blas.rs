//! BLAS-style vector engine over packed element buffers
//!
//! Level-1 (`axpy`, `scal`, `dot`) and level-3 (`gemm`) routines with unit
//! stride and row-major layout. Every routine takes the [`RoundingMode`]
//! explicitly and rounds each intermediate operation with it.
//!
//! Buffers are packed little-endian element arrays. Any trailing bytes beyond
//! the last element (such as a payload sentinel) are left untouched.
//!
//! # Panics
//!
//! All routines panic if a buffer is shorter than the element count implies.
//! Callers in [`crate::ops`] validate lengths first.

use crate::element::Element;
use crate::rounding::RoundingMode;

/// `y := alpha * x + y` over `n` elements
///
/// # Examples
///
/// ```
/// use rustc_apfloat::ieee::Double;
/// use tenacc_kernels::blas::axpy;
/// use tenacc_kernels::element::{pack, unpack, Element};
/// use tenacc_kernels::RoundingMode;
///
/// let x = pack::<Double>(&[1.0, 2.0]);
/// let mut y = pack::<Double>(&[10.0, 20.0]);
/// axpy::<Double>(2, <Double as Element>::from_f64(2.0), &x, &mut y, RoundingMode::Nearest);
/// assert_eq!(unpack::<Double>(&y), vec![12.0, 24.0]);
/// ```
pub fn axpy<E: Element>(n: usize, alpha: E, x: &[u8], y: &mut [u8], mode: RoundingMode) {
    for i in 0..n {
        let scaled = alpha.mul(E::load(x, i), mode);
        scaled.add(E::load(y, i), mode).store(y, i);
    }
}

/// `x := alpha * x` over `n` elements
pub fn scal<E: Element>(n: usize, alpha: E, x: &mut [u8], mode: RoundingMode) {
    for i in 0..n {
        alpha.mul(E::load(x, i), mode).store(x, i);
    }
}

/// Fill `n` elements of `out` with `value`
pub fn fill<E: Element>(n: usize, value: E, out: &mut [u8]) {
    for i in 0..n {
        value.store(out, i);
    }
}

/// `sum(x[i] * y[i])`, accumulated in ascending index order from `+0`
pub fn dot<E: Element>(n: usize, x: &[u8], y: &[u8], mode: RoundingMode) -> E {
    (0..n).fold(E::zero(), |acc, i| {
        let product = E::load(x, i).mul(E::load(y, i), mode);
        acc.add(product, mode)
    })
}

/// `C := alpha * A * B + beta * C`
///
/// `A` is `m x k`, `B` is `k x p` and `C` is `m x p`, all row-major with no
/// transposition. When `beta` is zero `C` is not read, so it may hold
/// anything (including NaNs) on entry.
#[allow(clippy::too_many_arguments)]
pub fn gemm<E: Element>(
    m: usize,
    k: usize,
    p: usize,
    alpha: E,
    a: &[u8],
    b: &[u8],
    beta: E,
    c: &mut [u8],
    mode: RoundingMode,
) {
    for i in 0..m {
        for j in 0..p {
            let mut sum = E::zero();
            for l in 0..k {
                let product = E::load(a, i * k + l).mul(E::load(b, l * p + j), mode);
                sum = sum.add(product, mode);
            }
            let mut value = alpha.mul(sum, mode);
            if !beta.is_zero() {
                value = value.add(beta.mul(E::load(c, i * p + j), mode), mode);
            }
            value.store(c, i * p + j);
        }
    }
}
