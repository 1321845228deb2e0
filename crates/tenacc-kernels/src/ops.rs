//! Tensor kernels for one element precision
//!
//! Each kernel takes the unpinned element bytes of its operands and returns a
//! freshly pinned result buffer: the result data followed by the sentinel byte
//! (see `tenacc_core::codec`). The caller encodes that buffer directly.
//!
//! Sign conventions follow the underlying `axpy`:
//!
//! - `add(x, y)` accumulates `1 * x` onto `y`
//! - `sub(x, y)` accumulates `-1 * y` onto `x`
//! - `scalar_add(x, n)` accumulates `1 * x` onto `broadcast(n)`
//! - `scalar_sub(x, n)` accumulates `-1 * broadcast(n)` onto `x`
//! - `scalar_div(x, n)` scales `x` by the rounded reciprocal `1 / n`
//!
//! # Examples
//!
//! ```
//! use rustc_apfloat::ieee::Single;
//! use tenacc_kernels::element::{pack, unpack};
//! use tenacc_kernels::{ops, RoundingMode};
//!
//! let x = pack::<Single>(&[5.0]);
//! let y = pack::<Single>(&[2.0]);
//! let out = ops::sub::<Single>(&x, &y, RoundingMode::Nearest).unwrap();
//!
//! // data bytes then the sentinel
//! assert_eq!(out.len(), 5);
//! assert_eq!(unpack::<Single>(&out[..4]), vec![3.0]);
//! ```

use tenacc_core::codec;

use crate::blas;
use crate::element::Element;
use crate::error::{KernelError, KernelResult};
use crate::rounding::RoundingMode;

/// Elementwise comparison relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `x > y`
    Gt,
    /// `x >= y`
    Ge,
    /// `x < y`
    Lt,
    /// `x <= y`
    Le,
}

impl Comparison {
    /// Operation name used in errors and logs
    pub const fn name(self) -> &'static str {
        match self {
            Comparison::Gt => "gth",
            Comparison::Ge => "gte",
            Comparison::Lt => "lth",
            Comparison::Le => "lte",
        }
    }
}

/// Element count of a buffer, rejecting partial elements
fn elements<E: Element>(operation: &str, buf: &[u8]) -> KernelResult<usize> {
    if buf.len() % E::BYTES != 0 {
        return Err(KernelError::misaligned(operation, buf.len(), E::BYTES));
    }
    Ok(buf.len() / E::BYTES)
}

/// Element count shared by two equally sized buffers
fn paired<E: Element>(operation: &str, x: &[u8], y: &[u8]) -> KernelResult<usize> {
    if x.len() != y.len() {
        return Err(KernelError::length_mismatch(operation, x.len(), y.len()));
    }
    elements::<E>(operation, x)
}

fn expect_len(operation: &str, buf: &[u8], expected: usize) -> KernelResult<()> {
    if buf.len() != expected {
        return Err(KernelError::length_mismatch(operation, expected, buf.len()));
    }
    Ok(())
}

/// Byte length of a `dims` block of `E`, checked
fn byte_size<E: Element>(operation: &str, dims: &[usize]) -> KernelResult<usize> {
    dims.iter()
        .try_fold(E::BYTES, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| KernelError::size_overflow(operation, dims))
}

/// Copy `data` into a buffer with room for the sentinel
fn output_from(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(codec::pinned_len(data.len()));
    out.extend_from_slice(data);
    out
}

fn pinned(mut out: Vec<u8>) -> Vec<u8> {
    codec::pin(&mut out);
    out
}

fn scalar_output<E: Element>(value: E) -> Vec<u8> {
    let mut out = vec![0u8; E::BYTES];
    value.write(&mut out);
    pinned(out)
}

/// `y := 1 * x + y`
pub fn add<E: Element>(x: &[u8], y: &[u8], mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let n = paired::<E>("add", x, y)?;
    let mut out = output_from(y);
    blas::axpy(n, E::one(), x, &mut out, mode);
    Ok(pinned(out))
}

/// `x := -1 * y + x`
pub fn sub<E: Element>(x: &[u8], y: &[u8], mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let n = paired::<E>("sub", x, y)?;
    let mut out = output_from(x);
    blas::axpy(n, E::one().neg(), y, &mut out, mode);
    Ok(pinned(out))
}

/// `y[i] := x[i] * y[i]`
pub fn mul<E: Element>(x: &[u8], y: &[u8], mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let n = paired::<E>("mul", x, y)?;
    let mut out = output_from(y);
    for i in 0..n {
        E::load(x, i).mul(E::load(&out, i), mode).store(&mut out, i);
    }
    Ok(pinned(out))
}

/// `y[i] := x[i] / y[i]`
pub fn div<E: Element>(x: &[u8], y: &[u8], mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let n = paired::<E>("div", x, y)?;
    let mut out = output_from(y);
    for i in 0..n {
        E::load(x, i).div(E::load(&out, i), mode).store(&mut out, i);
    }
    Ok(pinned(out))
}

/// `broadcast(n) := 1 * x + broadcast(n)`
pub fn scalar_add<E: Element>(x: &[u8], scalar: E, mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let n = elements::<E>("adds", x)?;
    let mut out = vec![0u8; x.len()];
    blas::fill(n, scalar, &mut out);
    blas::axpy(n, E::one(), x, &mut out, mode);
    Ok(pinned(out))
}

/// `x := -1 * broadcast(n) + x`
pub fn scalar_sub<E: Element>(x: &[u8], scalar: E, mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let n = elements::<E>("subs", x)?;
    let mut broadcast = vec![0u8; x.len()];
    blas::fill(n, scalar, &mut broadcast);
    let mut out = output_from(x);
    blas::axpy(n, E::one().neg(), &broadcast, &mut out, mode);
    Ok(pinned(out))
}

/// `x := n * x`
pub fn scalar_mul<E: Element>(x: &[u8], scalar: E, mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let n = elements::<E>("muls", x)?;
    let mut out = output_from(x);
    blas::scal(n, scalar, &mut out, mode);
    Ok(pinned(out))
}

/// `x := (1 / n) * x`
pub fn scalar_div<E: Element>(x: &[u8], scalar: E, mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let n = elements::<E>("divs", x)?;
    let reciprocal = E::one().div(scalar, mode);
    let mut out = output_from(x);
    blas::scal(n, reciprocal, &mut out, mode);
    Ok(pinned(out))
}

/// `sum(x[i] * y[i])` as a one-element buffer
pub fn dot<E: Element>(x: &[u8], y: &[u8], mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let n = paired::<E>("dot", x, y)?;
    Ok(scalar_output(blas::dot::<E>(n, x, y, mode)))
}

/// `C[m, p] := 1 * X[m, k] * Y[k, p] + 0 * C`
pub fn matmul<E: Element>(
    x: &[u8],
    y: &[u8],
    m: usize,
    k: usize,
    p: usize,
    mode: RoundingMode,
) -> KernelResult<Vec<u8>> {
    expect_len("mmul", x, byte_size::<E>("mmul", &[m, k])?)?;
    expect_len("mmul", y, byte_size::<E>("mmul", &[k, p])?)?;
    let mut out = vec![0u8; byte_size::<E>("mmul", &[m, p])?];
    blas::gemm(m, k, p, E::one(), x, y, E::zero(), &mut out, mode);
    Ok(pinned(out))
}

/// Diagonal `x[i, i]` of a `side x side` matrix, unpinned
fn diagonal<E: Element>(x: &[u8], side: usize) -> KernelResult<Vec<u8>> {
    expect_len("diag", x, byte_size::<E>("diag", &[side, side])?)?;
    let stride = side * E::BYTES;
    let mut out = vec![0u8; stride];
    for i in 0..side {
        let src = i * stride + i * E::BYTES;
        out[i * E::BYTES..(i + 1) * E::BYTES].copy_from_slice(&x[src..src + E::BYTES]);
    }
    Ok(out)
}

/// Diagonal of a `side x side` matrix as a vector of `side` elements
pub fn diag<E: Element>(x: &[u8], side: usize) -> KernelResult<Vec<u8>> {
    diagonal::<E>(x, side).map(pinned)
}

/// `dot(diag(x), diag(x))`: the sum of the squared diagonal entries
pub fn trace<E: Element>(x: &[u8], side: usize, mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let d = diagonal::<E>(x, side)?;
    dot::<E>(&d, &d, mode)
}

/// Row-major transpose of a `rows x cols` matrix
pub fn transpose<E: Element>(x: &[u8], rows: usize, cols: usize) -> KernelResult<Vec<u8>> {
    expect_len("transpose", x, byte_size::<E>("transpose", &[rows, cols])?)?;
    let mut out = vec![0u8; x.len()];
    for i in 0..rows {
        for j in 0..cols {
            E::load(x, i * cols + j).store(&mut out, j * rows + i);
        }
    }
    Ok(pinned(out))
}

/// `|x[i]|`
pub fn abs<E: Element>(x: &[u8]) -> KernelResult<Vec<u8>> {
    let n = elements::<E>("abs", x)?;
    let mut out = output_from(x);
    for i in 0..n {
        E::load(&out, i).abs().store(&mut out, i);
    }
    Ok(pinned(out))
}

/// Running prefix sum in ascending index order
pub fn cumsum<E: Element>(x: &[u8], mode: RoundingMode) -> KernelResult<Vec<u8>> {
    let n = elements::<E>("cumsum", x)?;
    let mut out = output_from(x);
    let mut acc = E::zero();
    for i in 0..n {
        acc = acc.add(E::load(x, i), mode);
        acc.store(&mut out, i);
    }
    Ok(pinned(out))
}

/// Extreme element, skipping NaNs unless every element is NaN
fn extreme<E: Element>(
    operation: &str,
    x: &[u8],
    keep: std::cmp::Ordering,
) -> KernelResult<Vec<u8>> {
    let n = elements::<E>(operation, x)?;
    if n == 0 {
        return Err(KernelError::empty_input(operation));
    }
    let best = (1..n).map(|i| E::load(x, i)).fold(E::load(x, 0), |best, v| {
        if best.is_nan() || v.compare(best) == Some(keep) {
            v
        } else {
            best
        }
    });
    Ok(scalar_output(best))
}

/// Smallest element as a one-element buffer
pub fn min<E: Element>(x: &[u8]) -> KernelResult<Vec<u8>> {
    extreme::<E>("min", x, std::cmp::Ordering::Less)
}

/// Largest element as a one-element buffer
pub fn max<E: Element>(x: &[u8]) -> KernelResult<Vec<u8>> {
    extreme::<E>("max", x, std::cmp::Ordering::Greater)
}

/// `1.0` where `x[i] <op> y[i]` holds, `0.0` otherwise (NaN compares false)
pub fn compare<E: Element>(x: &[u8], y: &[u8], relation: Comparison) -> KernelResult<Vec<u8>> {
    use std::cmp::Ordering::{Equal, Greater, Less};

    let n = paired::<E>(relation.name(), x, y)?;
    let mut out = vec![0u8; x.len()];
    for i in 0..n {
        let holds = match (relation, E::load(x, i).compare(E::load(y, i))) {
            (Comparison::Gt, Some(Greater)) => true,
            (Comparison::Ge, Some(Greater | Equal)) => true,
            (Comparison::Lt, Some(Less)) => true,
            (Comparison::Le, Some(Less | Equal)) => true,
            _ => false,
        };
        let value = if holds { E::one() } else { E::zero() };
        value.store(&mut out, i);
    }
    Ok(pinned(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{pack, unpack};
    use rustc_apfloat::ieee::{Double, Half, Quad, Single};

    const NEAREST: RoundingMode = RoundingMode::Nearest;

    fn data<E: Element>(out: &[u8]) -> Vec<f64> {
        assert_eq!(out.last(), Some(&codec::SENTINEL));
        unpack::<E>(&out[..out.len() - 1])
    }

    #[test]
    fn test_add_single() {
        let x = pack::<Single>(&[1.0, 2.0, 3.0]);
        let y = pack::<Single>(&[0.0, 0.0, 0.0]);
        let out = add::<Single>(&x, &y, NEAREST).unwrap();
        assert_eq!(data::<Single>(&out), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sub_sign_convention() {
        let x = pack::<Double>(&[5.0, 1.0]);
        let y = pack::<Double>(&[2.0, 4.0]);
        let out = sub::<Double>(&x, &y, NEAREST).unwrap();
        assert_eq!(data::<Double>(&out), vec![3.0, -3.0]);
    }

    #[test]
    fn test_mul_div() {
        let x = pack::<Half>(&[6.0, 1.0]);
        let y = pack::<Half>(&[3.0, 4.0]);
        assert_eq!(
            data::<Half>(&mul::<Half>(&x, &y, NEAREST).unwrap()),
            vec![18.0, 4.0]
        );
        assert_eq!(
            data::<Half>(&div::<Half>(&x, &y, NEAREST).unwrap()),
            vec![2.0, 0.25]
        );
    }

    #[test]
    fn test_length_mismatch() {
        let x = pack::<Single>(&[1.0, 2.0]);
        let y = pack::<Single>(&[1.0]);
        assert_eq!(
            add::<Single>(&x, &y, NEAREST),
            Err(KernelError::length_mismatch("add", 8, 4))
        );
    }

    #[test]
    fn test_misaligned() {
        let x = vec![0u8; 6];
        assert_eq!(
            abs::<Single>(&x),
            Err(KernelError::misaligned("abs", 6, 4))
        );
    }

    #[test]
    fn test_scalar_ops() {
        let x = pack::<Single>(&[2.0, 4.0]);
        let three = Single::from_f64(3.0);
        let two = Single::from_f64(2.0);
        assert_eq!(
            data::<Single>(&scalar_add::<Single>(&x, three, NEAREST).unwrap()),
            vec![5.0, 7.0]
        );
        assert_eq!(
            data::<Single>(&scalar_sub::<Single>(&x, three, NEAREST).unwrap()),
            vec![-1.0, 1.0]
        );
        assert_eq!(
            data::<Single>(&scalar_mul::<Single>(&x, three, NEAREST).unwrap()),
            vec![6.0, 12.0]
        );
        assert_eq!(
            data::<Single>(&scalar_div::<Single>(&x, two, NEAREST).unwrap()),
            vec![1.0, 2.0]
        );
    }

    #[test]
    fn test_scalar_div_uses_reciprocal() {
        // 3 * (1/3) rounds differently from 3 / 3 in binary32 under toward-zero
        let x = pack::<Single>(&[3.0]);
        let three = Single::from_f64(3.0);
        let out = scalar_div::<Single>(&x, three, RoundingMode::TowardZero).unwrap();
        let value = data::<Single>(&out)[0];
        assert!(value < 1.0);
        assert!(value > 0.99999);
    }

    #[test]
    fn test_dot_and_trace() {
        let x = pack::<Quad>(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            data::<Quad>(&dot::<Quad>(&x, &x, NEAREST).unwrap()),
            vec![30.0]
        );
        assert_eq!(
            data::<Quad>(&trace::<Quad>(&x, 2, NEAREST).unwrap()),
            vec![17.0]
        );
    }

    #[test]
    fn test_matmul_identity() {
        let x = pack::<Double>(&[1.0, 2.0, 3.0, 4.0]);
        let id = pack::<Double>(&[1.0, 0.0, 0.0, 1.0]);
        let out = matmul::<Double>(&x, &id, 2, 2, 2, NEAREST).unwrap();
        assert_eq!(data::<Double>(&out), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_matmul_wrong_length() {
        let x = pack::<Double>(&[1.0, 2.0, 3.0]);
        let y = pack::<Double>(&[1.0, 2.0]);
        assert!(matmul::<Double>(&x, &y, 2, 2, 1, NEAREST).is_err());
    }

    #[test]
    fn test_matmul_result_size_overflow() {
        let huge = usize::MAX / 2;
        let err = matmul::<Quad>(&[], &[], 4, 0, huge, NEAREST).unwrap_err();
        assert_eq!(err, KernelError::size_overflow("mmul", &[4, huge]));
    }

    #[test]
    fn test_square_size_overflow() {
        let side = usize::MAX / 4;
        assert!(matches!(
            diag::<Single>(&[], side),
            Err(KernelError::SizeOverflow { .. })
        ));
        assert!(matches!(
            transpose::<Half>(&[], side, 3),
            Err(KernelError::SizeOverflow { .. })
        ));
    }

    #[test]
    fn test_diag() {
        let x = pack::<Single>(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let out = diag::<Single>(&x, 3).unwrap();
        assert_eq!(data::<Single>(&out), vec![1.0, 5.0, 9.0]);
    }

    #[test]
    fn test_transpose() {
        let x = pack::<Half>(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let out = transpose::<Half>(&x, 2, 3).unwrap();
        assert_eq!(data::<Half>(&out), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_abs_cumsum() {
        let x = pack::<Single>(&[-1.0, 2.0, -3.0]);
        assert_eq!(data::<Single>(&abs::<Single>(&x).unwrap()), vec![1.0, 2.0, 3.0]);
        assert_eq!(
            data::<Single>(&cumsum::<Single>(&x, NEAREST).unwrap()),
            vec![-1.0, 1.0, -2.0]
        );
    }

    #[test]
    fn test_min_max_skip_nan() {
        let x = pack::<Double>(&[f64::NAN, 3.0, -7.0, 5.0]);
        assert_eq!(data::<Double>(&min::<Double>(&x).unwrap()), vec![-7.0]);
        assert_eq!(data::<Double>(&max::<Double>(&x).unwrap()), vec![5.0]);

        let all_nan = pack::<Double>(&[f64::NAN, f64::NAN]);
        assert!(data::<Double>(&max::<Double>(&all_nan).unwrap())[0].is_nan());
    }

    #[test]
    fn test_min_empty() {
        assert_eq!(min::<Single>(&[]), Err(KernelError::empty_input("min")));
    }

    #[test]
    fn test_compare() {
        let x = pack::<Single>(&[1.0, 2.0, 3.0, f64::NAN]);
        let y = pack::<Single>(&[2.0, 2.0, 2.0, 1.0]);
        let cases = [
            (Comparison::Gt, vec![0.0, 0.0, 1.0, 0.0]),
            (Comparison::Ge, vec![0.0, 1.0, 1.0, 0.0]),
            (Comparison::Lt, vec![1.0, 0.0, 0.0, 0.0]),
            (Comparison::Le, vec![1.0, 1.0, 0.0, 0.0]),
        ];
        for (relation, expected) in cases {
            let out = compare::<Single>(&x, &y, relation).unwrap();
            assert_eq!(data::<Single>(&out), expected, "{}", relation.name());
        }
    }
}
