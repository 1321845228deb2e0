//! Shape analysis: element counts, byte sizes and matrix dimensions
//!
//! All counts are computed in `u64` with checked arithmetic. A shape whose
//! product does not fit is an error rather than a silently wrapped size.

use crate::error::{CoreError, CoreResult};
use crate::types::{Precision, Shape};

/// Number of elements described by a shape.
///
/// The empty shape describes a single element.
///
/// # Examples
///
/// ```
/// use tenacc_core::shape::element_count;
///
/// assert_eq!(element_count(&[2, 3, 4]).unwrap(), 24);
/// assert_eq!(element_count(&[]).unwrap(), 1);
/// assert!(element_count(&[u64::MAX, 2]).is_err());
/// ```
pub fn element_count(shape: &[u64]) -> CoreResult<u64> {
    shape.iter().try_fold(1u64, |acc, &dim| {
        acc.checked_mul(dim)
            .ok_or_else(|| CoreError::ElementCountOverflow {
                shape: shape.to_vec(),
            })
    })
}

/// Materialize a shape as an indexable dimension array
pub fn dims(shape: &[u64]) -> Shape {
    Shape::from_slice(shape)
}

/// Payload length in bytes for `shape` at `precision`, excluding the sentinel
pub fn byte_len(shape: &[u64], precision: Precision) -> CoreResult<usize> {
    let elements = element_count(shape)?;
    let bytes_per_element = precision.bytes_per_element();
    elements
        .checked_mul(bytes_per_element)
        .and_then(|bytes| usize::try_from(bytes).ok())
        .ok_or(CoreError::ByteLengthOverflow {
            elements,
            bytes_per_element,
        })
}

/// `(rows, cols)` of a rank-2 shape
pub fn matrix_dims(shape: &[u64]) -> Option<(u64, u64)> {
    match shape {
        [rows, cols] => Some((*rows, *cols)),
        _ => None,
    }
}

/// Side length of a square rank-2 shape
pub fn square_side(shape: &[u64]) -> Option<u64> {
    matrix_dims(shape).and_then(|(rows, cols)| (rows == cols).then_some(rows))
}
