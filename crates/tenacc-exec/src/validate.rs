//! Operand validation
//!
//! Every check here is fatal. The only non-fatal outcome, abstaining on an
//! unimplemented kind, is decided by the accelerator after these checks pass.

use num_bigint::BigUint;
use tenacc_core::{codec, shape, Precision, TensorMeta};

use crate::error::{ExecError, ExecResult};
use crate::hints::ExecHints;
use crate::operand::{Payload, ScalarOperand, TensorOperand};

/// The operand's payload integer
pub fn atom<'a>(
    operation: &'static str,
    operand: &'static str,
    value: &'a dyn TensorOperand,
) -> ExecResult<&'a BigUint> {
    match value.payload() {
        Payload::Atom(atom) => Ok(atom),
        Payload::Composite => Err(ExecError::MalformedOperand { operation, operand }),
    }
}

/// The scalar's integer
pub fn scalar_atom<'a>(
    operation: &'static str,
    scalar: &'a dyn ScalarOperand,
) -> ExecResult<&'a BigUint> {
    scalar.atom().ok_or(ExecError::MalformedOperand {
        operation,
        operand: "scalar",
    })
}

/// Equal precision class and kind
pub fn same_element_type(
    operation: &'static str,
    left: &TensorMeta,
    right: &TensorMeta,
) -> ExecResult<()> {
    if left.precision != right.precision {
        return Err(ExecError::PrecisionMismatch {
            operation,
            left: left.precision.0,
            right: right.precision.0,
        });
    }
    if left.kind != right.kind {
        return Err(ExecError::KindMismatch {
            operation,
            left: left.kind,
            right: right.kind,
        });
    }
    Ok(())
}

/// Equal shape, precision class and kind; the fixed-point scale is not compared
pub fn same_layout(
    operation: &'static str,
    left: &TensorMeta,
    right: &TensorMeta,
) -> ExecResult<()> {
    if left.shape != right.shape {
        return Err(ExecError::ShapeMismatch {
            operation,
            left: left.shape.to_vec(),
            right: right.shape.to_vec(),
        });
    }
    same_element_type(operation, left, right)
}

/// `(rows, cols)` of a rank-2 operand
pub fn matrix(operation: &'static str, meta: &TensorMeta) -> ExecResult<(u64, u64)> {
    shape::matrix_dims(&meta.shape).ok_or_else(|| ExecError::NotMatrix {
        operation,
        shape: meta.shape.to_vec(),
    })
}

/// Side length of a square rank-2 operand
pub fn square(operation: &'static str, meta: &TensorMeta) -> ExecResult<u64> {
    shape::square_side(&meta.shape).ok_or_else(|| ExecError::NotSquare {
        operation,
        shape: meta.shape.to_vec(),
    })
}

/// Checked element count of `dims`, bounded by the configured limit
pub fn element_count(
    operation: &'static str,
    dims: &[u64],
    hints: &ExecHints,
) -> ExecResult<u64> {
    let elements = shape::element_count(dims)?;
    if elements > hints.max_elements {
        return Err(ExecError::TooLarge {
            operation,
            elements,
            limit: hints.max_elements,
        });
    }
    Ok(elements)
}

/// Byte length of a result of shape `dims`, bounded by the configured limits
pub fn result_len(
    operation: &'static str,
    dims: &[u64],
    precision: Precision,
    hints: &ExecHints,
) -> ExecResult<usize> {
    element_count(operation, dims, hints)?;
    let len = shape::byte_len(dims, precision)?;
    let bytes = u64::try_from(len).unwrap_or(u64::MAX);
    if bytes > hints.max_result_bytes {
        return Err(ExecError::ResultTooLarge {
            operation,
            bytes,
            limit: hints.max_result_bytes,
        });
    }
    Ok(len)
}

/// Convert a dimension to a buffer index
pub fn index(operation: &'static str, dim: u64) -> ExecResult<usize> {
    usize::try_from(dim).map_err(|_| ExecError::DimensionOverflow { operation, dim })
}

/// Decode `len` bytes of element data from a payload
///
/// In strict mode a payload whose natural width exceeds `len` plus the
/// sentinel is rejected rather than truncated.
pub fn read_bytes(
    operation: &'static str,
    payload: &BigUint,
    len: usize,
    limit: usize,
    hints: &ExecHints,
) -> ExecResult<Vec<u8>> {
    let actual = codec::natural_len(payload);
    if hints.strict_payload && actual > limit {
        return Err(ExecError::OversizedPayload {
            operation,
            expected: limit,
            actual,
        });
    }
    Ok(codec::decode(payload, len))
}

/// Decode the element data of a tensor operand
pub fn read_data(
    operation: &'static str,
    payload: &BigUint,
    meta: &TensorMeta,
    hints: &ExecHints,
) -> ExecResult<Vec<u8>> {
    let len = meta.byte_len()?;
    read_bytes(operation, payload, len, codec::pinned_len(len), hints)
}
