//! Fatal errors raised by the dispatcher
//!
//! An [`ExecError`] means the call cannot produce any result and the host must
//! abandon the current computation. Operations that are merely not
//! implemented for an operand's kind do not error; they return
//! [`crate::Outcome::Unsupported`] instead.

use tenacc_core::{CoreError, Kind};
use tenacc_kernels::KernelError;
use thiserror::Error;

/// Fatal dispatcher error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// Shape or payload sizing failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Kernel rejected its buffers or the rounding discriminant
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// Operand payload is not a single integer
    #[error("{operation}: operand {operand} is not an atom")]
    MalformedOperand {
        operation: &'static str,
        operand: &'static str,
    },

    /// Elementwise operands disagree in shape
    #[error("{operation}: shape mismatch - {left:?} vs {right:?}")]
    ShapeMismatch {
        operation: &'static str,
        left: Vec<u64>,
        right: Vec<u64>,
    },

    /// Operands disagree in precision class
    #[error("{operation}: precision mismatch - class {left} vs class {right}")]
    PrecisionMismatch {
        operation: &'static str,
        left: u8,
        right: u8,
    },

    /// Operands disagree in kind
    #[error("{operation}: kind mismatch - {left} vs {right}")]
    KindMismatch {
        operation: &'static str,
        left: Kind,
        right: Kind,
    },

    /// Operand is not a rank-2 tensor
    #[error("{operation}: expected a matrix, got shape {shape:?}")]
    NotMatrix {
        operation: &'static str,
        shape: Vec<u64>,
    },

    /// Matrix product operands do not chain
    #[error("mmul: inner dimensions differ - {left:?} x {right:?}")]
    InnerDimensionMismatch { left: Vec<u64>, right: Vec<u64> },

    /// Operand is not a square matrix
    #[error("{operation}: expected a square matrix, got shape {shape:?}")]
    NotSquare {
        operation: &'static str,
        shape: Vec<u64>,
    },

    /// Tensor exceeds the configured element limit
    #[error("{operation}: {elements} elements exceeds the limit of {limit}")]
    TooLarge {
        operation: &'static str,
        elements: u64,
        limit: u64,
    },

    /// Result buffer exceeds the configured byte limit
    #[error("{operation}: result of {bytes} bytes exceeds the limit of {limit}")]
    ResultTooLarge {
        operation: &'static str,
        bytes: u64,
        limit: u64,
    },

    /// Dimension does not fit in the address space
    #[error("{operation}: dimension {dim} does not fit in usize")]
    DimensionOverflow { operation: &'static str, dim: u64 },

    /// Payload integer is wider than its metadata allows (strict mode)
    #[error("{operation}: payload of {actual} bytes exceeds the {expected}-byte layout")]
    OversizedPayload {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type for dispatcher operations
pub type ExecResult<T> = Result<T, ExecError>;
