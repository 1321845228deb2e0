//! Error types for tensor kernel operations
//!
//! Kernels work on raw byte buffers. These errors report buffers that do not
//! line up with the element width or with each other, and rounding
//! discriminants that name no IEEE-754 mode.

use std::fmt;

/// Error type for tensor kernel operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Operand buffers (or a buffer and its declared shape) disagree in length
    LengthMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    /// Buffer length is not a whole number of elements
    Misaligned {
        operation: String,
        len: usize,
        width: usize,
    },

    /// Operation needs at least one element
    EmptyInput { operation: String },

    /// Buffer size implied by the dimensions does not fit in `usize`
    SizeOverflow { operation: String, dims: Vec<usize> },

    /// Rounding discriminant outside `n`, `z`, `u`, `d`, `a`
    InvalidRounding { discriminant: char },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LengthMismatch {
                operation,
                expected,
                actual,
            } => write!(
                f,
                "{}: length mismatch - expected {} bytes, got {}",
                operation, expected, actual
            ),

            KernelError::Misaligned {
                operation,
                len,
                width,
            } => write!(
                f,
                "{}: buffer of {} bytes is not a multiple of the {}-byte element width",
                operation, len, width
            ),

            KernelError::EmptyInput { operation } => {
                write!(f, "{}: empty input not allowed", operation)
            }

            KernelError::SizeOverflow { operation, dims } => {
                write!(f, "{}: buffer size of dims {:?} overflows", operation, dims)
            }

            KernelError::InvalidRounding { discriminant } => {
                write!(f, "Invalid rounding mode {:?}", discriminant)
            }
        }
    }
}

impl std::error::Error for KernelError {}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Create a length mismatch error
    pub fn length_mismatch(operation: impl Into<String>, expected: usize, actual: usize) -> Self {
        KernelError::LengthMismatch {
            operation: operation.into(),
            expected,
            actual,
        }
    }

    /// Create a misaligned buffer error
    pub fn misaligned(operation: impl Into<String>, len: usize, width: usize) -> Self {
        KernelError::Misaligned {
            operation: operation.into(),
            len,
            width,
        }
    }

    /// Create an empty input error
    pub fn empty_input(operation: impl Into<String>) -> Self {
        KernelError::EmptyInput {
            operation: operation.into(),
        }
    }

    /// Create a size overflow error
    pub fn size_overflow(operation: impl Into<String>, dims: &[usize]) -> Self {
        KernelError::SizeOverflow {
            operation: operation.into(),
            dims: dims.to_vec(),
        }
    }
}
