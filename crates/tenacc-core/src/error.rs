//! Error types for tensor metadata and payload handling
//!
//! Every error here is a hard failure: a caller that receives one must not
//! attempt to produce a partial result.

use thiserror::Error;

/// Errors raised while analyzing shapes or sizing payload buffers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The product of the shape does not fit in 64 bits
    #[error("Element count of shape {shape:?} overflows u64")]
    ElementCountOverflow { shape: Vec<u64> },

    /// The byte size of a tensor does not fit in the address space
    #[error("Byte length of {elements} elements at {bytes_per_element} bytes each overflows")]
    ByteLengthOverflow {
        elements: u64,
        bytes_per_element: u64,
    },

    /// Precision class outside the supported 16/32/64/128-bit range
    #[error("Unsupported precision class {class} (expected 4..=7)")]
    UnsupportedPrecision { class: u8 },
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
