//! # tenacc-exec
//!
//! Validating dispatcher for tenacc.
//!
//! This crate provides:
//! - [`TensorAccelerator`] - one entry point per tensor operation
//! - [`CpuAccelerator`] - soft-float implementation on the calling thread
//! - [`TensorOperand`], [`ScalarOperand`] and [`CallContext`] - the typed host boundary
//! - [`ExecHints`] - element limits, payload strictness and a fallback rounding mode
//!
//! Each call returns `Result<Outcome<TensorValue>, ExecError>`. An `Err` is
//! fatal and the host must abandon the computation. `Ok(Outcome::Unsupported)`
//! is an abstention: the operand kind has no kernel and the host should run its
//! reference implementation instead.
//!
//! ## Example
//!
//! ```
//! use tenacc_core::{Kind, Precision};
//! use tenacc_exec::{real_tensor, real_values, CpuAccelerator, Outcome, TensorAccelerator};
//!
//! let acc = CpuAccelerator::new();
//! let x = real_tensor(&[2, 2], Precision::Double, &[1.0, 2.0, 3.0, 4.0]);
//!
//! let diag = acc.diag(&x, &'n').unwrap().value().unwrap();
//! assert_eq!(real_values(&diag).unwrap(), vec![1.0, 4.0]);
//!
//! let mut uint = x.clone();
//! uint.meta.kind = Kind::Uint;
//! assert_eq!(acc.diag(&uint, &'n').unwrap(), Outcome::Unsupported);
//! ```

#![deny(warnings)]

pub mod accelerator;
pub mod error;
pub mod hints;
pub mod operand;
pub mod outcome;
pub mod validate;


// Re-exports
pub use accelerator::{CpuAccelerator, ExecOutcome, TensorAccelerator};
pub use error::{ExecError, ExecResult};
pub use hints::{ExecHints, DEFAULT_MAX_ELEMENTS, DEFAULT_MAX_RESULT_BYTES};
pub use operand::{
    real_scalar, real_tensor, real_values, CallContext, HostTensor, HostValue, Payload,
    ScalarOperand, TensorOperand,
};
pub use outcome::Outcome;

pub use tenacc_kernels::{Comparison, RoundingMode};
