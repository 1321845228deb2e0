//! # tenacc - soft-float tensor acceleration
//!
//! Tensors cross the host boundary as metadata plus one arbitrary-precision
//! integer payload. tenacc validates operands, decodes payloads into
//! fixed-width element buffers, runs a 16/32/64/128-bit soft-float kernel under
//! an explicit IEEE-754 rounding mode, and re-encodes the result.
//!
//! This is the **meta crate** that re-exports all tenacc components.
//!
//! ## Quick Start
//!
//! ```
//! use tenacc::prelude::*;
//!
//! let acc = CpuAccelerator::new();
//! let x = real_tensor(&[2], Precision::Single, &[2.0, 4.0]);
//! let n = real_scalar(Precision::Single, 3.0);
//!
//! let out = acc.scalar_mul(&x, &n, &RoundingMode::Nearest)?;
//! let out = out.value().expect("real tensors always have a kernel");
//! assert_eq!(real_values(&out)?, vec![6.0, 12.0]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Metadata and Payloads ([`core`])
//!
//! `TensorMeta`, checked shape arithmetic and the sentinel-pinned byte codec.
//!
//! ```
//! use tenacc::core::codec::{decode, encode, pin};
//!
//! let mut buf = vec![7, 0, 0];
//! pin(&mut buf);
//! assert_eq!(&decode(&encode(&buf), 4)[..3], &[7, 0, 0]);
//! ```
//!
//! ### Kernels ([`kernels`])
//!
//! The `Element` trait, BLAS-style routines and per-operation kernels.
//!
//! ### Dispatch ([`exec`])
//!
//! `TensorAccelerator`, validation and the fatal/abstain outcome model.
//!
//! ## Features
//!
//! - `serde`: Serialize metadata, tensor values, rounding modes and hints

#![deny(warnings)]

// Re-export all components
pub use tenacc_core as core;
pub use tenacc_exec as exec;
pub use tenacc_kernels as kernels;

pub mod tracing_support;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tenacc::prelude::*;
    //!
    //! let meta = TensorMeta::new(&[2, 2], Precision::Half, Kind::Real);
    //! assert_eq!(meta.byte_len().unwrap(), 8);
    //! ```

    // Core types
    pub use crate::core::{Kind, Precision, PrecisionClass, TensorMeta, TensorValue};

    // Kernels
    pub use crate::kernels::{Comparison, RoundingMode};

    // Execution
    pub use crate::exec::{
        real_scalar, real_tensor, real_values, CallContext, CpuAccelerator, ExecError,
        ExecHints, HostTensor, Outcome, ScalarOperand, TensorAccelerator, TensorOperand,
    };
}
