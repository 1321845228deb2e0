//! # tenacc-kernels
//!
//! Soft-float tensor kernels for 16, 32, 64 and 128-bit IEEE-754 elements.
//!
//! ## Overview
//!
//! Every kernel operates on packed little-endian element buffers and takes an
//! explicit [`RoundingMode`]. Arithmetic is done in software through
//! `rustc_apfloat`, so binary16 and binary128 are first-class and every mode
//! rounds the same way on every host.
//!
//! **Layers:**
//! - [`element`]: the [`Element`] trait, one implementation per precision
//! - [`blas`]: `axpy`, `scal`, `dot` and `gemm` over element buffers
//! - [`ops`]: tensor operations returning pinned result buffers
//! - [`dispatch_precision!`]: run a generic kernel for a runtime [`Precision`]
//!
//! ## Quick Start
//!
//! ```rust
//! use tenacc_kernels::element::{pack, unpack};
//! use tenacc_kernels::{dispatch_precision, ops, Precision, RoundingMode};
//!
//! let precision = Precision::Half;
//! let out = dispatch_precision!(precision, E => {
//!     let x = pack::<E>(&[1.0, 2.0]);
//!     let y = pack::<E>(&[0.5, 0.5]);
//!     ops::add::<E>(&x, &y, RoundingMode::Nearest).map(|out| unpack::<E>(&out[..4]))
//! })
//! .unwrap();
//!
//! assert_eq!(out, vec![1.5, 2.5]);
//! ```
//!
//! ## Rounding
//!
//! | Mode | Discriminant | IEEE-754 attribute |
//! |------|--------------|--------------------|
//! | `Nearest` | `n` | roundTiesToEven |
//! | `TowardZero` | `z` | roundTowardZero |
//! | `Up` | `u` | roundTowardPositive |
//! | `Down` | `d` | roundTowardNegative |
//! | `Away` | `a` | roundTiesToAway |
//!
//! ## Features
//!
//! - `serde`: Serialize [`RoundingMode`]

#![deny(warnings)]

pub mod blas;
pub mod element;
pub mod error;
pub mod ops;
pub mod rounding;

#[cfg(test)]
mod property_tests;

// Re-exports
pub use element::Element;
pub use error::{KernelError, KernelResult};
pub use ops::Comparison;
pub use rounding::RoundingMode;

pub use rustc_apfloat::ieee::{Double, Half, Quad, Single};
pub use tenacc_core::Precision;

/// Evaluate an expression generically for a runtime [`Precision`]
///
/// Binds the given identifier to the matching [`Element`] type inside the
/// body, one arm per supported precision.
#[macro_export]
macro_rules! dispatch_precision {
    ($precision:expr, $elem:ident => $body:expr) => {
        match $precision {
            $crate::Precision::Half => {
                type $elem = $crate::Half;
                $body
            }
            $crate::Precision::Single => {
                type $elem = $crate::Single;
                $body
            }
            $crate::Precision::Double => {
                type $elem = $crate::Double;
                $body
            }
            $crate::Precision::Quad => {
                type $elem = $crate::Quad;
                $body
            }
        }
    };
}
