//! # tenacc-core
//!
//! Tensor metadata, shape analysis and the payload codec for tenacc.
//!
//! A tensor crosses the host boundary as a [`TensorMeta`] plus an
//! arbitrary-precision integer payload. This crate provides the pieces every
//! kernel call needs before any arithmetic happens:
//!
//! - **Metadata** ([`TensorMeta`], [`Precision`], [`Kind`]) decoded once into typed fields
//! - **Shape analysis** ([`shape`]) with checked 64-bit element counts
//! - **Payload codec** ([`codec`]) converting integers to fixed-length byte buffers
//!   without losing high zero bytes
//!
//! ## Quick Start
//!
//! ```
//! use tenacc_core::{Kind, Precision, TensorMeta, TensorValue};
//!
//! let meta = TensorMeta::new(&[2], Precision::Half, Kind::Real);
//! // 1.0 and 0.0 as binary16, little-endian
//! let tensor = TensorValue::from_data(meta, &[0x00, 0x3c, 0x00, 0x00]);
//!
//! assert_eq!(tensor.meta.element_count().unwrap(), 2);
//! assert_eq!(tensor.data().unwrap(), vec![0x00, 0x3c, 0x00, 0x00]);
//! ```
//!
//! ## Payload Layout
//!
//! Element `i` occupies bytes `i * w .. (i + 1) * w` of the little-endian
//! rendering of the payload, where `w` is [`Precision::bytes_per_element`].
//! A sentinel byte of value 1 sits directly above the last data byte.
//!
//! ## Features
//!
//! - `serde`: Enable serialization of metadata and tensor values

#![deny(warnings)]

pub mod codec;
pub mod error;
pub mod shape;
pub mod types;


pub use error::{CoreError, CoreResult};
pub use types::{Kind, Precision, PrecisionClass, Shape, TensorMeta, TensorValue};

pub use num_bigint::BigUint;
