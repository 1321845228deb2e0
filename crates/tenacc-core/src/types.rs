//! Core type definitions for tenacc tensors.
//!
//! This module defines the metadata carried next to every tensor payload:
//!
//! - [`Shape`]: per-axis sizes, outermost axis first
//! - [`PrecisionClass`]: the raw log2 bit width as supplied by the host
//! - [`Precision`]: the four bit widths that have kernels
//! - [`Kind`]: how elements are interpreted
//! - [`TensorMeta`] and [`TensorValue`]: the metadata/payload pair
//!
//! # Examples
//!
//! ```
//! use tenacc_core::{Kind, Precision, TensorMeta};
//!
//! let meta = TensorMeta::new(&[2, 3], Precision::Single, Kind::Real);
//! assert_eq!(meta.rank(), 2);
//! assert_eq!(meta.element_count().unwrap(), 6);
//! assert_eq!(meta.byte_len().unwrap(), 24);
//! ```

use std::fmt;

use num_bigint::BigUint;
use smallvec::SmallVec;

use crate::codec;
use crate::error::{CoreError, CoreResult};
use crate::shape;

/// Shape type using SmallVec to avoid heap allocation for common ranks.
pub type Shape = SmallVec<[u64; 6]>;

/// Raw precision class: the base-2 logarithm of the element bit width.
///
/// Hosts may hand over any value here. Only classes 4 through 7 have kernels;
/// see [`PrecisionClass::precision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrecisionClass(pub u8);

impl PrecisionClass {
    /// Resolve to a supported precision
    pub fn precision(self) -> CoreResult<Precision> {
        match self.0 {
            4 => Ok(Precision::Half),
            5 => Ok(Precision::Single),
            6 => Ok(Precision::Double),
            7 => Ok(Precision::Quad),
            class => Err(CoreError::UnsupportedPrecision { class }),
        }
    }
}

impl From<Precision> for PrecisionClass {
    fn from(precision: Precision) -> Self {
        PrecisionClass(precision.class())
    }
}

impl fmt::Display for PrecisionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision() {
            Ok(p) => write!(f, "{}", p),
            Err(_) => write!(f, "class {}", self.0),
        }
    }
}

/// Supported IEEE-754 binary formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precision {
    /// binary16
    Half,
    /// binary32
    Single,
    /// binary64
    Double,
    /// binary128
    Quad,
}

impl Precision {
    /// All supported precisions, narrowest first
    pub const ALL: [Precision; 4] = [
        Precision::Half,
        Precision::Single,
        Precision::Double,
        Precision::Quad,
    ];

    /// The log2 bit width (4..=7)
    pub const fn class(self) -> u8 {
        match self {
            Precision::Half => 4,
            Precision::Single => 5,
            Precision::Double => 6,
            Precision::Quad => 7,
        }
    }

    /// Element width in bits
    pub const fn bits(self) -> u32 {
        1 << self.class()
    }

    /// Element width in bytes, `2^(class - 3)`
    pub const fn bytes_per_element(self) -> u64 {
        1 << (self.class() - 3)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.bits())
    }
}

/// Element interpretation tag.
///
/// Every kind is representable so that hosts can pass it through, but only
/// [`Kind::Real`] has kernels. Operations on the others abstain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// IEEE-754 binary floating point
    Real,
    /// Unsigned integer
    Uint,
    /// Two's-complement signed integer
    Int2,
    /// Complex floating point
    Cplx,
    /// Universal number (posit)
    Unum,
}

impl Kind {
    /// Short tag used in logs
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Real => "real",
            Kind::Uint => "uint",
            Kind::Int2 => "int2",
            Kind::Cplx => "cplx",
            Kind::Unum => "unum",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing a tensor payload.
///
/// `fixed_point` is informational only. It is carried through results and is
/// never compared between operands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TensorMeta {
    /// Per-axis sizes, outermost first
    pub shape: Shape,
    /// Element bit width class
    pub precision: PrecisionClass,
    /// Element interpretation
    pub kind: Kind,
    /// Fixed-point scale, if any
    pub fixed_point: Option<u64>,
}

impl TensorMeta {
    /// Create metadata without a fixed-point scale
    pub fn new(shape: &[u64], precision: impl Into<PrecisionClass>, kind: Kind) -> Self {
        Self {
            shape: Shape::from_slice(shape),
            precision: precision.into(),
            kind,
            fixed_point: None,
        }
    }

    /// Set the fixed-point scale
    pub fn with_fixed_point(mut self, fixed_point: Option<u64>) -> Self {
        self.fixed_point = fixed_point;
        self
    }

    /// Same precision, kind and fixed-point scale with a new shape
    pub fn reshaped(&self, shape: &[u64]) -> Self {
        Self {
            shape: Shape::from_slice(shape),
            ..self.clone()
        }
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements (product of the shape)
    pub fn element_count(&self) -> CoreResult<u64> {
        shape::element_count(&self.shape)
    }

    /// Payload data length in bytes, excluding the sentinel
    pub fn byte_len(&self) -> CoreResult<usize> {
        shape::byte_len(&self.shape, self.precision.precision()?)
    }
}

/// A tensor as exchanged with the host: metadata plus an integer payload.
///
/// The payload holds the little-endian element bytes with a sentinel byte of
/// value 1 directly above the most significant data byte.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TensorValue {
    /// Tensor metadata
    pub meta: TensorMeta,
    /// Pinned payload integer
    pub payload: BigUint,
}

impl TensorValue {
    /// Wrap an existing payload integer
    pub fn new(meta: TensorMeta, payload: BigUint) -> Self {
        Self { meta, payload }
    }

    /// Build a tensor from raw element bytes, pinning them with the sentinel
    ///
    /// # Examples
    ///
    /// ```
    /// use tenacc_core::{Kind, Precision, TensorMeta, TensorValue};
    ///
    /// let meta = TensorMeta::new(&[1], Precision::Half, Kind::Real);
    /// let tensor = TensorValue::from_data(meta, &[0x00, 0x00]);
    /// assert_eq!(tensor.data().unwrap(), vec![0x00, 0x00]);
    /// ```
    pub fn from_data(meta: TensorMeta, data: &[u8]) -> Self {
        let mut pinned = Vec::with_capacity(codec::pinned_len(data.len()));
        pinned.extend_from_slice(data);
        codec::pin(&mut pinned);
        Self {
            meta,
            payload: codec::encode(&pinned),
        }
    }

    /// Decode the element bytes, sentinel stripped
    pub fn data(&self) -> CoreResult<Vec<u8>> {
        let len = self.meta.byte_len()?;
        Ok(codec::decode(&self.payload, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_class_resolution() {
        assert_eq!(PrecisionClass(4).precision().unwrap(), Precision::Half);
        assert_eq!(PrecisionClass(7).precision().unwrap(), Precision::Quad);
        assert_eq!(
            PrecisionClass(3).precision(),
            Err(CoreError::UnsupportedPrecision { class: 3 })
        );
        assert!(PrecisionClass(8).precision().is_err());
    }

    #[test]
    fn test_bytes_per_element() {
        let widths: Vec<u64> = Precision::ALL
            .iter()
            .map(|p| p.bytes_per_element())
            .collect();
        assert_eq!(widths, vec![2, 4, 8, 16]);
        assert_eq!(Precision::Quad.bits(), 128);
    }

    #[test]
    fn test_reshaped_keeps_fixed_point() {
        let meta = TensorMeta::new(&[2, 2], Precision::Double, Kind::Real)
            .with_fixed_point(Some(8));
        let diag = meta.reshaped(&[2]);
        assert_eq!(&diag.shape[..], &[2]);
        assert_eq!(diag.fixed_point, Some(8));
        assert_eq!(diag.precision, PrecisionClass(6));
    }

    #[test]
    fn test_from_data_preserves_leading_zeros() {
        let meta = TensorMeta::new(&[2], Precision::Single, Kind::Real);
        let data = [1, 2, 3, 4, 0, 0, 0, 0];
        let tensor = TensorValue::from_data(meta, &data);
        assert_eq!(tensor.data().unwrap(), data.to_vec());
        assert_eq!(tensor.payload.bits(), 8 * 8 + 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Precision::Half.to_string(), "f16");
        assert_eq!(PrecisionClass(9).to_string(), "class 9");
        assert_eq!(Kind::Cplx.to_string(), "cplx");
    }
}
