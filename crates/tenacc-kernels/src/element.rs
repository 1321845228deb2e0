//! Fixed-width soft-float elements
//!
//! [`Element`] is the numeric abstraction every kernel is written against. It
//! is implemented once per supported IEEE-754 binary format using the
//! `rustc_apfloat` software implementation, so all four widths (including
//! binary128) round identically on every host and honor the requested
//! [`RoundingMode`] exactly.
//!
//! Elements are stored little-endian, `BYTES` bytes each, matching the
//! payload layout of `tenacc_core::TensorValue`.

use std::cmp::Ordering;

use rustc_apfloat::ieee::{Double, Half, Quad, Single};
use rustc_apfloat::{Float, FloatConvert};
use tenacc_core::Precision;

use crate::rounding::RoundingMode;

/// A fixed-width floating-point element with explicit rounding
pub trait Element: Copy + Send + Sync + 'static {
    /// The precision this element implements
    const PRECISION: Precision;
    /// Storage width in bytes
    const BYTES: usize;

    /// Positive zero
    fn zero() -> Self;
    /// One
    fn one() -> Self;

    /// Read from the first `BYTES` bytes of `bytes` (little-endian)
    fn read(bytes: &[u8]) -> Self;
    /// Write into the first `BYTES` bytes of `out` (little-endian)
    fn write(self, out: &mut [u8]);

    /// `self + rhs`
    fn add(self, rhs: Self, mode: RoundingMode) -> Self;
    /// `self - rhs`
    fn sub(self, rhs: Self, mode: RoundingMode) -> Self;
    /// `self * rhs`
    fn mul(self, rhs: Self, mode: RoundingMode) -> Self;
    /// `self / rhs`
    fn div(self, rhs: Self, mode: RoundingMode) -> Self;

    /// Sign flip (exact)
    fn neg(self) -> Self;
    /// Absolute value (exact)
    fn abs(self) -> Self;
    /// IEEE partial order; `None` when either side is NaN
    fn compare(self, rhs: Self) -> Option<Ordering>;
    /// Any NaN, quiet or signaling
    fn is_nan(self) -> bool;
    /// Positive or negative zero
    fn is_zero(self) -> bool;

    /// Convert from binary64, rounding to nearest-even
    fn from_f64(value: f64) -> Self;
    /// Convert to binary64, rounding to nearest-even
    fn to_f64(self) -> f64;

    /// Read element `index` of a packed buffer
    fn load(buf: &[u8], index: usize) -> Self {
        Self::read(&buf[index * Self::BYTES..])
    }

    /// Write element `index` of a packed buffer
    fn store(self, buf: &mut [u8], index: usize) {
        self.write(&mut buf[index * Self::BYTES..]);
    }
}

macro_rules! impl_element {
    ($ty:ty, $precision:expr, $bytes:expr) => {
        impl Element for $ty {
            const PRECISION: Precision = $precision;
            const BYTES: usize = $bytes;

            fn zero() -> Self {
                <$ty as Float>::from_bits(0)
            }

            fn one() -> Self {
                <$ty as Element>::from_f64(1.0)
            }

            fn read(bytes: &[u8]) -> Self {
                let mut raw = [0u8; 16];
                raw[..$bytes].copy_from_slice(&bytes[..$bytes]);
                <$ty as Float>::from_bits(u128::from_le_bytes(raw))
            }

            fn write(self, out: &mut [u8]) {
                let raw = Float::to_bits(self).to_le_bytes();
                out[..$bytes].copy_from_slice(&raw[..$bytes]);
            }

            fn add(self, rhs: Self, mode: RoundingMode) -> Self {
                self.add_r(rhs, mode.to_round()).value
            }

            fn sub(self, rhs: Self, mode: RoundingMode) -> Self {
                self.sub_r(rhs, mode.to_round()).value
            }

            fn mul(self, rhs: Self, mode: RoundingMode) -> Self {
                self.mul_r(rhs, mode.to_round()).value
            }

            fn div(self, rhs: Self, mode: RoundingMode) -> Self {
                self.div_r(rhs, mode.to_round()).value
            }

            fn neg(self) -> Self {
                -self
            }

            fn abs(self) -> Self {
                if Float::is_negative(self) {
                    -self
                } else {
                    self
                }
            }

            fn compare(self, rhs: Self) -> Option<Ordering> {
                PartialOrd::partial_cmp(&self, &rhs)
            }

            fn is_nan(self) -> bool {
                Float::is_nan(self)
            }

            fn is_zero(self) -> bool {
                Float::is_zero(self)
            }

            fn from_f64(value: f64) -> Self {
                let mut loses_info = false;
                let double = Double::from_bits(u128::from(value.to_bits()));
                FloatConvert::<$ty>::convert(double, &mut loses_info).value
            }

            fn to_f64(self) -> f64 {
                let mut loses_info = false;
                let double: Double = FloatConvert::<Double>::convert(self, &mut loses_info).value;
                f64::from_bits(Float::to_bits(double) as u64)
            }
        }
    };
}

impl_element!(Half, Precision::Half, 2);
impl_element!(Single, Precision::Single, 4);
impl_element!(Double, Precision::Double, 8);
impl_element!(Quad, Precision::Quad, 16);

/// Pack binary64 values into a buffer of `E` elements
///
/// # Examples
///
/// ```
/// use rustc_apfloat::ieee::Single;
/// use tenacc_kernels::element::{pack, unpack};
///
/// let bytes = pack::<Single>(&[1.5, -2.0]);
/// assert_eq!(bytes.len(), 8);
/// assert_eq!(unpack::<Single>(&bytes), vec![1.5, -2.0]);
/// ```
pub fn pack<E: Element>(values: &[f64]) -> Vec<u8> {
    let mut out = vec![0u8; values.len() * E::BYTES];
    for (i, &value) in values.iter().enumerate() {
        E::from_f64(value).store(&mut out, i);
    }
    out
}

/// Unpack a buffer of `E` elements into binary64 values
pub fn unpack<E: Element>(bytes: &[u8]) -> Vec<f64> {
    (0..bytes.len() / E::BYTES)
        .map(|i| E::load(bytes, i).to_f64())
        .collect()
}
