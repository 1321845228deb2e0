//! Typed boundary between host values and the dispatcher
//!
//! Hosts hand operands over through [`TensorOperand`] and [`ScalarOperand`]
//! and supply the rounding discriminant through [`CallContext`]. The
//! dispatcher never inspects host values in any other way.
//!
//! [`TensorValue`] is always a well-formed operand. [`HostTensor`] models a
//! host value whose payload may be an arbitrary tree, so that malformed input
//! can be represented and rejected.

use num_bigint::BigUint;
use tenacc_core::{CoreResult, Kind, Precision, TensorMeta, TensorValue};
use tenacc_kernels::element::{pack, unpack};
use tenacc_kernels::{dispatch_precision, RoundingMode};

/// View of an operand payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// A single integer
    Atom(&'a BigUint),
    /// Anything else; always rejected
    Composite,
}

/// A tensor operand as seen by the dispatcher
pub trait TensorOperand {
    /// Decoded metadata
    fn meta(&self) -> &TensorMeta;
    /// Raw payload
    fn payload(&self) -> Payload<'_>;
}

impl TensorOperand for TensorValue {
    fn meta(&self) -> &TensorMeta {
        &self.meta
    }

    fn payload(&self) -> Payload<'_> {
        Payload::Atom(&self.payload)
    }
}

/// A scalar operand for the broadcast operations
///
/// The atom holds the raw bits of one element at the tensor operand's
/// precision.
pub trait ScalarOperand {
    /// The scalar integer, or `None` if the host value is not an atom
    fn atom(&self) -> Option<&BigUint>;
}

impl ScalarOperand for BigUint {
    fn atom(&self) -> Option<&BigUint> {
        Some(self)
    }
}

/// Source of the rounding discriminant for one call
pub trait CallContext {
    /// One of `n`, `z`, `u`, `d`, `a`; anything else is rejected
    fn rounding_discriminant(&self) -> char;
}

impl CallContext for RoundingMode {
    fn rounding_discriminant(&self) -> char {
        self.discriminant()
    }
}

impl CallContext for char {
    fn rounding_discriminant(&self) -> char {
        *self
    }
}

/// Generic host value: an integer or a pair of values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostValue {
    /// Integer leaf
    Atom(BigUint),
    /// Pair
    Cell(Box<HostValue>, Box<HostValue>),
}

impl HostValue {
    /// Build a pair
    pub fn cell(head: HostValue, tail: HostValue) -> Self {
        HostValue::Cell(Box::new(head), Box::new(tail))
    }
}

impl From<BigUint> for HostValue {
    fn from(value: BigUint) -> Self {
        HostValue::Atom(value)
    }
}

impl ScalarOperand for HostValue {
    fn atom(&self) -> Option<&BigUint> {
        match self {
            HostValue::Atom(value) => Some(value),
            HostValue::Cell(..) => None,
        }
    }
}

/// Tensor as received from a host whose payload is not yet known to be an atom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTensor {
    /// Tensor metadata
    pub meta: TensorMeta,
    /// Payload as supplied, atom or not
    pub payload: HostValue,
}

impl HostTensor {
    /// Pair metadata with a host payload
    pub fn new(meta: TensorMeta, payload: impl Into<HostValue>) -> Self {
        Self {
            meta,
            payload: payload.into(),
        }
    }
}

impl From<TensorValue> for HostTensor {
    fn from(value: TensorValue) -> Self {
        HostTensor::new(value.meta, value.payload)
    }
}

impl TensorOperand for HostTensor {
    fn meta(&self) -> &TensorMeta {
        &self.meta
    }

    fn payload(&self) -> Payload<'_> {
        match &self.payload {
            HostValue::Atom(value) => Payload::Atom(value),
            HostValue::Cell(..) => Payload::Composite,
        }
    }
}

/// Build a pinned `real` tensor from binary64 values
///
/// Values are rounded to nearest-even into `precision`.
///
/// # Examples
///
/// ```
/// use tenacc_core::Precision;
/// use tenacc_exec::{real_tensor, real_values};
///
/// let t = real_tensor(&[2], Precision::Single, &[1.5, -3.0]);
/// assert_eq!(real_values(&t).unwrap(), vec![1.5, -3.0]);
/// ```
pub fn real_tensor(shape: &[u64], precision: Precision, values: &[f64]) -> TensorValue {
    let meta = TensorMeta::new(shape, precision, Kind::Real);
    let data = dispatch_precision!(precision, E => pack::<E>(values));
    TensorValue::from_data(meta, &data)
}

/// Raw bits of one element of `precision`, as a scalar operand
pub fn real_scalar(precision: Precision, value: f64) -> BigUint {
    let data = dispatch_precision!(precision, E => pack::<E>(&[value]));
    BigUint::from_bytes_le(&data)
}

/// Decode the elements of a tensor as binary64 values
pub fn real_values(tensor: &TensorValue) -> CoreResult<Vec<f64>> {
    let precision = tensor.meta.precision.precision()?;
    let data = tensor.data()?;
    Ok(dispatch_precision!(precision, E => unpack::<E>(&data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_tensor_payload_views() {
        let meta = TensorMeta::new(&[1], Precision::Half, Kind::Real);
        let atom = HostTensor::new(meta.clone(), BigUint::from(7u8));
        assert_eq!(atom.payload(), Payload::Atom(&BigUint::from(7u8)));

        let cell = HostTensor::new(
            meta,
            HostValue::cell(BigUint::from(1u8).into(), BigUint::from(2u8).into()),
        );
        assert_eq!(cell.payload(), Payload::Composite);
    }

    #[test]
    fn test_scalar_operands() {
        let value = BigUint::from(5u8);
        assert_eq!(value.atom(), Some(&value));

        let pair = HostValue::cell(value.clone().into(), value.into());
        assert_eq!(pair.atom(), None);
    }

    #[test]
    fn test_call_context() {
        assert_eq!(RoundingMode::Up.rounding_discriminant(), 'u');
        assert_eq!('x'.rounding_discriminant(), 'x');
    }

    #[test]
    fn test_real_scalar_bits() {
        let one = real_scalar(Precision::Half, 1.0);
        assert_eq!(one, BigUint::from(0x3c00u16));
    }

    #[test]
    fn test_real_tensor_round_trip() {
        for precision in Precision::ALL {
            let t = real_tensor(&[3], precision, &[0.0, 2.0, -0.5]);
            assert_eq!(real_values(&t).unwrap(), vec![0.0, 2.0, -0.5]);
        }
    }
}
