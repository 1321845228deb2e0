//! Integration tests for tenacc-exec
//!
//! These tests drive the accelerator the way a host would: raw payload
//! integers and metadata in, pinned payload integers out.

use half::f16;
use num_bigint::BigUint;
use tenacc_core::codec;
use tenacc_core::{Kind, Precision, TensorMeta, TensorValue};
use tenacc_exec::{
    CpuAccelerator, ExecError, HostTensor, HostValue, Outcome, RoundingMode, TensorAccelerator,
};

fn half_tensor(shape: &[u64], values: &[f32]) -> TensorValue {
    let data: Vec<u8> = values
        .iter()
        .flat_map(|v| f16::from_f32(*v).to_bits().to_le_bytes())
        .collect();
    TensorValue::from_data(TensorMeta::new(shape, Precision::Half, Kind::Real), &data)
}

fn half_values(tensor: &TensorValue) -> Vec<f32> {
    tensor
        .data()
        .unwrap()
        .chunks_exact(2)
        .map(|c| f16::from_bits(u16::from_le_bytes([c[0], c[1]])).to_f32())
        .collect()
}

#[test]
fn test_half_matmul_matches_half_crate() {
    let acc = CpuAccelerator::new();
    let x = half_tensor(&[2, 2], &[1.0, 2.0, 3.0, 4.0]);
    let y = half_tensor(&[2, 2], &[0.5, -1.0, 0.25, 2.0]);

    let out = acc.matmul(&x, &y, &'n').unwrap().value().unwrap();
    assert_eq!(&out.meta.shape[..], &[2, 2]);
    assert_eq!(half_values(&out), vec![1.0, 3.0, 2.5, 5.0]);
}

#[test]
fn test_half_rounding_against_half_crate() {
    let acc = CpuAccelerator::new();
    let x = half_tensor(&[1], &[1.0]);
    let y = half_tensor(&[1], &[3.0]);

    let nearest = acc.div(&x, &y, &'n').unwrap().value().unwrap();
    assert_eq!(half_values(&nearest), vec![f16::from_f32(1.0 / 3.0).to_f32()]);

    let up = acc.div(&x, &y, &'u').unwrap().value().unwrap();
    let down = acc.div(&x, &y, &'d').unwrap().value().unwrap();
    let (up, down) = (half_values(&up)[0], half_values(&down)[0]);
    assert!(down < 1.0 / 3.0 && 1.0 / 3.0 < up);
    assert_eq!(f16::from_f32(up).to_bits() - f16::from_f32(down).to_bits(), 1);
}

#[test]
fn test_results_are_pinned() {
    let acc = CpuAccelerator::new();
    let x = half_tensor(&[3], &[0.0, 0.0, 0.0]);

    let out = acc.abs(&x, &'n').unwrap().value().unwrap();
    assert_eq!(codec::natural_len(&out.payload), codec::pinned_len(6));
    assert_eq!(codec::decode(&out.payload, 7)[6], codec::SENTINEL);
}

#[test]
fn test_host_values_through_boundary() {
    let acc = CpuAccelerator::new();
    let x: HostTensor = half_tensor(&[2], &[1.0, 2.0]).into();
    let n = HostValue::from(BigUint::from(f16::from_f32(4.0).to_bits()));

    let out = acc.scalar_mul(&x, &n, &RoundingMode::Nearest).unwrap();
    let out = out.value().unwrap();
    assert_eq!(half_values(&out), vec![4.0, 8.0]);
}

#[test]
fn test_fatal_and_abstain_are_distinct() {
    let acc = CpuAccelerator::new();
    let x = half_tensor(&[2], &[1.0, 2.0]);
    let mut cplx = x.clone();
    cplx.meta.kind = Kind::Cplx;

    assert_eq!(acc.add(&cplx, &cplx, &'n'), Ok(Outcome::Unsupported));
    assert!(matches!(
        acc.add(&x, &cplx, &'n'),
        Err(ExecError::KindMismatch { .. })
    ));
}

#[test]
fn test_accelerator_as_trait_object() {
    let accelerators: Vec<Box<dyn TensorAccelerator>> = vec![Box::new(CpuAccelerator::new())];
    let x = half_tensor(&[2, 2], &[1.0, 2.0, 3.0, 4.0]);
    for acc in &accelerators {
        let out = acc.trace(&x, &'z').unwrap().value().unwrap();
        assert_eq!(half_values(&out), vec![17.0]);
    }
}
