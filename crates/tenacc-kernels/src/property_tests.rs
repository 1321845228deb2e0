//! Property-based tests for tensor kernel operations
//!
//! These tests check algebraic facts that hold exactly in IEEE-754 arithmetic
//! for the generated inputs.

use super::element::{pack, unpack};
use super::*;
use proptest::prelude::*;
use tenacc_core::codec::SENTINEL;

/// Small integers are exact in every precision, including binary16
fn small_ints(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((-64i32..64).prop_map(f64::from), len)
}

fn mode_strategy() -> impl Strategy<Value = RoundingMode> {
    prop::sample::select(RoundingMode::ALL.to_vec())
}

fn precision_strategy() -> impl Strategy<Value = Precision> {
    prop::sample::select(Precision::ALL.to_vec())
}

fn strip(out: &[u8]) -> &[u8] {
    &out[..out.len() - 1]
}

proptest! {
    /// Every result buffer ends in exactly one sentinel above the data
    #[test]
    fn test_outputs_are_pinned(values in small_ints(6), precision in precision_strategy()) {
        let out = dispatch_precision!(precision, E => {
            let x = pack::<E>(&values);
            ops::abs::<E>(&x)
        }).unwrap();
        prop_assert_eq!(out.len() as u64, 6 * precision.bytes_per_element() + 1);
        prop_assert_eq!(out.last(), Some(&SENTINEL));
    }

    /// Exact sums agree across all rounding modes
    #[test]
    fn test_exact_add_is_mode_independent(
        x in small_ints(8),
        y in small_ints(8),
        mode in mode_strategy(),
    ) {
        let px = pack::<Single>(&x);
        let py = pack::<Single>(&y);
        let out = ops::add::<Single>(&px, &py, mode).unwrap();
        let expected: Vec<f64> = x.iter().zip(&y).map(|(a, b)| a + b).collect();
        prop_assert_eq!(unpack::<Single>(strip(&out)), expected);
    }

    /// `sub(x, y)` is the negation of `sub(y, x)`
    #[test]
    fn test_sub_antisymmetric(x in small_ints(5), y in small_ints(5)) {
        let px = pack::<Double>(&x);
        let py = pack::<Double>(&y);
        let forward = unpack::<Double>(strip(&ops::sub::<Double>(&px, &py, RoundingMode::Nearest).unwrap()));
        let backward = unpack::<Double>(strip(&ops::sub::<Double>(&py, &px, RoundingMode::Nearest).unwrap()));
        for (f, b) in forward.iter().zip(&backward) {
            prop_assert_eq!(*f, -*b);
        }
    }

    /// Multiplying by the identity matrix is exact
    #[test]
    fn test_matmul_identity(values in small_ints(9), mode in mode_strategy()) {
        let identity = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let x = pack::<Quad>(&values);
        let id = pack::<Quad>(&identity);
        let out = ops::matmul::<Quad>(&x, &id, 3, 3, 3, mode).unwrap();
        prop_assert_eq!(unpack::<Quad>(strip(&out)), values);
    }

    /// Transposing twice restores the input
    #[test]
    fn test_transpose_involution(values in small_ints(12), rows in prop::sample::select(vec![1usize, 2, 3, 4, 6, 12])) {
        let cols = 12 / rows;
        let x = pack::<Half>(&values);
        let once = ops::transpose::<Half>(&x, rows, cols).unwrap();
        let twice = ops::transpose::<Half>(strip(&once), cols, rows).unwrap();
        prop_assert_eq!(strip(&twice), &x[..]);
    }

    /// The last prefix sum is the total
    #[test]
    fn test_cumsum_last_is_sum(values in small_ints(7)) {
        let x = pack::<Single>(&values);
        let out = unpack::<Single>(strip(&ops::cumsum::<Single>(&x, RoundingMode::Nearest).unwrap()));
        prop_assert_eq!(out[6], values.iter().sum::<f64>());
    }

    /// Min never exceeds max
    #[test]
    fn test_min_le_max(values in small_ints(5)) {
        let x = pack::<Double>(&values);
        let lo = unpack::<Double>(strip(&ops::min::<Double>(&x).unwrap()))[0];
        let hi = unpack::<Double>(strip(&ops::max::<Double>(&x).unwrap()))[0];
        prop_assert!(lo <= hi);
    }

    /// `gth` and `lte` are complementary when no NaNs are present
    #[test]
    fn test_gth_lte_complementary(x in small_ints(6), y in small_ints(6)) {
        let px = pack::<Single>(&x);
        let py = pack::<Single>(&y);
        let gt = unpack::<Single>(strip(&ops::compare::<Single>(&px, &py, Comparison::Gt).unwrap()));
        let le = unpack::<Single>(strip(&ops::compare::<Single>(&px, &py, Comparison::Le).unwrap()));
        for (a, b) in gt.iter().zip(&le) {
            prop_assert_eq!(a + b, 1.0);
        }
    }
}
