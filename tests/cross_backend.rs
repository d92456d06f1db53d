//! Differential tests: the dispatch-selected backend against the scalar
//! reference.
//!
//! Strategy follows the repo's other differential suites:
//! 1. Build the same lanes on both backends.
//! 2. Run the same operation on each.
//! 3. Elementwise results and transposes must match exactly (identical
//!    IEEE operations per lane); horizontal sums only to within
//!    accumulation tolerance, because the fold order differs.

use lanewise::backend::scalar;
use lanewise::{transpose4, transpose8, F32x4, F32x8, SimdF32};
use proptest::prelude::*;

/// Cross-backend sums fold in different orders, so each backend's result
/// carries its own rounding of the partial sums. The drift of any
/// reordering is bounded by lanes * eps * sum(|x|); the absolute floor
/// covers sums that cancel to nearly zero.
fn assert_sums_close(lanes: &[f32], native: f32, reference: f32) {
    let magnitude: f32 = lanes.iter().map(|x| x.abs()).sum();
    let tolerance = magnitude * f32::EPSILON * lanes.len() as f32 + 1e-6;
    assert!(
        (native - reference).abs() <= tolerance,
        "{native} vs {reference} (tolerance {tolerance})"
    );
}

/// Bit patterns, so NaN lanes (e.g. 0/0) still compare equal-if-identical.
fn bits(lanes: &[f32]) -> Vec<u32> {
    lanes.iter().map(|v| v.to_bits()).collect()
}

fn check_pair<N: SimdF32, R: SimdF32>(lhs: &[f32], rhs: &[f32]) {
    let (a, b) = (N::from_slice(lhs), N::from_slice(rhs));
    let (ra, rb) = (R::from_slice(lhs), R::from_slice(rhs));

    assert_eq!(bits((a + b).to_array().as_ref()), bits((ra + rb).to_array().as_ref()));
    assert_eq!(bits((a - b).to_array().as_ref()), bits((ra - rb).to_array().as_ref()));
    assert_eq!(bits((a * b).to_array().as_ref()), bits((ra * rb).to_array().as_ref()));
    assert_eq!(bits((a / b).to_array().as_ref()), bits((ra / rb).to_array().as_ref()));

    assert_sums_close(lhs, a.sum(), ra.sum());

    assert_eq!(a == b, ra == rb);
    assert_eq!(bits(a.to_array().as_ref()), bits(ra.to_array().as_ref()));
}

#[test]
fn fixed_inputs_agree_4_wide() {
    check_pair::<F32x4, scalar::F32x4>(&[1.0, 2.0, 3.0, 4.0], &[3.0, 4.0, 5.0, 6.0]);
    check_pair::<F32x4, scalar::F32x4>(&[-0.5, 1e-3, 7.25, -128.0], &[2.0, -4.0, 0.125, 3.0]);
}

#[test]
fn fixed_inputs_agree_8_wide() {
    check_pair::<F32x8, scalar::F32x8>(
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        &[8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0],
    );
}

#[test]
fn transpose4_agrees_with_scalar() {
    let lanes: [[f32; 4]; 4] = std::array::from_fn(|r| std::array::from_fn(|c| (r * 4 + c) as f32));

    let mut native: [F32x4; 4] = std::array::from_fn(|r| F32x4::from_slice(&lanes[r]));
    let mut reference: [scalar::F32x4; 4] =
        std::array::from_fn(|r| scalar::F32x4::from_slice(&lanes[r]));

    transpose4(&mut native);
    scalar::transpose4(&mut reference);

    for (n, r) in native.iter().zip(&reference) {
        assert_eq!(n.to_array(), r.to_array());
    }
}

#[test]
fn transpose8_agrees_with_scalar() {
    let lanes: [[f32; 8]; 8] = std::array::from_fn(|r| std::array::from_fn(|c| (r * 8 + c) as f32));

    let mut native: [F32x8; 8] = std::array::from_fn(|r| F32x8::from_slice(&lanes[r]));
    let mut reference: [scalar::F32x8; 8] =
        std::array::from_fn(|r| scalar::F32x8::from_slice(&lanes[r]));

    transpose8(&mut native);
    scalar::transpose8(&mut reference);

    for (n, r) in native.iter().zip(&reference) {
        assert_eq!(n.to_array(), r.to_array());
    }
}

proptest! {
    #[test]
    fn random_lanes_agree_4_wide(
        lhs in proptest::array::uniform4(-1e6f32..1e6f32),
        rhs in proptest::array::uniform4(-1e6f32..1e6f32),
    ) {
        check_pair::<F32x4, scalar::F32x4>(&lhs, &rhs);
    }

    #[test]
    fn random_lanes_agree_8_wide(
        lhs in proptest::array::uniform8(-1e6f32..1e6f32),
        rhs in proptest::array::uniform8(-1e6f32..1e6f32),
    ) {
        check_pair::<F32x8, scalar::F32x8>(&lhs, &rhs);
    }

    #[test]
    fn random_transpose4_agrees(rows in proptest::array::uniform4(proptest::array::uniform4(-1e6f32..1e6f32))) {
        let mut native: [F32x4; 4] = std::array::from_fn(|r| F32x4::from_slice(&rows[r]));
        let mut reference: [scalar::F32x4; 4] =
            std::array::from_fn(|r| scalar::F32x4::from_slice(&rows[r]));

        transpose4(&mut native);
        scalar::transpose4(&mut reference);

        for (n, r) in native.iter().zip(&reference) {
            prop_assert_eq!(n.to_array(), r.to_array());
        }
    }
}
