#![no_main]

use libfuzzer_sys::fuzz_target;

use lanewise::backend::scalar;
use lanewise::{transpose4, F32x4, SimdF32};

fn lanes_from(data: &[u8], at: usize) -> [f32; 4] {
    std::array::from_fn(|i| {
        let off = (at + i) * 4;
        f32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
    })
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }

    let lhs = lanes_from(data, 0);
    let rhs = lanes_from(data, 4);

    let (a, b) = (F32x4::from_array(lhs), F32x4::from_array(rhs));
    let (ra, rb) = (scalar::F32x4::from_array(lhs), scalar::F32x4::from_array(rhs));

    // Elementwise ops are the same IEEE operation per lane on every
    // backend, so they must agree bit for bit (NaN payloads included).
    for (native, reference) in [
        ((a + b).to_array(), (ra + rb).to_array()),
        ((a - b).to_array(), (ra - rb).to_array()),
        ((a * b).to_array(), (ra * rb).to_array()),
        ((a / b).to_array(), (ra / rb).to_array()),
    ] {
        for (n, r) in native.iter().zip(reference) {
            assert_eq!(n.to_bits(), r.to_bits());
        }
    }

    // Transpose is pure data movement: exact agreement.
    let mut native_rows = [a, b, a, b];
    let mut reference_rows = [ra, rb, ra, rb];
    transpose4(&mut native_rows);
    scalar::transpose4(&mut reference_rows);
    for (n, r) in native_rows.iter().zip(&reference_rows) {
        for (x, y) in n.to_array().iter().zip(r.to_array()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    // Sums fold in different orders; bound the drift by the reordering
    // error bound, lanes * eps * sum(|x|).
    if lhs.iter().all(|x| x.is_finite()) {
        let (n, r) = (a.sum(), ra.sum());
        let magnitude: f32 = lhs.iter().map(|x| x.abs()).sum();
        if magnitude.is_finite() {
            let tolerance = magnitude * f32::EPSILON * 4.0 + 1e-6;
            assert!((n - r).abs() <= tolerance, "{n} vs {r}");
        }
    }
});
