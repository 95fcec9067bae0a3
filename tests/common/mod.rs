//! Common test utilities
#![allow(dead_code)]

use approx::relative_eq;

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert a scalar matches a reference to relative tolerance `rtol`
pub fn assert_rel(actual: f64, expected: f64, rtol: f64, msg: &str) {
    assert!(
        relative_eq!(actual, expected, max_relative = rtol),
        "{}: expected {}, got {}",
        msg,
        expected,
        actual
    );
}

/// Assert bit-level identity, so that -0.0 and +0.0 are told apart
pub fn assert_bits(actual: f64, expected: f64, msg: &str) {
    assert!(
        actual.to_bits() == expected.to_bits() || (actual.is_nan() && expected.is_nan()),
        "{}: expected {:?} ({:#018x}), got {:?} ({:#018x})",
        msg,
        expected,
        expected.to_bits(),
        actual,
        actual.to_bits()
    );
}

/// Arguments every boundary function must survive
pub const AWKWARD: [f64; 12] = [
    0.0,
    -0.0,
    1.0,
    -1.0,
    0.5,
    -2.5,
    1e-310,
    1e300,
    -1e300,
    f64::INFINITY,
    f64::NEG_INFINITY,
    f64::NAN,
];

/// Calls a two-slot boundary function and returns (re, im)
pub fn slots(call: impl FnOnce(*mut f64, *mut f64)) -> (f64, f64) {
    let (mut re, mut im) = (-7.0, -7.0);
    call(&mut re, &mut im);
    (re, im)
}
