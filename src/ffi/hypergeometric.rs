//! Confluent and Gauss hypergeometric functions

use std::ffi::c_double;

use crate::adapter::guard;
use crate::math;

/// ₁F₁(a; b; x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_hypergeometric_1f1(a: c_double, b: c_double, x: c_double) -> c_double {
    guard("hypergeometric_1f1", || math::hypergeometric_1f1(a, b, x))
}

/// ₂F₁(a, b; c; x) for x <= 1
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_hypergeometric_2f1(
    a: c_double,
    b: c_double,
    c: c_double,
    x: c_double,
) -> c_double {
    guard("hypergeometric_2f1", || math::hypergeometric_2f1(a, b, c, x))
}
