//! Elliptic integrals of the first and second kind

use std::ffi::c_double;

use crate::adapter::guard;
use crate::math;

/// K(k), modulus `k`
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_ellint_1(k: c_double) -> c_double {
    guard("ellint_1", || math::ellint_1(k))
}

/// E(k), modulus `k`
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_ellint_2(k: c_double) -> c_double {
    guard("ellint_2", || math::ellint_2(k))
}

/// F(φ, k), modulus `k`, amplitude `phi`
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_ellint_1_inc(k: c_double, phi: c_double) -> c_double {
    guard("ellint_1_inc", || math::ellint_1_inc(k, phi))
}

/// E(φ, k), modulus `k`, amplitude `phi`
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_ellint_2_inc(k: c_double, phi: c_double) -> c_double {
    guard("ellint_2_inc", || math::ellint_2_inc(k, phi))
}
