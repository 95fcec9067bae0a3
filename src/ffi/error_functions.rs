//! Error functions and their inverses

use std::ffi::c_double;

use crate::adapter::guard;
use crate::math;

/// erf(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_erf(x: c_double) -> c_double {
    guard("erf", || math::erf(x))
}

/// erfc(x) = 1 - erf(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_erfc(x: c_double) -> c_double {
    guard("erfc", || math::erfc(x))
}

/// Inverse of erf on [-1, 1]; ±1 map to ±∞
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_erf_inv(p: c_double) -> c_double {
    guard("erf_inv", || math::erf_inv(p))
}

/// Inverse of erfc on [0, 2]
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_erfc_inv(q: c_double) -> c_double {
    guard("erfc_inv", || math::erfc_inv(q))
}
