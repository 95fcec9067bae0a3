//! Airy functions and their derivatives

use std::ffi::c_double;

use crate::adapter::guard;
use crate::math;

/// Ai(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_airy_ai(x: c_double) -> c_double {
    guard("airy_ai", || math::airy_ai(x))
}

/// Bi(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_airy_bi(x: c_double) -> c_double {
    guard("airy_bi", || math::airy_bi(x))
}

/// Ai'(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_airy_ai_prime(x: c_double) -> c_double {
    guard("airy_ai_prime", || math::airy_ai_prime(x))
}

/// Bi'(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_airy_bi_prime(x: c_double) -> c_double {
    guard("airy_bi_prime", || math::airy_bi_prime(x))
}
