//! Accurate elementary functions

use std::ffi::c_double;

use crate::adapter::guard;
use crate::math;

/// eˣ - 1
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_expm1(x: c_double) -> c_double {
    guard("expm1", || math::expm1(x))
}

/// ln(1 + x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_log1p(x: c_double) -> c_double {
    guard("log1p", || math::log1p(x))
}

/// xʸ - 1
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_powm1(x: c_double, y: c_double) -> c_double {
    guard("powm1", || math::powm1(x, y))
}

/// sin(πx)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_sin_pi(x: c_double) -> c_double {
    guard("sin_pi", || math::sin_pi(x))
}

/// cos(πx)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_cos_pi(x: c_double) -> c_double {
    guard("cos_pi", || math::cos_pi(x))
}

/// sin(x)/x
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_sinc_pi(x: c_double) -> c_double {
    guard("sinc_pi", || math::sinc_pi(x))
}
