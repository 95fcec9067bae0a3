//! Bessel and Hankel functions
//!
//! The Hankel functions are complex; their real and imaginary parts are written through the
//! `re` and `im` pointers. On failure both slots receive the sentinel.

use std::ffi::{c_double, c_uint};

use crate::adapter::{guard, guard_complex, write_complex};
use crate::math;

/// J_ν(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_cyl_bessel_j(nu: c_double, x: c_double) -> c_double {
    guard("cyl_bessel_j", || math::cyl_bessel_j(nu, x))
}

/// Y_ν(x); Y_ν(0) is -∞
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_cyl_neumann(nu: c_double, x: c_double) -> c_double {
    guard("cyl_neumann", || math::cyl_neumann(nu, x))
}

/// I_ν(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_cyl_bessel_i(nu: c_double, x: c_double) -> c_double {
    guard("cyl_bessel_i", || math::cyl_bessel_i(nu, x))
}

/// K_ν(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_cyl_bessel_k(nu: c_double, x: c_double) -> c_double {
    guard("cyl_bessel_k", || math::cyl_bessel_k(nu, x))
}

/// j_n(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_sph_bessel(n: c_uint, x: c_double) -> c_double {
    guard("sph_bessel", || math::sph_bessel(n, x))
}

/// y_n(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_sph_neumann(n: c_uint, x: c_double) -> c_double {
    guard("sph_neumann", || math::sph_neumann(n, x))
}

/// J'_ν(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_cyl_bessel_j_prime(nu: c_double, x: c_double) -> c_double {
    guard("cyl_bessel_j_prime", || math::cyl_bessel_j_prime(nu, x))
}

/// Y'_ν(x); Y'_ν(0) is +∞
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_cyl_neumann_prime(nu: c_double, x: c_double) -> c_double {
    guard("cyl_neumann_prime", || math::cyl_neumann_prime(nu, x))
}

/// I'_ν(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_cyl_bessel_i_prime(nu: c_double, x: c_double) -> c_double {
    guard("cyl_bessel_i_prime", || math::cyl_bessel_i_prime(nu, x))
}

/// K'_ν(x); K'_ν(0) is -∞
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_cyl_bessel_k_prime(nu: c_double, x: c_double) -> c_double {
    guard("cyl_bessel_k_prime", || math::cyl_bessel_k_prime(nu, x))
}

/// j'_n(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_sph_bessel_prime(n: c_uint, x: c_double) -> c_double {
    guard("sph_bessel_prime", || math::sph_bessel_prime(n, x))
}

/// y'_n(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_sph_neumann_prime(n: c_uint, x: c_double) -> c_double {
    guard("sph_neumann_prime", || math::sph_neumann_prime(n, x))
}

/// H⁽¹⁾_ν(x) = J_ν(x) + i Y_ν(x)
///
/// # Safety
///
/// `re` and `im` must each be null or valid for a write of one `double`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sfabi_cyl_hankel_1(
    nu: c_double,
    x: c_double,
    re: *mut c_double,
    im: *mut c_double,
) {
    let value = guard_complex("cyl_hankel_1", || math::cyl_hankel_1(nu, x));
    // SAFETY: forwarded from this function's contract.
    unsafe { write_complex(value, re, im) }
}

/// H⁽²⁾_ν(x) = J_ν(x) - i Y_ν(x)
///
/// # Safety
///
/// `re` and `im` must each be null or valid for a write of one `double`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sfabi_cyl_hankel_2(
    nu: c_double,
    x: c_double,
    re: *mut c_double,
    im: *mut c_double,
) {
    let value = guard_complex("cyl_hankel_2", || math::cyl_hankel_2(nu, x));
    // SAFETY: forwarded from this function's contract.
    unsafe { write_complex(value, re, im) }
}

/// h⁽¹⁾_ν(x) = √(π/2x) H⁽¹⁾_{ν+½}(x)
///
/// # Safety
///
/// `re` and `im` must each be null or valid for a write of one `double`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sfabi_sph_hankel_1(
    nu: c_double,
    x: c_double,
    re: *mut c_double,
    im: *mut c_double,
) {
    let value = guard_complex("sph_hankel_1", || math::sph_hankel_1(nu, x));
    // SAFETY: forwarded from this function's contract.
    unsafe { write_complex(value, re, im) }
}

/// h⁽²⁾_ν(x) = √(π/2x) H⁽²⁾_{ν+½}(x)
///
/// # Safety
///
/// `re` and `im` must each be null or valid for a write of one `double`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sfabi_sph_hankel_2(
    nu: c_double,
    x: c_double,
    re: *mut c_double,
    im: *mut c_double,
) {
    let value = guard_complex("sph_hankel_2", || math::sph_hankel_2(nu, x));
    // SAFETY: forwarded from this function's contract.
    unsafe { write_complex(value, re, im) }
}
