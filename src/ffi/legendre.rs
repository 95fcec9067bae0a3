//! Legendre functions and spherical harmonics

use std::ffi::{c_double, c_int, c_uint};

use crate::adapter::{guard, guard_complex, guard_sequence, write_complex, write_sequence};
use crate::math;

/// P_l(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_legendre_p(l: c_int, x: c_double) -> c_double {
    guard("legendre_p", || math::legendre_p(l, x))
}

/// P_l^m(x), Condon-Shortley phase included
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_legendre_p_assoc(l: c_int, m: c_int, x: c_double) -> c_double {
    guard("legendre_p_assoc", || math::legendre_p_assoc(l, m, x))
}

/// P'_l(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_legendre_p_prime(l: c_int, x: c_double) -> c_double {
    guard("legendre_p_prime", || math::legendre_p_prime(l, x))
}

/// Q_l(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_legendre_q(l: c_uint, x: c_double) -> c_double {
    guard("legendre_q", || math::legendre_q(l, x))
}

/// Writes the non-negative zeros of P_l to `out`, ascending.
///
/// The caller sizes `out` for `ceil(l / 2)` values (with `l` replaced by `-l - 1` when
/// negative). Nothing is written when the zeros cannot be computed.
///
/// # Safety
///
/// `out` must be null or valid for that many `double` writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sfabi_legendre_p_zeros(l: c_int, out: *mut c_double) {
    let zeros = guard_sequence("legendre_p_zeros", || math::legendre_p_zeros(l));
    // SAFETY: forwarded from this function's contract.
    unsafe { write_sequence(&zeros, out) }
}

/// Y_n^m(θ, φ) written to `re` and `im`
///
/// # Safety
///
/// `re` and `im` must each be null or valid for a write of one `double`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sfabi_spherical_harmonic(
    n: c_uint,
    m: c_int,
    theta: c_double,
    phi: c_double,
    re: *mut c_double,
    im: *mut c_double,
) {
    let value = guard_complex("spherical_harmonic", || {
        math::spherical_harmonic(n, m, theta, phi)
    });
    // SAFETY: forwarded from this function's contract.
    unsafe { write_complex(value, re, im) }
}

/// Re Y_n^m(θ, φ)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_spherical_harmonic_r(
    n: c_uint,
    m: c_int,
    theta: c_double,
    phi: c_double,
) -> c_double {
    guard("spherical_harmonic_r", || {
        math::spherical_harmonic_r(n, m, theta, phi)
    })
}

/// Im Y_n^m(θ, φ)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_spherical_harmonic_i(
    n: c_uint,
    m: c_int,
    theta: c_double,
    phi: c_double,
) -> c_double {
    guard("spherical_harmonic_i", || {
        math::spherical_harmonic_i(n, m, theta, phi)
    })
}
