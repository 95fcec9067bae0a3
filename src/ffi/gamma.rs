//! Gamma family, factorials

use std::ffi::{c_double, c_int, c_uint};

use crate::adapter::guard;
use crate::math;

/// Γ(x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_tgamma(x: c_double) -> c_double {
    guard("tgamma", || math::tgamma(x))
}

/// ln|Γ(x)|
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_lgamma(x: c_double) -> c_double {
    guard("lgamma", || math::lgamma(x))
}

/// ψ(x); NaN at the non-positive integers
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_digamma(x: c_double) -> c_double {
    guard("digamma", || math::digamma(x))
}

/// ψ'(x); +∞ at the non-positive integers
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_trigamma(x: c_double) -> c_double {
    guard("trigamma", || math::trigamma(x))
}

/// ψ⁽ⁿ⁾(x) for integer `n`; `n == -1` gives ln Γ(x), `n < -1` gives NaN
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_polygamma(n: c_int, x: c_double) -> c_double {
    guard("polygamma", || math::polygamma(n, x))
}

/// B(a, b)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_beta(a: c_double, b: c_double) -> c_double {
    guard("beta", || math::beta(a, b))
}

/// Regularized lower incomplete gamma P(a, x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_gamma_p(a: c_double, x: c_double) -> c_double {
    guard("gamma_p", || math::gamma_p(a, x))
}

/// Regularized upper incomplete gamma Q(a, x)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_gamma_q(a: c_double, x: c_double) -> c_double {
    guard("gamma_q", || math::gamma_q(a, x))
}

/// x such that P(a, x) = p
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_gamma_p_inv(a: c_double, p: c_double) -> c_double {
    guard("gamma_p_inv", || math::gamma_p_inv(a, p))
}

/// x such that Q(a, x) = q
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_gamma_q_inv(a: c_double, q: c_double) -> c_double {
    guard("gamma_q_inv", || math::gamma_q_inv(a, q))
}

/// i!; +∞ past 170!
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_factorial(i: c_uint) -> c_double {
    guard("factorial", || math::factorial(i))
}

/// n choose k; NaN for k > n
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_binomial_coefficient(n: c_uint, k: c_uint) -> c_double {
    guard("binomial_coefficient", || math::binomial_coefficient(n, k))
}

/// i!! = i (i-2) (i-4) ⋯
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_double_factorial(i: c_uint) -> c_double {
    guard("double_factorial", || math::double_factorial(i))
}

/// x (x+1) ⋯ (x+i-1); negative `i` divides instead
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_rising_factorial(x: c_double, i: c_int) -> c_double {
    guard("rising_factorial", || math::rising_factorial(x, i))
}

/// x (x-1) ⋯ (x-i+1)
#[unsafe(no_mangle)]
pub extern "C" fn sfabi_falling_factorial(x: c_double, i: c_uint) -> c_double {
    guard("falling_factorial", || math::falling_factorial(x, i))
}
