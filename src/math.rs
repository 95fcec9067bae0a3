//! Checked special functions for Rust callers
//!
//! This is the surface the C boundary projects onto sentinels: the same functions, returning
//! [`Result`] instead of NaN/±∞/0.0. The polygamma family goes through
//! [`crate::overrides`], every other function is the scalar evaluator itself.
//!
//! ```rust
//! use sfabi::math;
//!
//! let psi = math::digamma(1.0)?;
//! assert!((psi + 0.5772156649015329).abs() < 1e-14);
//!
//! // Limits answered without evaluating the series
//! assert_eq!(math::trigamma(f64::INFINITY)?, 0.0);
//! assert_eq!(math::polygamma(-1, 1.0)?, 0.0);
//! # Ok::<(), sfabi::Error>(())
//! ```

use crate::error::Result;
use crate::overrides;

pub use crate::algorithm::special::{
    MAX_FACTORIAL, airy_ai, airy_ai_prime, airy_bi, airy_bi_prime, beta, binomial_coefficient,
    cos_pi, cyl_bessel_i, cyl_bessel_i_prime, cyl_bessel_j, cyl_bessel_j_prime, cyl_bessel_k,
    cyl_bessel_k_prime, cyl_hankel_1, cyl_hankel_2, cyl_neumann, cyl_neumann_prime,
    double_factorial, ellint_1, ellint_1_inc, ellint_2, ellint_2_inc, erf, erf_inv, erfc,
    erfc_inv, expm1, factorial, falling_factorial, gamma_p, gamma_p_inv, gamma_q, gamma_q_inv,
    hypergeometric_1f1, hypergeometric_2f1, legendre_p, legendre_p_assoc, legendre_p_prime,
    legendre_p_zeros, legendre_q, lgamma, log1p, powm1, rising_factorial, sin_pi, sinc_pi,
    sph_bessel, sph_bessel_prime, sph_hankel_1, sph_hankel_2, sph_neumann, sph_neumann_prime,
    spherical_harmonic, spherical_harmonic_i, spherical_harmonic_r, tgamma,
};

/// ψ(x), the logarithmic derivative of Γ.
pub fn digamma(x: f64) -> Result<f64> {
    overrides::polygamma(0, x)
}

/// ψ'(x).
pub fn trigamma(x: f64) -> Result<f64> {
    overrides::polygamma(1, x)
}

/// ψ⁽ⁿ⁾(x) for any integer order; order -1 is ln Γ(x), orders below -1 are undefined.
pub fn polygamma(n: i32, x: f64) -> Result<f64> {
    overrides::polygamma(n, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_family_shares_the_limits() {
        assert_eq!(digamma(f64::INFINITY).unwrap(), f64::INFINITY);
        assert_eq!(digamma(-3.0).unwrap_err().kind(), ErrorKind::Pole);
        assert_eq!(trigamma(-3.0).unwrap(), f64::INFINITY);
        assert_eq!(trigamma(0.0).unwrap(), f64::INFINITY);
        assert!(polygamma(2, f64::INFINITY).unwrap().is_sign_negative());
    }

    #[test]
    fn test_family_agrees_on_ordinary_arguments() {
        for &x in &[0.3, 1.0, 2.5, 40.0, -1.5] {
            assert_eq!(digamma(x).unwrap(), polygamma(0, x).unwrap());
            assert_eq!(trigamma(x).unwrap(), polygamma(1, x).unwrap());
        }
    }
}
