//! Special mathematical functions
//!
//! This module is the evaluation layer behind [`crate::math`] and the C boundary. Every
//! evaluator takes plain `f64`/integer arguments and returns
//! [`Result`](crate::error::Result): either the value, or a classified [`Error`](crate::error::Error) handed through the installed
//! [`ErrorPolicy`](crate::policy::ErrorPolicy).
//!
//! # Functions Provided
//!
//! ## Gamma Functions
//! - [`tgamma`], [`lgamma`] - Γ(x) and ln|Γ(x)|
//! - [`digamma`], [`polygamma`] - ψ(x) and ψ⁽ⁿ⁾(x), n ≥ 0, without the limits of
//!   [`crate::overrides`]
//! - [`beta`] - B(a, b)
//! - [`gamma_p`], [`gamma_q`] - regularized incomplete gamma P(a, x), Q(a, x)
//! - [`gamma_p_inv`], [`gamma_q_inv`] - their inverses in x
//! - [`factorial`], [`double_factorial`], [`rising_factorial`], [`falling_factorial`],
//!   [`binomial_coefficient`]
//!
//! ## Error Functions
//! - [`erf`], [`erfc`], [`erf_inv`], [`erfc_inv`]
//!
//! ## Bessel and Hankel Functions
//! - [`cyl_bessel_j`], [`cyl_neumann`], [`cyl_bessel_i`], [`cyl_bessel_k`] - real order
//! - [`sph_bessel`], [`sph_neumann`]
//! - [`cyl_bessel_j_prime`], [`cyl_neumann_prime`], [`cyl_bessel_i_prime`],
//!   [`cyl_bessel_k_prime`], [`sph_bessel_prime`], [`sph_neumann_prime`]
//! - [`cyl_hankel_1`], [`cyl_hankel_2`], [`sph_hankel_1`], [`sph_hankel_2`]
//!
//! ## Legendre Functions and Spherical Harmonics
//! - [`legendre_p`], [`legendre_p_assoc`], [`legendre_p_prime`], [`legendre_q`]
//! - [`legendre_p_zeros`]
//! - [`spherical_harmonic`], [`spherical_harmonic_r`], [`spherical_harmonic_i`]
//!
//! ## Elliptic Integrals
//! - [`ellint_1`], [`ellint_2`] - complete integrals, modulus k
//! - [`ellint_1_inc`], [`ellint_2_inc`] - incomplete integrals F(φ, k), E(φ, k)
//!
//! ## Hypergeometric Functions
//! - [`hypergeometric_1f1`], [`hypergeometric_2f1`]
//!
//! ## Airy Functions
//! - [`airy_ai`], [`airy_bi`], [`airy_ai_prime`], [`airy_bi_prime`]
//!
//! ## Basic Functions
//! - [`expm1`], [`log1p`], [`powm1`], [`sin_pi`], [`cos_pi`], [`sinc_pi`]
//!
//! # Algorithm Sources
//!
//! - Lanczos approximation for gamma/lgamma
//! - Recurrence plus asymptotic (Bernoulli) expansion for digamma and polygamma
//! - Series and Lentz continued fractions for incomplete gamma
//! - Steed's continued fractions and Temme's series for Bessel functions of real order,
//!   Hankel's asymptotic expansion for large arguments
//! - AGM method for complete elliptic integrals, Carlson's duplication for incomplete ones
//! - Power series with transformations for hypergeometric functions
//! - Power series and asymptotic expansions for Airy functions
//! - Three-term recurrence and Newton iteration for Legendre functions and their zeros

pub mod scalar;

pub use scalar::*;

use crate::error::{Error, Result};
use crate::policy;

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Square root of pi: √π ≈ 1.7724538509055159
pub const SQRT_PI: f64 = 1.7724538509055160272981674833411451827975;

/// Euler-Mascheroni constant: γ ≈ 0.5772156649015329
pub const EULER_MASCHERONI: f64 = 0.5772156649015328606065120900824024310422;

/// ln(√(2π)) ≈ 0.9189385332046727 (used in Stirling's approximation)
pub const LN_SQRT_2PI: f64 = 0.9189385332046727417803297364056176398614;

/// Largest x with finite Γ(x)
pub const MAX_GAMMA_ARG: f64 = 171.624_376_956_302_7;

// ============================================================================
// Lanczos Coefficients for Gamma Function
// ============================================================================

/// Lanczos approximation coefficients (g=7, n=9).
pub const LANCZOS_G: f64 = 7.0;

/// Lanczos coefficients for g=7.
pub const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

// ============================================================================
// Shared Helpers
// ============================================================================

/// True for 0, -1, -2, ... (and -0.0).
#[inline]
pub(crate) fn is_nonpositive_integer(x: f64) -> bool {
    x <= 0.0 && x == x.floor()
}

/// Classify a raw result computed from finite arguments.
///
/// An infinite value is an overflow carrying its sign; a NaN means the method broke down.
pub(crate) fn settle(function: &'static str, value: f64) -> Result<f64> {
    if value.is_infinite() {
        policy::raise(Error::overflow(function, value < 0.0))
    } else if value.is_nan() {
        policy::raise(Error::evaluation(function, "method produced NaN"))
    } else {
        Ok(value)
    }
}

/// Hand an internal failure to the policy.
///
/// Under an ignoring policy the sentinel is spread over the whole result with `fill`.
pub(crate) fn signal<T>(result: Result<T>, fill: impl FnOnce(f64) -> T) -> Result<T> {
    result.or_else(|err| policy::raise::<f64>(err).map(fill))
}
