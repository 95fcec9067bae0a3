//! Airy functions Ai(x), Bi(x) and their derivatives
//!
//! Power series near the origin; elsewhere the Bessel-function representations with
//! ζ = (2/3)|x|^(3/2):
//!
//! ```text
//! Ai(x)   = (1/π) √(x/3) K_{1/3}(ζ)
//! Bi(x)   = √(x/3) [2 I_{1/3}(ζ) + (√3/π) K_{1/3}(ζ)]
//! Ai(-x)  = (√x/2) [J_{1/3}(ζ) - Y_{1/3}(ζ)/√3]
//! Bi(-x)  = -(√x/2) [J_{1/3}(ζ)/√3 + Y_{1/3}(ζ)]
//! Ai'(x)  = -(x/(π√3)) K_{2/3}(ζ)
//! Bi'(x)  = (x/√3) [2 I_{2/3}(ζ) + (√3/π) K_{2/3}(ζ)]
//! Ai'(-x) = (x/2) [J_{2/3}(ζ) + Y_{2/3}(ζ)/√3]
//! Bi'(-x) = (x/2) [J_{2/3}(ζ)/√3 - Y_{2/3}(ζ)]
//! ```
//!
//! # References
//! - DLMF Chapter 9: Airy and Related Functions (9.6)
//! - Abramowitz & Stegun Chapter 10

use std::f64::consts::PI;

use super::bessel::{bessel_ik_scaled, bessel_jy, unscale};
use crate::algorithm::special::{settle, signal};
use crate::error::{Error, Result};
use crate::policy;

/// Ai(0) = 3^(-2/3) / Γ(2/3)
const AI_C1: f64 = 0.355_028_053_887_817_2;
/// -Ai'(0) = 3^(-1/3) / Γ(1/3)
const AI_C2: f64 = 0.258_819_403_792_806_8;

/// Bi(0) = 3^(-1/6) / Γ(2/3)
const BI_C1: f64 = 0.614_926_627_446_000_7;
/// Bi'(0) = 3^(1/6) / Γ(1/3)
const BI_C2: f64 = 0.448_288_357_353_826_4;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Maximum terms in power series
const MAX_SERIES_TERMS: usize = 100;

/// Convergence threshold
const EPSILON: f64 = 1e-17;

/// Largest |x| served by the power series
const SERIES_LIMIT: f64 = 1.0;

const THIRD: f64 = 1.0 / 3.0;

const TWO_THIRDS: f64 = 2.0 / 3.0;

/// The even and odd solutions f, g of y'' = xy with f(0) = 1, g'(0) = 1.
///
/// f = Σ 3ᵏ (1/3)ₖ x³ᵏ / (3k)!, g = Σ 3ᵏ (2/3)ₖ x³ᵏ⁺¹ / (3k+1)!
fn airy_series(x: f64) -> (f64, f64) {
    let x3 = x * x * x;

    let mut f_sum = 1.0;
    let mut f_term = 1.0;
    for k in 1..MAX_SERIES_TERMS {
        let k3 = (3 * k) as f64;
        f_term *= x3 / (k3 * (k3 - 1.0));
        f_sum += f_term;
        if f_term.abs() < EPSILON * f_sum.abs() {
            break;
        }
    }

    let mut g_sum = x;
    let mut g_term = x;
    for k in 1..MAX_SERIES_TERMS {
        let k3 = (3 * k) as f64;
        g_term *= x3 / ((k3 + 1.0) * k3);
        g_sum += g_term;
        if g_term.abs() < EPSILON * g_sum.abs() {
            break;
        }
    }

    (f_sum, g_sum)
}

/// f' and g' for the solutions of [`airy_series`]
fn airy_series_prime(x: f64) -> (f64, f64) {
    let x3 = x * x * x;

    let mut f_sum = 0.5 * x * x;
    let mut f_term = f_sum;
    for k in 2..MAX_SERIES_TERMS {
        let k3 = (3 * k) as f64;
        f_term *= x3 / ((k3 - 3.0) * (k3 - 1.0));
        f_sum += f_term;
        if f_term.abs() < EPSILON * f_sum.abs() {
            break;
        }
    }

    let mut g_sum = 1.0;
    let mut g_term = 1.0;
    for k in 1..MAX_SERIES_TERMS {
        let k3 = (3 * k) as f64;
        g_term *= x3 / (k3 * (k3 - 2.0));
        g_sum += g_term;
        if g_term.abs() < EPSILON * g_sum.abs() {
            break;
        }
    }

    (f_sum, g_sum)
}

fn zeta(x: f64) -> f64 {
    let t = x.abs();
    2.0 / 3.0 * t * t.sqrt()
}

/// Compute the Airy function of the first kind Ai(x).
///
/// # Properties
/// - Ai(x) → 0 as x → ±∞; the decay for large positive x underflows past x ≈ 104
/// - Ai(x) oscillates for x < 0
/// - Ai(0) ≈ 0.3550280538878172
pub fn airy_ai(x: f64) -> Result<f64> {
    const F: &str = "airy_ai";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    if x.abs() <= SERIES_LIMIT {
        let (f, g) = airy_series(x);
        return Ok(AI_C1 * f - AI_C2 * g);
    }

    let z = zeta(x);
    let value = if x > 0.0 {
        let (_, k, scale) = signal(bessel_ik_scaled(F, THIRD, z), |s| (s, s, 0.0))?;
        unscale((x / 3.0).sqrt() / PI * k, -scale)
    } else {
        let (j, y) = signal(bessel_jy(F, THIRD, z), |s| (s, s))?;
        0.5 * (-x).sqrt() * (j - y / SQRT_3)
    };

    if value == 0.0 {
        return policy::raise(Error::underflow(F));
    }
    settle(F, value)
}

/// Compute the Airy function of the second kind Bi(x).
///
/// # Properties
/// - Bi(x) → +∞ as x → +∞; overflows past x ≈ 104
/// - Bi(x) oscillates for x < 0
/// - Bi(0) ≈ 0.6149266274460007
pub fn airy_bi(x: f64) -> Result<f64> {
    const F: &str = "airy_bi";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x == f64::INFINITY {
        return Ok(f64::INFINITY);
    }
    if x == f64::NEG_INFINITY {
        return Ok(0.0);
    }
    if x.abs() <= SERIES_LIMIT {
        let (f, g) = airy_series(x);
        return Ok(BI_C1 * f + BI_C2 * g);
    }

    let z = zeta(x);
    let value = if x > 0.0 {
        let (i, k, scale) = signal(bessel_ik_scaled(F, THIRD, z), |s| (s, s, 0.0))?;
        // K e^(-s) relative to I e^(s)
        let k_term = unscale(SQRT_3 / PI * k, -2.0 * scale);
        unscale((x / 3.0).sqrt() * (2.0 * i + k_term), scale)
    } else {
        let (j, y) = signal(bessel_jy(F, THIRD, z), |s| (s, s))?;
        -0.5 * (-x).sqrt() * (j / SQRT_3 + y)
    };
    settle(F, value)
}

/// Compute the derivative Ai'(x).
pub fn airy_ai_prime(x: f64) -> Result<f64> {
    const F: &str = "airy_ai_prime";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x == f64::INFINITY {
        return Ok(-0.0);
    }
    if x == f64::NEG_INFINITY {
        return policy::raise(Error::domain(F, "unbounded oscillation as x -> -inf"));
    }
    if x.abs() <= SERIES_LIMIT {
        let (f, g) = airy_series_prime(x);
        return Ok(AI_C1 * f - AI_C2 * g);
    }

    let z = zeta(x);
    let value = if x > 0.0 {
        let (_, k, scale) = signal(bessel_ik_scaled(F, TWO_THIRDS, z), |s| (s, s, 0.0))?;
        unscale(-x / (PI * SQRT_3) * k, -scale)
    } else {
        let (j, y) = signal(bessel_jy(F, TWO_THIRDS, z), |s| (s, s))?;
        -0.5 * x * (j + y / SQRT_3)
    };

    if value == 0.0 {
        return policy::raise(Error::underflow(F));
    }
    settle(F, value)
}

/// Compute the derivative Bi'(x).
pub fn airy_bi_prime(x: f64) -> Result<f64> {
    const F: &str = "airy_bi_prime";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x == f64::INFINITY {
        return Ok(f64::INFINITY);
    }
    if x == f64::NEG_INFINITY {
        return policy::raise(Error::domain(F, "unbounded oscillation as x -> -inf"));
    }
    if x.abs() <= SERIES_LIMIT {
        let (f, g) = airy_series_prime(x);
        return Ok(BI_C1 * f + BI_C2 * g);
    }

    let z = zeta(x);
    let value = if x > 0.0 {
        let (i, k, scale) = signal(bessel_ik_scaled(F, TWO_THIRDS, z), |s| (s, s, 0.0))?;
        let k_term = unscale(SQRT_3 / PI * k, -2.0 * scale);
        unscale(x / SQRT_3 * (2.0 * i + k_term), scale)
    } else {
        let (j, y) = signal(bessel_jy(F, TWO_THIRDS, z), |s| (s, s))?;
        -0.5 * x * (j / SQRT_3 - y)
    };
    settle(F, value)
}
