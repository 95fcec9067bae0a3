//! Elementary helpers with careful behaviour near cancellation (expm1, log1p, powm1,
//! sin_pi, cos_pi, sinc_pi)

use std::f64::consts::PI;

use crate::algorithm::special::settle;
use crate::error::{Error, Result};
use crate::policy;

/// ln(f64::MAX); exp of anything larger overflows.
pub(crate) const LOG_MAX: f64 = 709.782_712_893_384;

// ============================================================================
// Exponential and Logarithm
// ============================================================================

/// Compute eˣ − 1 without cancellation for small |x|.
pub fn expm1(x: f64) -> Result<f64> {
    const F: &str = "expm1";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x > LOG_MAX {
        return policy::raise(Error::overflow(F, false));
    }
    Ok(x.exp_m1())
}

/// Compute ln(1 + x) without cancellation for small |x|.
///
/// `x == -1` diverges to −∞ (overflow); `x < -1` is a domain error.
pub fn log1p(x: f64) -> Result<f64> {
    const F: &str = "log1p";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x < -1.0 {
        return policy::raise(Error::domain(F, "x < -1"));
    }
    if x == -1.0 {
        return policy::raise(Error::overflow(F, true));
    }
    Ok(x.ln_1p())
}

/// Compute xʸ − 1.
///
/// Uses `expm1(y ln x)` when the result is close to zero. Negative `x` requires an
/// integer exponent.
pub fn powm1(x: f64, y: f64) -> Result<f64> {
    const F: &str = "powm1";
    if x.is_nan() || y.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if y == 0.0 || x == 1.0 {
        return Ok(0.0);
    }
    if x == 0.0 {
        if y > 0.0 {
            return Ok(-1.0);
        }
        return policy::raise(Error::overflow(F, false));
    }

    if x < 0.0 {
        if y != y.trunc() {
            return policy::raise(Error::domain(F, "negative base with non-integer exponent"));
        }
        // Odd powers keep the sign, so there is no cancellation to avoid.
        if (y * 0.5).trunc() != y * 0.5 {
            return settle(F, x.powf(y) - 1.0);
        }
        return powm1(-x, y);
    }

    let l = y * x.ln();
    if l.abs() < 0.2 {
        return Ok(l.exp_m1());
    }
    if l > LOG_MAX {
        return policy::raise(Error::overflow(F, false));
    }
    Ok(x.powf(y) - 1.0)
}

// ============================================================================
// Trigonometric Functions of πx
// ============================================================================

/// sin(πx) with exact zeros at the integers. Finite `x` only.
pub(crate) fn sin_pi_raw(x: f64) -> f64 {
    if x < 0.0 {
        return -sin_pi_raw(-x);
    }
    if x < 0.5 {
        return (PI * x).sin();
    }

    // x % 2 is exact, as are the reflections below.
    let mut r = x % 2.0;
    let negate = r >= 1.0;
    if negate {
        r -= 1.0;
    }
    if r > 0.5 {
        r = 1.0 - r;
    }
    let v = if r == 0.0 { 0.0 } else { (PI * r).sin() };
    if negate { -v } else { v }
}

/// cos(πx) with exact zeros at the half-integers. Finite `x` only.
pub(crate) fn cos_pi_raw(x: f64) -> f64 {
    let mut r = x.abs() % 2.0;
    if r > 1.0 {
        r = 2.0 - r;
    }
    if r == 0.5 {
        return 0.0;
    }
    if r < 0.25 {
        return (PI * r).cos();
    }
    (PI * (0.5 - r)).sin()
}

/// Compute sin(πx).
pub fn sin_pi(x: f64) -> Result<f64> {
    const F: &str = "sin_pi";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x.is_infinite() {
        return policy::raise(Error::domain(F, "infinite argument"));
    }
    Ok(sin_pi_raw(x))
}

/// Compute cos(πx).
pub fn cos_pi(x: f64) -> Result<f64> {
    const F: &str = "cos_pi";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x.is_infinite() {
        return policy::raise(Error::domain(F, "infinite argument"));
    }
    Ok(cos_pi_raw(x))
}

/// Compute sin(x)/x, with the limit 1 at x = 0 and 0 at ±∞.
pub fn sinc_pi(x: f64) -> Result<f64> {
    if x.is_nan() {
        return policy::raise(Error::nan_argument("sinc_pi"));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    // 1 - x²/6 + x⁴/120 is exact to double precision below ε^(1/6)
    if x.abs() < 3e-3 {
        let x2 = x * x;
        return Ok(1.0 - x2 / 6.0 * (1.0 - x2 / 20.0));
    }
    Ok(x.sin() / x)
}
