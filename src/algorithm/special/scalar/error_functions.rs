//! Error function implementations (erf, erfc, erf_inv, erfc_inv)

use crate::algorithm::special::SQRT_PI;
use crate::error::{Error, Result};
use crate::policy;

const TWO_OVER_SQRT_PI: f64 = 1.1283791670955126; // 2/sqrt(pi)
const FRAC_1_SQRT_PI: f64 = 0.5641895835477563; // 1/sqrt(pi)

// ============================================================================
// Error Function Implementation
// ============================================================================

/// Compute erf(x).
///
/// Maclaurin series for |x| < 2, `1 - erfc(|x|)` beyond. Saturates to ±1 for |x| >= 6.
pub fn erf(x: f64) -> Result<f64> {
    if x.is_nan() {
        return policy::raise(Error::nan_argument("erf"));
    }
    Ok(erf_raw(x))
}

/// Compute erfc(x) = 1 - erf(x) without cancellation for large x.
///
/// Results below the smallest subnormal (x > ~26.5) signal underflow.
pub fn erfc(x: f64) -> Result<f64> {
    const F: &str = "erfc";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    let value = erfc_raw(x);
    if value == 0.0 && x.is_finite() {
        return policy::raise(Error::underflow(F));
    }
    Ok(value)
}

pub(crate) fn erf_raw(x: f64) -> f64 {
    if x == 0.0 {
        return x;
    }
    if x.is_infinite() {
        return x.signum();
    }

    let sign = x.signum();
    let a = x.abs();

    if a < 2.0 {
        sign * erf_maclaurin(a)
    } else if a < 6.0 {
        sign * (1.0 - erfc_continued_fraction(a, 60))
    } else {
        // erfc < 2e-17
        sign
    }
}

pub(crate) fn erfc_raw(x: f64) -> f64 {
    if x == f64::INFINITY {
        return 0.0;
    }
    if x < 0.0 {
        return 1.0 + erf_raw(-x);
    }
    if x < 0.75 {
        1.0 - erf_maclaurin(x)
    } else if x < 2.0 {
        // The fraction converges slowly near the origin
        erfc_continued_fraction(x, 400)
    } else {
        erfc_continued_fraction(x, 60)
    }
}

/// erf(x) = (2/sqrt(pi)) * sum_{n=0}^inf (-1)^n * x^(2n+1) / (n! * (2n+1))
fn erf_maclaurin(a: f64) -> f64 {
    let x2 = a * a;
    let mut term = a; // first term: x^1 / (0! * 1) = x
    let mut sum = a;
    for n in 1..60 {
        term *= -x2 / (n as f64);
        let contribution = term / (2 * n + 1) as f64;
        sum += contribution;
        if contribution.abs() < sum.abs() * 1e-16 {
            break;
        }
    }
    sum * TWO_OVER_SQRT_PI
}

/// Laplace continued fraction for erfc(x), x > 0:
/// erfc(x) = exp(-x^2)/sqrt(pi) * 1/(x + 0.5/(x + 1/(x + 1.5/(x + ...))))
/// evaluated from the tail with `n_terms` levels.
fn erfc_continued_fraction(a: f64, n_terms: usize) -> f64 {
    let mut f = 0.0_f64;
    for n in (1..=n_terms).rev() {
        f = (n as f64) * 0.5 / (a + f);
    }
    (-(a * a)).exp() * FRAC_1_SQRT_PI / (a + f)
}

// ============================================================================
// Inverse Error Functions
// ============================================================================

/// Compute erf⁻¹(p) for p in [-1, 1]; p = ±1 overflows to ±∞.
pub fn erf_inv(p: f64) -> Result<f64> {
    const F: &str = "erf_inv";
    if p.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if p.abs() > 1.0 {
        return policy::raise(Error::domain(F, "|p| > 1"));
    }
    if p.abs() == 1.0 {
        return policy::raise(Error::overflow(F, p < 0.0));
    }
    if p == 0.0 {
        return Ok(p);
    }

    let a = p.abs();
    let y = if a <= 0.5 {
        erf_inv_core(a)
    } else {
        // 1 - a is exact here
        erfc_inv_core(1.0 - a)
    };
    Ok(p.signum() * y)
}

/// Compute erfc⁻¹(q) for q in [0, 2]; q = 0 and q = 2 overflow to +∞ and −∞.
pub fn erfc_inv(q: f64) -> Result<f64> {
    const F: &str = "erfc_inv";
    if q.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if !(0.0..=2.0).contains(&q) {
        return policy::raise(Error::domain(F, "q outside [0, 2]"));
    }
    if q == 0.0 || q == 2.0 {
        return policy::raise(Error::overflow(F, q == 2.0));
    }
    if q == 1.0 {
        return Ok(0.0);
    }

    if q > 1.0 {
        return Ok(-erfc_inv(2.0 - q)?);
    }
    if q <= 0.5 {
        Ok(erfc_inv_core(q))
    } else {
        Ok(erf_inv_core(1.0 - q))
    }
}

/// Solve erf(y) = p for 0 < p <= 0.5 by Halley iteration.
fn erf_inv_core(p: f64) -> f64 {
    let mut y = if p < 1e-8 {
        p * SQRT_PI * 0.5
    } else {
        ndtri(0.5 + 0.5 * p) * std::f64::consts::FRAC_1_SQRT_2
    };
    for _ in 0..4 {
        let f = erf_raw(y) - p;
        let dfdy = TWO_OVER_SQRT_PI * (-y * y).exp();
        let delta = f / dfdy;
        // f''/f' = -2y
        y -= delta / (1.0 + y * delta);
        if delta.abs() <= 1e-16 * y.abs() {
            break;
        }
    }
    y
}

/// Solve erfc(y) = q for 0 < q <= 0.5 by Halley iteration on erfc, which keeps the
/// relative accuracy of tiny tail probabilities.
fn erfc_inv_core(q: f64) -> f64 {
    let mut y = -ndtri(0.5 * q) * std::f64::consts::FRAC_1_SQRT_2;
    for _ in 0..4 {
        let dfdy = -TWO_OVER_SQRT_PI * (-y * y).exp();
        if dfdy == 0.0 {
            break;
        }
        let f = erfc_raw(y) - q;
        let delta = f / dfdy;
        y -= delta / (1.0 + y * delta);
        if delta.abs() <= 1e-16 * y.abs() {
            break;
        }
    }
    y
}

/// Inverse of the standard normal CDF (quantile function), used as a starting point.
///
/// Uses the Acklam algorithm (Peter J. Acklam, 2010), ~1e-9 relative accuracy.
fn ndtri(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    if p == 0.5 {
        return 0.0;
    }

    // Rational approximation for the central region
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];

    // Rational approximation for the tails
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    // Break-points for the regions
    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn assert_close(a: f64, b: f64, tol: f64) {
        let rel = (a - b).abs() / b.abs().max(1e-300);
        assert!(rel < tol, "expected {b}, got {a} (rel diff {rel})");
    }

    #[test]
    fn test_erf_erfc() {
        assert_eq!(erf(0.0).unwrap(), 0.0);
        assert_close(erf(0.5).unwrap(), 0.52049987781304654, 1e-15);
        assert_close(erf(-0.5).unwrap(), -0.52049987781304654, 1e-15);
        assert_eq!(erf(f64::INFINITY).unwrap(), 1.0);
        assert_eq!(erf(f64::NEG_INFINITY).unwrap(), -1.0);

        assert_close(erfc(1.5).unwrap(), 0.033894853524689273, 1e-14);
        assert_close(erfc(3.0).unwrap(), 2.2090496998585441e-5, 1e-14);
        assert_close(erfc(10.0).unwrap(), 2.0884875837625448e-45, 1e-13);
        assert_close(erfc(26.0).unwrap(), 5.6631924088561428e-296, 1e-12);
        assert_close(erfc(-2.0).unwrap(), 1.9953222650189527, 1e-15);
        assert_eq!(erfc(f64::INFINITY).unwrap(), 0.0);
        assert_eq!(erfc(f64::NEG_INFINITY).unwrap(), 2.0);
    }

    #[test]
    fn test_erfc_underflow() {
        assert_eq!(erfc(30.0).unwrap_err(), Error::underflow("erfc"));
        assert_eq!(erfc(1e200).unwrap_err().kind(), ErrorKind::Underflow);
    }

    #[test]
    fn test_erf_inv() {
        assert_close(erf_inv(0.5).unwrap(), 0.47693627620446987, 1e-14);
        assert_close(erf_inv(1e-20).unwrap(), 8.8622692545275801e-21, 1e-14);
        assert_close(erf_inv(-0.999).unwrap(), -2.3267537655135247, 1e-14);
        assert_eq!(erf_inv(1.0).unwrap_err(), Error::overflow("erf_inv", false));
        assert_eq!(erf_inv(-1.0).unwrap_err(), Error::overflow("erf_inv", true));
        assert_eq!(erf_inv(1.5).unwrap_err().kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_erfc_inv() {
        assert_close(erfc_inv(1e-100).unwrap(), 15.065574702592646, 1e-14);
        assert_close(erfc_inv(1e-10).unwrap(), 4.5728249673894853, 1e-14);
        assert_close(erfc_inv(0.3).unwrap(), 0.73286907795921685, 1e-14);
        assert_close(erfc_inv(1.7).unwrap(), -0.73286907795921685, 1e-14);
        assert_eq!(erfc_inv(1.0).unwrap(), 0.0);
        assert_eq!(erfc_inv(0.0).unwrap_err(), Error::overflow("erfc_inv", false));
        assert_eq!(erfc_inv(2.0).unwrap_err(), Error::overflow("erfc_inv", true));
        assert_eq!(erfc_inv(-0.1).unwrap_err().kind(), ErrorKind::Domain);
    }
}
