//! Elliptic integrals of the first and second kind
//!
//! The complete integrals K(k) and E(k) use the Arithmetic-Geometric Mean (AGM) method.
//! The incomplete integrals F(φ, k) and E(φ, k) reduce the amplitude to |φ| <= π/2 and
//! evaluate Carlson's symmetric forms R_F and R_D by duplication. Arguments are the
//! modulus k, with the parameter m = k².
//!
//! # References
//! - DLMF 19.8: AGM method for elliptic integrals
//! - DLMF 19.25, 19.36: Carlson forms and their duplication
//! - Abramowitz & Stegun 17.6

use std::f64::consts::PI;

use crate::error::{Error, Result};
use crate::policy;

/// Maximum iterations for AGM convergence
const MAX_ITER: usize = 60;

/// Convergence threshold for AGM
const EPSILON: f64 = 1e-16;

/// Relative spread of the Carlson arguments at which the series tail is used
const CARLSON_TOLERANCE: f64 = 1e-3;

fn check_modulus(function: &'static str, k: f64) -> Result<()> {
    if k.is_nan() {
        return Err(Error::nan_argument(function));
    }
    if k.abs() > 1.0 {
        return Err(Error::domain(function, "requires |k| <= 1"));
    }
    Ok(())
}

/// Runs the AGM of 1 and k' = √(1-k²), returning the mean and Σ 2^(n-1) cₙ².
fn agm(function: &'static str, k: f64) -> Result<(f64, f64)> {
    let mut a = 1.0;
    let mut b = ((1.0 - k) * (1.0 + k)).sqrt();
    let mut sum = 0.5 * k * k;
    let mut power_of_two = 0.5;

    for _ in 0..MAX_ITER {
        let c = 0.5 * (a - b);
        power_of_two *= 2.0;
        sum += power_of_two * c * c;

        let a_new = 0.5 * (a + b);
        b = (a * b).sqrt();
        a = a_new;
        if c.abs() <= EPSILON * a {
            return Ok((a, sum));
        }
    }
    Err(Error::evaluation(function, "AGM did not converge"))
}

/// Complete elliptic integral of the first kind K(k).
///
/// ```text
/// K(k) = ∫₀^(π/2) dθ / √(1 - k²·sin²θ)
/// ```
///
/// # Properties
/// - Domain: |k| <= 1; |k| = 1 diverges to +∞
/// - K(0) = π/2, K(-k) = K(k)
///
/// # Algorithm
/// K(k) = π / (2 · AGM(1, √(1-k²)))
pub fn ellint_1(k: f64) -> Result<f64> {
    const F: &str = "ellint_1";
    let raw = || -> Result<f64> {
        check_modulus(F, k)?;
        complete_k(F, k)
    };
    raw().or_else(policy::raise)
}

fn complete_k(function: &'static str, k: f64) -> Result<f64> {
    if k.abs() == 1.0 {
        return Err(Error::overflow(function, false));
    }
    if k == 0.0 {
        return Ok(PI / 2.0);
    }
    let (mean, _) = agm(function, k)?;
    Ok(PI / (2.0 * mean))
}

/// Complete elliptic integral of the second kind E(k).
///
/// ```text
/// E(k) = ∫₀^(π/2) √(1 - k²·sin²θ) dθ
/// ```
///
/// # Properties
/// - Domain: |k| <= 1
/// - E(0) = π/2, E(±1) = 1
///
/// # Algorithm
/// E(k) = K(k) · [1 - Σₙ 2^(n-1) cₙ²] with c₀ = k and cₙ = (aₙ₋₁ - bₙ₋₁)/2
pub fn ellint_2(k: f64) -> Result<f64> {
    const F: &str = "ellint_2";
    let raw = || -> Result<f64> {
        check_modulus(F, k)?;
        complete_e(F, k)
    };
    raw().or_else(policy::raise)
}

fn complete_e(function: &'static str, k: f64) -> Result<f64> {
    if k.abs() == 1.0 {
        return Ok(1.0);
    }
    if k == 0.0 {
        return Ok(PI / 2.0);
    }
    let (mean, sum) = agm(function, k)?;
    Ok(PI / (2.0 * mean) * (1.0 - sum))
}

// ============================================================================
// Incomplete Integrals
// ============================================================================

/// Carlson's R_F(x, y, z) = ½ ∫₀^∞ dt / √((t+x)(t+y)(t+z)); at most one argument may be zero.
fn carlson_rf(function: &'static str, x: f64, y: f64, z: f64) -> Result<f64> {
    let (mut x, mut y, mut z) = (x, y, z);
    for _ in 0..MAX_ITER {
        let mean = (x + y + z) / 3.0;
        let dx = (mean - x) / mean;
        let dy = (mean - y) / mean;
        let dz = (mean - z) / mean;
        if dx.abs().max(dy.abs()).max(dz.abs()) < CARLSON_TOLERANCE {
            let e2 = dx * dy - dz * dz;
            let e3 = dx * dy * dz;
            let tail = 1.0 + (e2 / 24.0 - 0.1 - 3.0 / 44.0 * e3) * e2 + e3 / 14.0;
            return Ok(tail / mean.sqrt());
        }
        let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
        let lambda = sx * (sy + sz) + sy * sz;
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
    }
    Err(Error::evaluation(function, "R_F duplication did not converge"))
}

/// Carlson's R_D(x, y, z) = (3/2) ∫₀^∞ dt / ((t+z) √((t+x)(t+y)(t+z))); x and y not both zero.
fn carlson_rd(function: &'static str, x: f64, y: f64, z: f64) -> Result<f64> {
    let (mut x, mut y, mut z) = (x, y, z);
    let mut sum = 0.0;
    let mut factor = 1.0;
    for _ in 0..MAX_ITER {
        let mean = 0.2 * (x + y + 3.0 * z);
        let dx = (mean - x) / mean;
        let dy = (mean - y) / mean;
        let dz = (mean - z) / mean;
        if dx.abs().max(dy.abs()).max(dz.abs()) < CARLSON_TOLERANCE {
            let ea = dx * dy;
            let eb = dz * dz;
            let ec = ea - eb;
            let ed = ea - 6.0 * eb;
            let ee = ed + 2.0 * ec;
            let tail = 1.0
                + ed * (-3.0 / 14.0 + 9.0 / 88.0 * ed - 9.0 / 52.0 * dz * ee)
                + dz * (ee / 6.0 + dz * (-9.0 / 22.0 * ec + dz * 3.0 / 26.0 * ea));
            return Ok(3.0 * sum + factor * tail / (mean * mean.sqrt()));
        }
        let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
        let lambda = sx * (sy + sz) + sy * sz;
        sum += factor / (sz * (z + lambda));
        factor *= 0.25;
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
    }
    Err(Error::evaluation(function, "R_D duplication did not converge"))
}

/// An amplitude reduced to φ = nπ + r with |r| <= π/2.
struct Amplitude {
    periods: f64,
    sin: f64,
    cos: f64,
}

/// Validate (k, φ) and reduce φ; infinite φ is reported as an overflow.
fn reduce_amplitude(function: &'static str, k: f64, phi: f64) -> Result<Amplitude> {
    if k.is_nan() || phi.is_nan() {
        return Err(Error::nan_argument(function));
    }
    if k.is_infinite() {
        return Err(Error::domain(function, "infinite modulus"));
    }
    if phi.is_infinite() {
        if k.abs() > 1.0 {
            return Err(Error::domain(function, "requires |k| <= 1 for unbounded φ"));
        }
        return Err(Error::overflow(function, phi < 0.0));
    }

    let periods = (phi / PI).round();
    let (sin, cos) = (phi - periods * PI).sin_cos();
    if (k * sin).abs() > 1.0 {
        return Err(Error::domain(function, "requires k² sin²φ <= 1"));
    }
    if periods != 0.0 && k.abs() > 1.0 {
        return Err(Error::domain(function, "requires |k| <= 1 for |φ| > π/2"));
    }
    Ok(Amplitude { periods, sin, cos })
}

/// Incomplete elliptic integral of the first kind F(φ, k).
///
/// ```text
/// F(φ, k) = ∫₀^φ dθ / √(1 - k²·sin²θ)
/// ```
///
/// Requires k² sin²φ <= 1, and |k| <= 1 once |φ| > π/2. F(φ, k) = 2nK(k) + F(r, k) for
/// φ = nπ + r, and F(r, k) = sin r · R_F(cos²r, 1 - k²sin²r, 1).
pub fn ellint_1_inc(k: f64, phi: f64) -> Result<f64> {
    const F: &str = "ellint_1_inc";
    let raw = || -> Result<f64> {
        let amp = reduce_amplitude(F, k, phi)?;
        let q = (1.0 - k * amp.sin) * (1.0 + k * amp.sin);
        if q == 0.0 && amp.cos == 0.0 {
            return Err(Error::overflow(F, phi < 0.0));
        }
        let partial = amp.sin * carlson_rf(F, amp.cos * amp.cos, q, 1.0)?;
        if amp.periods == 0.0 {
            return Ok(partial);
        }
        if k.abs() == 1.0 {
            return Err(Error::overflow(F, phi < 0.0));
        }
        Ok(partial + 2.0 * amp.periods * complete_k(F, k)?)
    };
    raw().or_else(policy::raise)
}

/// Incomplete elliptic integral of the second kind E(φ, k).
///
/// ```text
/// E(φ, k) = ∫₀^φ √(1 - k²·sin²θ) dθ
/// ```
///
/// Same domain as [`ellint_1_inc`]. E(r, k) = sin r · R_F(c, q, 1) - (k² sin³r / 3) R_D(c, q, 1)
/// with c = cos²r and q = 1 - k²sin²r; E(r, ±1) = sin r.
pub fn ellint_2_inc(k: f64, phi: f64) -> Result<f64> {
    const F: &str = "ellint_2_inc";
    let raw = || -> Result<f64> {
        let amp = reduce_amplitude(F, k, phi)?;
        let partial = if k.abs() == 1.0 {
            amp.sin
        } else {
            let c = amp.cos * amp.cos;
            let q = (1.0 - k * amp.sin) * (1.0 + k * amp.sin);
            let s3 = amp.sin * amp.sin * amp.sin;
            amp.sin * carlson_rf(F, c, q, 1.0)? - k * k * s3 / 3.0 * carlson_rd(F, c, q, 1.0)?
        };
        if amp.periods == 0.0 {
            return Ok(partial);
        }
        Ok(partial + 2.0 * amp.periods * complete_e(F, k)?)
    };
    raw().or_else(policy::raise)
}
