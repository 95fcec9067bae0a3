//! Bessel functions of real order (J, Y, I, K) and the spherical functions j, y
//!
//! Evaluation strategy for order ν >= 0 and x > 0:
//! - Large x (x >= 25 and x >= ν²/2): Hankel asymptotic expansion
//! - Otherwise: Steed's continued fraction for J'/J (I'/I) with downward recurrence to
//!   a fractional order μ, then Temme's series (x < 2) or Steed's second continued
//!   fraction (x >= 2) for Y_μ (K_μ), and upward recurrence for Y (K)
//! - J and I for small x (x² <= ν + 1) use their power series directly
//! - Below 1e-305, where 1/x leaves the double range, Y and K take the leading terms of
//!   their small-argument expansions
//!
//! Negative orders go through the reflection formulas; negative x is only defined for
//! integer orders.

use std::f64::consts::{LN_2, PI};

use super::elementary::{LOG_MAX, cos_pi_raw, sin_pi_raw};
use super::gamma::{LOG_MIN, gamma_positive, lgamma_positive};
use crate::algorithm::special::{EULER_MASCHERONI, settle, signal};
use crate::error::{Error, Result};
use crate::policy;

/// Relative convergence threshold for the continued fractions and series
const EPS: f64 = 1e-16;

/// Guard against division by zero in Lentz's method
const FPMIN: f64 = 1e-300;

/// Iteration cap; the first continued fraction needs O(x) steps
const MAX_ITER: usize = 1_000_000;

/// Below this x Temme's series is used for Y_μ and K_μ
const XMIN: f64 = 2.0;

/// Threshold for renormalising the downward recurrences
const RESCALE: f64 = 1e250;

/// Below this x the continued fractions overflow; Y and K use their leading terms
const TINY_X: f64 = 1e-305;

/// Taylor coefficients of 1/Γ(1 + μ) about μ = 0 (A&S 6.1.34)
const INV_GAMMA_TAYLOR: [f64; 26] = [
    1.0,
    0.577_215_664_901_532_9,
    -0.655_878_071_520_253_8,
    -0.042_002_635_034_095_2,
    0.166_538_611_382_291_5,
    -0.042_197_734_555_544_3,
    -0.009_621_971_527_877_0,
    0.007_218_943_246_663_0,
    -0.001_165_167_591_859_1,
    -0.000_215_241_674_114_9,
    0.000_128_050_282_388_2,
    -0.000_020_134_854_780_7,
    -0.000_001_250_493_482_1,
    0.000_001_133_027_232_0,
    -0.000_000_205_633_841_7,
    0.000_000_006_116_095_0,
    0.000_000_005_002_007_5,
    -0.000_000_001_181_274_6,
    0.000_000_000_104_342_7,
    0.000_000_000_007_782_3,
    -0.000_000_000_003_696_8,
    0.000_000_000_000_510_0,
    -0.000_000_000_000_020_6,
    -0.000_000_000_000_005_4,
    0.000_000_000_000_001_4,
    0.000_000_000_000_000_1,
];

// ============================================================================
// Shared Kernels
// ============================================================================

/// Gamma-function combinations used by Temme's series:
/// gam1 = (1/Γ(1-μ) - 1/Γ(1+μ)) / (2μ), gam2 = (1/Γ(1-μ) + 1/Γ(1+μ)) / 2.
struct TemmeGammas {
    gam1: f64,
    gam2: f64,
    gampl: f64,
    gammi: f64,
}

fn temme_gammas(mu: f64) -> TemmeGammas {
    let mut g = TemmeGammas {
        gam1: 0.0,
        gam2: 0.0,
        gampl: 0.0,
        gammi: 0.0,
    };
    let mut power = 1.0;
    let mut lower = 0.0;
    for (k, c) in INV_GAMMA_TAYLOR.iter().enumerate() {
        let t = c * power;
        g.gampl += t;
        if k % 2 == 0 {
            g.gam2 += t;
            g.gammi += t;
        } else {
            g.gam1 -= c * lower;
            g.gammi -= t;
        }
        lower = power;
        power *= mu;
    }
    g
}

fn is_integer(v: f64) -> bool {
    v == v.trunc()
}

/// (-1)^n for an integral n
fn parity_sign(n: f64) -> f64 {
    if (n * 0.5).trunc() == n * 0.5 { 1.0 } else { -1.0 }
}

/// Exact zero from a finite nonzero argument is an underflow.
fn settle_small(function: &'static str, value: f64) -> Result<f64> {
    if value == 0.0 {
        return policy::raise(Error::underflow(function));
    }
    settle(function, value)
}

/// Hankel's expansion for large x:
/// J = √(2/πx)(P cos χ - Q sin χ), Y = √(2/πx)(P sin χ + Q cos χ), χ = x - (ν/2 + 1/4)π.
fn hankel_asymptotic(nu: f64, x: f64) -> (f64, f64) {
    let (p, q) = asymptotic_pq(nu, x, true);

    let phase = 0.5 * nu + 0.25;
    let (cp, sp) = (cos_pi_raw(phase), sin_pi_raw(phase));
    let (s, c) = x.sin_cos();
    let cos_chi = c * cp + s * sp;
    let sin_chi = s * cp - c * sp;

    let scale = (2.0 / (PI * x)).sqrt();
    (
        scale * (p * cos_chi - q * sin_chi),
        scale * (p * sin_chi + q * cos_chi),
    )
}

/// Sums of aₖ(ν)/xᵏ with aₖ(ν) = Π (4ν² - (2j-1)²) / (k! 8ᵏ).
///
/// With `oscillating` the even terms go to P and the odd ones to Q with alternating signs
/// (Hankel); otherwise returns (Σ(-1)ᵏ tₖ, Σ tₖ) for the modified functions.
fn asymptotic_pq(nu: f64, x: f64, oscillating: bool) -> (f64, f64) {
    let mu = 4.0 * nu * nu;
    let mut first = 0.0;
    let mut second = 0.0;
    let mut term = 1.0;
    for k in 0..200usize {
        if oscillating {
            match k % 4 {
                0 => first += term,
                1 => second += term,
                2 => first -= term,
                _ => second -= term,
            }
        } else {
            first += if k % 2 == 0 { term } else { -term };
            second += term;
        }

        let kf = (k + 1) as f64;
        let odd = 2.0 * kf - 1.0;
        let next = term * (mu - odd * odd) / (kf * 8.0 * x);
        if next == 0.0 || (next.abs() > term.abs() && kf > nu) {
            break;
        }
        if next.abs() < 1e-17 * first.abs().max(second.abs()).max(1.0) {
            break;
        }
        term = next;
    }
    (first, second)
}

fn use_asymptotic(nu: f64, x: f64) -> bool {
    x >= 25.0 && x >= 0.5 * nu * nu
}

/// ln of the upper bound (x/2)^ν / Γ(ν+1) on |J_ν(x)|
fn log_j_bound(nu: f64, x: f64) -> f64 {
    nu * (x.ln() - LN_2) - lgamma_positive(nu + 1.0)
}

/// sum · (x/2)^ν / Γ(ν+1) for ν >= 0, x > 0
fn series_prefactor(nu: f64, x: f64, sum: f64) -> f64 {
    // x/2 is not formed: halving a subnormal x rounds
    let power = x.powf(nu) * 0.5_f64.powf(nu);
    if nu < 170.0 && power.is_finite() && power >= f64::MIN_POSITIVE {
        return sum * (power / gamma_positive(nu + 1.0));
    }
    unscale(sum, log_j_bound(nu, x))
}

/// J_ν(x) = (x/2)^ν/Γ(ν+1) Σ (-x²/4)ᵏ / (k! (ν+1)ₖ)
fn j_series(nu: f64, x: f64) -> f64 {
    let q = 0.25 * x * x;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..MAX_ITER {
        let kf = k as f64;
        term *= -q / (kf * (nu + kf));
        sum += term;
        if term.abs() < EPS * sum.abs() {
            break;
        }
    }
    series_prefactor(nu, x, sum)
}

/// Y_ν(x) ≈ -Γ(ν)/π (x/2)^-ν + cot(νπ) (x/2)^ν / Γ(ν+1), and (2/π)(ln(x/2) + γ) for ν = 0.
fn y_leading(nu: f64, x: f64) -> f64 {
    let log_half = x.ln() - LN_2;
    if nu == 0.0 {
        return 2.0 / PI * (log_half + EULER_MASCHERONI);
    }
    let lg = lgamma_positive(nu + 1.0);
    // Γ(ν) = Γ(ν+1)/ν
    let singular = unscale(-1.0 / (PI * nu), lg - nu * log_half);
    if is_integer(nu) {
        return singular;
    }
    singular + unscale(cos_pi_raw(nu) / sin_pi_raw(nu), nu * log_half - lg)
}

// ============================================================================
// J and Y
// ============================================================================

/// J_ν(x) and Y_ν(x) for ν >= 0, x > 0. Underflow of J shows as 0, overflow of Y as ±∞.
fn jy_nonnegative(function: &'static str, nu: f64, x: f64) -> Result<(f64, f64)> {
    if use_asymptotic(nu, x) {
        return Ok(hankel_asymptotic(nu, x));
    }
    if x < 1e10 && log_j_bound(nu, x) < LOG_MIN {
        // Wronskian: |Y| is then at least of order 1/(πx|J|)
        return Ok((0.0, f64::NEG_INFINITY));
    }
    if x * x > nu + 1.0 {
        return temme_jy(function, nu, x);
    }
    // The Wronskian in temme_jy loses J here to cancellation in Y_μ
    let j = j_series(nu, x);
    let y = if x < TINY_X {
        y_leading(nu, x)
    } else {
        temme_jy(function, nu, x)?.1
    };
    Ok((j, y))
}

fn temme_jy(function: &'static str, nu: f64, x: f64) -> Result<(f64, f64)> {
    let nl = if x < XMIN {
        (nu + 0.5) as usize
    } else {
        (nu - x + 1.5).max(0.0) as usize
    };
    if nl > MAX_ITER {
        return Err(Error::evaluation(function, "order too large"));
    }
    let xmu = nu - nl as f64;
    let xmu2 = xmu * xmu;
    let xi = 1.0 / x;
    let xi2 = 2.0 * xi;
    let w = xi2 / PI;

    // CF1: f_ν = J'_ν / J_ν
    let mut isign = 1.0;
    let mut h = (nu * xi).max(FPMIN);
    let mut b = xi2 * nu;
    let mut d = 0.0;
    let mut c = h;
    let mut converged = false;
    for _ in 0..MAX_ITER {
        b += xi2;
        d = b - d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = b - 1.0 / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = c * d;
        h *= del;
        if d < 0.0 {
            isign = -isign;
        }
        if (del - 1.0).abs() < EPS {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(Error::evaluation(function, "continued fraction did not converge"));
    }

    // Downward recurrence from ν to μ with arbitrary normalisation
    let mut rjl = isign * 1e-30;
    let mut rjpl = h * rjl;
    let mut rjl1 = rjl;
    let mut fact = nu * xi;
    for _ in 0..nl {
        let rjtemp = fact * rjl + rjpl;
        fact -= xi;
        rjpl = fact * rjtemp - rjl;
        rjl = rjtemp;
        if rjl.abs() > RESCALE {
            rjl /= RESCALE;
            rjpl /= RESCALE;
            rjl1 /= RESCALE;
        }
    }
    if rjl == 0.0 {
        rjl = EPS;
    }
    let f = rjpl / rjl;

    let (rjmu, rymu, ry1) = if x < XMIN {
        // Temme's series for Y_μ and Y_μ+1
        let x2 = 0.5 * x;
        let pimu = PI * xmu;
        let fact = if pimu.abs() < EPS { 1.0 } else { pimu / pimu.sin() };
        let d = -x2.ln();
        let e = xmu * d;
        let fact2 = if e.abs() < EPS { 1.0 } else { e.sinh() / e };
        let g = temme_gammas(xmu);
        let mut ff = 2.0 / PI * fact * (g.gam1 * e.cosh() + g.gam2 * fact2 * d);
        let e = e.exp();
        let mut p = e / (g.gampl * PI);
        let mut q = 1.0 / (e * PI * g.gammi);
        let pimu2 = 0.5 * pimu;
        let fact3 = if pimu2.abs() < EPS { 1.0 } else { pimu2.sin() / pimu2 };
        let r = PI * pimu2 * fact3 * fact3;
        let mut c = 1.0;
        let d = -x2 * x2;
        let mut sum = ff + r * q;
        let mut sum1 = p;
        let mut converged = false;
        for i in 1..=MAX_ITER {
            let fi = i as f64;
            ff = (fi * ff + p + q) / (fi * fi - xmu2);
            c *= d / fi;
            p /= fi - xmu;
            q /= fi + xmu;
            let del = c * (ff + r * q);
            sum += del;
            let del1 = c * p - fi * del;
            sum1 += del1;
            if del.abs() < (1.0 + sum.abs()) * EPS {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(Error::evaluation(function, "series did not converge"));
        }
        let rymu = -sum;
        let ry1 = -sum1 * xi2;
        let rymup = xmu * xi * rymu - ry1;
        (w / (rymup - f * rymu), rymu, ry1)
    } else {
        // CF2: p + iq = (J'_μ + iY'_μ) / (J_μ + iY_μ)
        let mut a = 0.25 - xmu2;
        let mut p = -0.5 * xi;
        let mut q = 1.0;
        let br = 2.0 * x;
        let mut bi = 2.0;
        let fact = a * xi / (p * p + q * q);
        let mut cr = br + q * fact;
        let mut ci = bi + p * fact;
        let den = br * br + bi * bi;
        let mut dr = br / den;
        let mut di = -bi / den;
        let mut dlr = cr * dr - ci * di;
        let mut dli = cr * di + ci * dr;
        let temp = p * dlr - q * dli;
        q = p * dli + q * dlr;
        p = temp;
        let mut converged = false;
        for i in 2..=MAX_ITER {
            a += 2.0 * (i - 1) as f64;
            bi += 2.0;
            dr = a * dr + br;
            di = a * di + bi;
            if dr.abs() + di.abs() < FPMIN {
                dr = FPMIN;
            }
            let fact = a / (cr * cr + ci * ci);
            cr = br + cr * fact;
            ci = bi - ci * fact;
            if cr.abs() + ci.abs() < FPMIN {
                cr = FPMIN;
            }
            let den = dr * dr + di * di;
            dr /= den;
            di /= -den;
            dlr = cr * dr - ci * di;
            dli = cr * di + ci * dr;
            let temp = p * dlr - q * dli;
            q = p * dli + q * dlr;
            p = temp;
            if (dlr - 1.0).abs() + dli.abs() < EPS {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(Error::evaluation(function, "continued fraction did not converge"));
        }
        let gam = (p - f) / q;
        let rjmu = (w / ((p - f) * gam + q)).sqrt().copysign(rjl);
        let rymu = rjmu * gam;
        let rymup = rymu * (p + q / gam);
        (rjmu, rymu, xmu * xi * rymu - rymup)
    };

    let j = rjl1 * (rjmu / rjl);

    // Upward recurrence for Y is stable
    let mut ymu = rymu;
    let mut y1 = ry1;
    for i in 1..=nl {
        let next = (xmu + i as f64) * xi2 * y1 - ymu;
        ymu = y1;
        y1 = next;
        if ymu.is_infinite() {
            break;
        }
    }
    Ok((j, ymu))
}

/// J_ν(x) and Y_ν(x) for any real ν and x > 0.
pub(crate) fn bessel_jy(function: &'static str, nu: f64, x: f64) -> Result<(f64, f64)> {
    if nu >= 0.0 {
        return jy_nonnegative(function, nu, x);
    }
    let a = -nu;
    let (j, y) = jy_nonnegative(function, a, x)?;
    let (s, c) = (sin_pi_raw(a), cos_pi_raw(a));
    // J_-a = cos(aπ) J_a - sin(aπ) Y_a,  Y_-a = sin(aπ) J_a + cos(aπ) Y_a
    if s == 0.0 {
        return Ok((c * j, c * y));
    }
    if c == 0.0 {
        return Ok((-s * y, s * j));
    }
    Ok((c * j - s * y, s * j + c * y))
}

/// Compute the Bessel function of the first kind J_ν(x).
pub fn cyl_bessel_j(nu: f64, x: f64) -> Result<f64> {
    const F: &str = "cyl_bessel_j";
    if nu.is_nan() || x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if nu.is_infinite() {
        return policy::raise(Error::domain(F, "infinite order"));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    if x < 0.0 {
        if !is_integer(nu) {
            return policy::raise(Error::domain(F, "x < 0 requires an integer order"));
        }
        return Ok(parity_sign(nu) * cyl_bessel_j(nu, -x)?);
    }
    if x == 0.0 {
        if nu == 0.0 {
            return Ok(1.0);
        }
        if nu > 0.0 || is_integer(nu) {
            return Ok(0.0);
        }
        return policy::raise(Error::overflow(F, sin_pi_raw(-nu) < 0.0));
    }

    let (j, _) = signal(bessel_jy(F, nu, x), |s| (s, s))?;
    settle_small(F, j)
}

/// J'_ν(0): ±1/2 for ν = ±1, zero for ν = 0, ν > 1 and the other integers, infinite otherwise
fn j_prime_at_zero(function: &'static str, nu: f64) -> Result<f64> {
    if nu == 1.0 || nu == -1.0 {
        return Ok(0.5 * nu);
    }
    if nu >= 1.0 || nu == 0.0 || is_integer(nu) {
        return Ok(0.0);
    }
    if nu > 0.0 {
        return policy::raise(Error::overflow(function, false));
    }
    // J_-a ~ (x/2)^-a / Γ(1-a), and Γ(1-a) has the sign of sin(aπ)
    policy::raise(Error::overflow(function, sin_pi_raw(-nu) > 0.0))
}

/// Compute the derivative J'_ν(x) = (J_ν-1(x) - J_ν+1(x)) / 2.
pub fn cyl_bessel_j_prime(nu: f64, x: f64) -> Result<f64> {
    const F: &str = "cyl_bessel_j_prime";
    if nu.is_nan() || x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if nu.is_infinite() {
        return policy::raise(Error::domain(F, "infinite order"));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    if x < 0.0 {
        if !is_integer(nu) {
            return policy::raise(Error::domain(F, "x < 0 requires an integer order"));
        }
        return Ok(-parity_sign(nu) * cyl_bessel_j_prime(nu, -x)?);
    }
    if x == 0.0 {
        return j_prime_at_zero(F, nu);
    }

    let raw = || -> Result<f64> {
        let (below, _) = bessel_jy(F, nu - 1.0, x)?;
        let (above, _) = bessel_jy(F, nu + 1.0, x)?;
        Ok(0.5 * (below - above))
    };
    let value = signal(raw(), |s| s)?;
    settle_small(F, value)
}

/// Compute the Bessel function of the second kind (Neumann function) Y_ν(x).
///
/// `Y_ν(0)` overflows to −∞ for ν >= 0; x < 0 is a domain error.
pub fn cyl_neumann(nu: f64, x: f64) -> Result<f64> {
    const F: &str = "cyl_neumann";
    if nu.is_nan() || x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if nu.is_infinite() {
        return policy::raise(Error::domain(F, "infinite order"));
    }
    if x < 0.0 {
        return policy::raise(Error::domain(F, "requires x >= 0"));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    if x == 0.0 {
        let c = if nu < 0.0 { cos_pi_raw(-nu) } else { 1.0 };
        if c == 0.0 {
            return Ok(0.0);
        }
        return policy::raise(Error::overflow(F, c > 0.0));
    }

    let (_, y) = signal(bessel_jy(F, nu, x), |s| (s, s))?;
    settle(F, y)
}

/// Compute the derivative Y'_ν(x) = (Y_ν-1(x) - Y_ν+1(x)) / 2.
pub fn cyl_neumann_prime(nu: f64, x: f64) -> Result<f64> {
    const F: &str = "cyl_neumann_prime";
    if nu.is_nan() || x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if nu.is_infinite() {
        return policy::raise(Error::domain(F, "infinite order"));
    }
    if x < 0.0 {
        return policy::raise(Error::domain(F, "requires x >= 0"));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    if x == 0.0 {
        if nu >= 0.0 {
            return policy::raise(Error::overflow(F, false));
        }
        // Y_-a = sin(aπ) J_a + cos(aπ) Y_a
        let (s, c) = (sin_pi_raw(-nu), cos_pi_raw(-nu));
        if c == 0.0 {
            return Ok(s * j_prime_at_zero(F, -nu)?);
        }
        return policy::raise(Error::overflow(F, c < 0.0));
    }

    let raw = || -> Result<f64> {
        let (_, above) = bessel_jy(F, nu + 1.0, x)?;
        if above.is_infinite() {
            // The higher order dominates near zero
            return Ok(-above);
        }
        let (_, below) = bessel_jy(F, nu - 1.0, x)?;
        Ok(0.5 * (below - above))
    };
    let value = signal(raw(), |s| s)?;
    settle(F, value)
}

// ============================================================================
// I and K
// ============================================================================

/// I_ν(x) e^(-s) and K_ν(x) e^(s) with the scale exponent s.
struct ScaledIk {
    i: f64,
    k: f64,
    scale: f64,
}

impl ScaledIk {
    fn filled(sentinel: f64) -> Self {
        Self {
            i: sentinel,
            k: sentinel,
            scale: 0.0,
        }
    }

    fn i(&self) -> f64 {
        unscale(self.i, self.scale)
    }

    fn k(&self) -> f64 {
        unscale(self.k, -self.scale)
    }
}

/// v e^s, saturating to ±∞ or 0 instead of overflowing in an intermediate.
pub(crate) fn unscale(v: f64, s: f64) -> f64 {
    if v == 0.0 || s == 0.0 || v.is_infinite() {
        return v;
    }
    let log_abs = v.abs().ln() + s;
    if log_abs > LOG_MAX {
        v.signum() * f64::INFINITY
    } else if log_abs < LOG_MIN {
        0.0
    } else {
        v.signum() * log_abs.exp()
    }
}

/// I_ν(x) = (x/2)^ν/Γ(ν+1) Σ (x²/4)ᵏ / (k! (ν+1)ₖ), all terms positive.
fn i_series(nu: f64, x: f64) -> f64 {
    let q = 0.25 * x * x;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..MAX_ITER {
        let kf = k as f64;
        term *= q / (kf * (nu + kf));
        sum += term;
        if term < EPS * sum {
            break;
        }
    }
    series_prefactor(nu, x, sum)
}

/// K_ν(x) ≈ Γ(ν)/2 (x/2)^-ν - π/(2 sin νπ) (x/2)^ν / Γ(ν+1), and -ln(x/2) - γ for ν = 0.
fn k_leading(nu: f64, x: f64) -> f64 {
    let log_half = x.ln() - LN_2;
    if nu == 0.0 {
        return -log_half - EULER_MASCHERONI;
    }
    let lg = lgamma_positive(nu + 1.0);
    let singular = unscale(0.5 / nu, lg - nu * log_half);
    if is_integer(nu) {
        return singular;
    }
    singular - unscale(0.5 * PI / sin_pi_raw(nu), nu * log_half - lg)
}

/// I_ν(x) and K_ν(x) for ν >= 0, x > 0.
fn ik_nonnegative(function: &'static str, nu: f64, x: f64) -> Result<ScaledIk> {
    if use_asymptotic(nu, x) {
        // I ~ e^x/√(2πx) Σ(-1)ᵏaₖ/xᵏ,  K ~ √(π/2x) e^-x Σ aₖ/xᵏ
        let (alternating, plain) = asymptotic_pq(nu, x, false);
        return Ok(ScaledIk {
            i: alternating / (2.0 * PI * x).sqrt(),
            k: plain * (PI / (2.0 * x)).sqrt(),
            scale: x,
        });
    }
    // ln I_ν(x) <= ν ln(x/2) - ln Γ(ν+1) + x²/(4(ν+1))
    if log_j_bound(nu, x) + 0.25 * x * x / (nu + 1.0) < LOG_MIN {
        return Ok(ScaledIk {
            i: 0.0,
            k: f64::INFINITY,
            scale: 0.0,
        });
    }

    if x < TINY_X {
        return Ok(ScaledIk {
            i: i_series(nu, x),
            k: k_leading(nu, x),
            scale: 0.0,
        });
    }

    let mut ik = temme_ik(function, nu, x)?;
    if x <= XMIN || x * x <= nu + 1.0 {
        ik.i = unscale(i_series(nu, x), -ik.scale);
    }
    Ok(ik)
}

/// (I_ν(x) e^(-s), K_ν(x) e^(s), s) for ν >= 0, x > 0.
pub(crate) fn bessel_ik_scaled(
    function: &'static str,
    nu: f64,
    x: f64,
) -> Result<(f64, f64, f64)> {
    let ik = ik_nonnegative(function, nu, x)?;
    Ok((ik.i, ik.k, ik.scale))
}

fn temme_ik(function: &'static str, nu: f64, x: f64) -> Result<ScaledIk> {
    let nl = (nu + 0.5) as usize;
    if nl > MAX_ITER {
        return Err(Error::evaluation(function, "order too large"));
    }
    let xmu = nu - nl as f64;
    let xmu2 = xmu * xmu;
    let xi = 1.0 / x;
    let xi2 = 2.0 * xi;

    // CF1: f_ν = I'_ν / I_ν
    let mut h = (nu * xi).max(FPMIN);
    let mut b = xi2 * nu;
    let mut d = 0.0;
    let mut c = h;
    let mut converged = false;
    for _ in 0..MAX_ITER {
        b += xi2;
        d = 1.0 / (b + d);
        c = b + 1.0 / c;
        let del = c * d;
        h *= del;
        if (del - 1.0).abs() < EPS {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(Error::evaluation(function, "continued fraction did not converge"));
    }

    let mut ril = 1e-30;
    let mut ripl = h * ril;
    let mut ril1 = ril;
    let mut fact = nu * xi;
    for _ in 0..nl {
        let ritemp = fact * ril + ripl;
        fact -= xi;
        ripl = fact * ritemp + ril;
        ril = ritemp;
        if ril.abs() > RESCALE {
            ril /= RESCALE;
            ripl /= RESCALE;
            ril1 /= RESCALE;
        }
    }
    let f = ripl / ril;

    let (rkmu, rk1, scale) = if x < XMIN {
        // Temme's series for K_μ and K_μ+1
        let x2 = 0.5 * x;
        let pimu = PI * xmu;
        let fact = if pimu.abs() < EPS { 1.0 } else { pimu / pimu.sin() };
        let d = -x2.ln();
        let e = xmu * d;
        let fact2 = if e.abs() < EPS { 1.0 } else { e.sinh() / e };
        let g = temme_gammas(xmu);
        let mut ff = fact * (g.gam1 * e.cosh() + g.gam2 * fact2 * d);
        let mut sum = ff;
        let e = e.exp();
        let mut p = 0.5 * e / g.gampl;
        let mut q = 0.5 / (e * g.gammi);
        let mut c = 1.0;
        let d = x2 * x2;
        let mut sum1 = p;
        let mut converged = false;
        for i in 1..=MAX_ITER {
            let fi = i as f64;
            ff = (fi * ff + p + q) / (fi * fi - xmu2);
            c *= d / fi;
            p /= fi - xmu;
            q /= fi + xmu;
            let del = c * ff;
            sum += del;
            let del1 = c * (p - fi * ff);
            sum1 += del1;
            if del.abs() < sum.abs() * EPS {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(Error::evaluation(function, "series did not converge"));
        }
        (sum, sum1 * xi2, 0.0)
    } else {
        // CF2 (Steed), scaled by e^x
        let mut b = 2.0 * (1.0 + x);
        let mut d = 1.0 / b;
        let mut h = d;
        let mut delh = d;
        let mut q1 = 0.0;
        let mut q2 = 1.0;
        let a1 = 0.25 - xmu2;
        let mut q = a1;
        let mut c = a1;
        let mut a = -a1;
        let mut s = 1.0 + q * delh;
        let mut converged = false;
        for i in 2..=MAX_ITER {
            a -= 2.0 * (i - 1) as f64;
            c = -a * c / i as f64;
            let qnew = (q1 - b * q2) / a;
            q1 = q2;
            q2 = qnew;
            q += c * qnew;
            b += 2.0;
            d = 1.0 / (b + a * d);
            delh = (b * d - 1.0) * delh;
            h += delh;
            let dels = q * delh;
            s += dels;
            if (dels / s).abs() < EPS {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(Error::evaluation(function, "continued fraction did not converge"));
        }
        let h = a1 * h;
        let rkmu = (PI / (2.0 * x)).sqrt() / s;
        let rk1 = rkmu * (xmu + x + 0.5 - h) * xi;
        (rkmu, rk1, x)
    };

    // Wronskian gives I_μ; recur I back up to ν through the stored ratio
    let rkmup = xmu * xi * rkmu - rk1;
    let rimu = xi / (f * rkmu - rkmup);
    let i = rimu * (ril1 / ril);

    let mut kmu = rkmu;
    let mut k1 = rk1;
    for n in 1..=nl {
        let next = (xmu + n as f64) * xi2 * k1 + kmu;
        kmu = k1;
        k1 = next;
        if kmu.is_infinite() {
            break;
        }
    }
    Ok(ScaledIk { i, k: kmu, scale })
}

/// Compute the modified Bessel function of the first kind I_ν(x).
pub fn cyl_bessel_i(nu: f64, x: f64) -> Result<f64> {
    const F: &str = "cyl_bessel_i";
    if nu.is_nan() || x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if nu.is_infinite() {
        return policy::raise(Error::domain(F, "infinite order"));
    }
    if x < 0.0 {
        if !is_integer(nu) {
            return policy::raise(Error::domain(F, "x < 0 requires an integer order"));
        }
        return Ok(parity_sign(nu) * cyl_bessel_i(nu, -x)?);
    }
    if x.is_infinite() {
        return Ok(f64::INFINITY);
    }
    if x == 0.0 {
        if nu == 0.0 {
            return Ok(1.0);
        }
        if nu > 0.0 || is_integer(nu) {
            return Ok(0.0);
        }
        return policy::raise(Error::overflow(F, sin_pi_raw(-nu) < 0.0));
    }

    let value = signal(i_value(F, nu, x), |s| s)?;
    settle_small(F, value)
}

/// I_ν(x) for any real ν and x > 0, errors unraised.
fn i_value(function: &'static str, nu: f64, x: f64) -> Result<f64> {
    let a = nu.abs();
    let ik = ik_nonnegative(function, a, x)?;
    let mut value = ik.i();
    if nu < 0.0 {
        // I_-a = I_a + (2/π) sin(aπ) K_a
        let s = sin_pi_raw(a);
        if s != 0.0 {
            value += 2.0 / PI * s * ik.k();
        }
    }
    Ok(value)
}

/// Compute the derivative I'_ν(x) = (I_ν-1(x) + I_ν+1(x)) / 2.
pub fn cyl_bessel_i_prime(nu: f64, x: f64) -> Result<f64> {
    const F: &str = "cyl_bessel_i_prime";
    if nu.is_nan() || x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if nu.is_infinite() {
        return policy::raise(Error::domain(F, "infinite order"));
    }
    if x < 0.0 {
        if !is_integer(nu) {
            return policy::raise(Error::domain(F, "x < 0 requires an integer order"));
        }
        return Ok(-parity_sign(nu) * cyl_bessel_i_prime(nu, -x)?);
    }
    if x.is_infinite() {
        return Ok(f64::INFINITY);
    }
    if x == 0.0 {
        // I_ν and J_ν agree to leading order at zero, except I_-1 = I_1
        if nu == -1.0 {
            return Ok(0.5);
        }
        return j_prime_at_zero(F, nu);
    }

    let raw = || -> Result<f64> {
        Ok(0.5 * (i_value(F, nu - 1.0, x)? + i_value(F, nu + 1.0, x)?))
    };
    let value = signal(raw(), |s| s)?;
    settle_small(F, value)
}

/// Compute the modified Bessel function of the second kind K_ν(x).
///
/// `K_ν(0)` overflows to +∞; x < 0 is a domain error.
pub fn cyl_bessel_k(nu: f64, x: f64) -> Result<f64> {
    const F: &str = "cyl_bessel_k";
    if nu.is_nan() || x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if nu.is_infinite() {
        return policy::raise(Error::domain(F, "infinite order"));
    }
    if x < 0.0 {
        return policy::raise(Error::domain(F, "requires x >= 0"));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    if x == 0.0 {
        return policy::raise(Error::overflow(F, false));
    }

    let ik = signal(ik_nonnegative(F, nu.abs(), x), ScaledIk::filled)?;
    settle_small(F, ik.k())
}

/// Compute the derivative K'_ν(x) = -(K_ν-1(x) + K_ν+1(x)) / 2.
///
/// `K'_ν(0)` overflows to −∞; x < 0 is a domain error.
pub fn cyl_bessel_k_prime(nu: f64, x: f64) -> Result<f64> {
    const F: &str = "cyl_bessel_k_prime";
    if nu.is_nan() || x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if nu.is_infinite() {
        return policy::raise(Error::domain(F, "infinite order"));
    }
    if x < 0.0 {
        return policy::raise(Error::domain(F, "requires x >= 0"));
    }
    if x.is_infinite() {
        return Ok(-0.0);
    }
    if x == 0.0 {
        return policy::raise(Error::overflow(F, true));
    }

    // K is even in the order
    let raw = || -> Result<f64> {
        let below = ik_nonnegative(F, (nu - 1.0).abs(), x)?.k();
        let above = ik_nonnegative(F, (nu + 1.0).abs(), x)?.k();
        Ok(-0.5 * (below + above))
    };
    let value = signal(raw(), |s| s)?;
    settle_small(F, value)
}

// ============================================================================
// Spherical Bessel Functions
// ============================================================================

/// (j_n(x), y_n(x)) for x > 0, errors unraised.
fn sph_values(function: &'static str, n: u32, x: f64) -> Result<(f64, f64)> {
    let (j, y) = jy_nonnegative(function, f64::from(n) + 0.5, x)?;
    // √(π/2x) split so that it stays finite for subnormal x
    let scale = (0.5 * PI).sqrt() / x.sqrt();
    Ok((scale * j, scale * y))
}

/// Compute the spherical Bessel function j_n(x) = √(π/2x) J_{n+1/2}(x).
pub fn sph_bessel(n: u32, x: f64) -> Result<f64> {
    const F: &str = "sph_bessel";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x < 0.0 {
        return policy::raise(Error::domain(F, "requires x >= 0"));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    if x == 0.0 {
        return Ok(if n == 0 { 1.0 } else { 0.0 });
    }

    let (j, _) = signal(sph_values(F, n, x), |s| (s, s))?;
    settle_small(F, j)
}

/// Compute the spherical Neumann function y_n(x) = √(π/2x) Y_{n+1/2}(x).
pub fn sph_neumann(n: u32, x: f64) -> Result<f64> {
    const F: &str = "sph_neumann";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x < 0.0 {
        return policy::raise(Error::domain(F, "requires x >= 0"));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    if x == 0.0 {
        return policy::raise(Error::overflow(F, true));
    }

    let (_, y) = signal(sph_values(F, n, x), |s| (s, s))?;
    settle(F, y)
}

/// Compute the derivative j'_n(x) = (n/x) j_n(x) - j_n+1(x).
pub fn sph_bessel_prime(n: u32, x: f64) -> Result<f64> {
    const F: &str = "sph_bessel_prime";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x < 0.0 {
        return policy::raise(Error::domain(F, "requires x >= 0"));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    if x == 0.0 {
        return Ok(if n == 1 { 1.0 / 3.0 } else { 0.0 });
    }

    let raw = || -> Result<f64> {
        let (j, _) = sph_values(F, n, x)?;
        let (next, _) = sph_values(F, n + 1, x)?;
        Ok(f64::from(n) * (j / x) - next)
    };
    let value = signal(raw(), |s| s)?;
    settle_small(F, value)
}

/// Compute the derivative y'_n(x) = (n/x) y_n(x) - y_n+1(x).
pub fn sph_neumann_prime(n: u32, x: f64) -> Result<f64> {
    const F: &str = "sph_neumann_prime";
    if x.is_nan() {
        return policy::raise(Error::nan_argument(F));
    }
    if x < 0.0 {
        return policy::raise(Error::domain(F, "requires x >= 0"));
    }
    if x.is_infinite() {
        return Ok(0.0);
    }
    if x == 0.0 {
        return policy::raise(Error::overflow(F, false));
    }

    let raw = || -> Result<f64> {
        let (_, next) = sph_values(F, n + 1, x)?;
        if next.is_infinite() {
            return Ok(-next);
        }
        let (_, y) = sph_values(F, n, x)?;
        Ok(f64::from(n) * (y / x) - next)
    };
    let value = signal(raw(), |s| s)?;
    settle(F, value)
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
    fn test_bessel_j() {
        assert_close(cyl_bessel_j(0.0, 1.0).unwrap(), 0.76519768655796655, 1e-14);
        assert_close(cyl_bessel_j(1.0, 2.5).unwrap(), 0.49709410246427404, 1e-14);
        assert_close(cyl_bessel_j(2.5, 10.0).unwrap(), 0.19665848358181841, 1e-12);
        assert_close(cyl_bessel_j(50.0, 30.0).unwrap(), 2.0581656631564178e-8, 1e-11);
        assert_close(cyl_bessel_j(0.25, 100.0).unwrap(), -0.011070927544649827, 1e-11);
        assert_close(cyl_bessel_j(100.0, 1.0).unwrap(), 8.4318287896267085e-189, 1e-11);
    }

    #[test]
    fn test_bessel_j_reflection() {
        assert_close(cyl_bessel_j(-0.5, 3.0).unwrap(), -0.45604882079463318, 1e-13);
        assert_close(cyl_bessel_j(-2.5, 3.0).unwrap(), 0.3690407300737979, 1e-13);
        assert_close(cyl_bessel_j(3.0, -2.0).unwrap(), -0.12894324947440205, 1e-13);
        assert_eq!(cyl_bessel_j(0.5, -2.0).unwrap_err().kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_bessel_j_boundaries() {
        assert_eq!(cyl_bessel_j(0.0, 0.0).unwrap(), 1.0);
        assert_eq!(cyl_bessel_j(2.0, 0.0).unwrap(), 0.0);
        assert_eq!(cyl_bessel_j(-3.0, 0.0).unwrap(), 0.0);
        assert_eq!(cyl_bessel_j(1.0, f64::INFINITY).unwrap(), 0.0);
        // J_-0.5(x) ~ +√(2/πx) as x -> 0+
        assert_eq!(
            cyl_bessel_j(-0.5, 0.0).unwrap_err(),
            Error::overflow("cyl_bessel_j", false)
        );
        assert_eq!(
            cyl_bessel_j(500.0, 1e-3).unwrap_err(),
            Error::underflow("cyl_bessel_j")
        );
    }

    #[test]
    fn test_neumann() {
        assert_close(cyl_neumann(0.0, 1.0).unwrap(), 0.088256964215676958, 1e-13);
        assert_close(cyl_neumann(1.0, 30.0).unwrap(), 0.084425570661747235, 1e-12);
        assert_close(cyl_neumann(-1.5, 2.0).unwrap(), -0.49129377868716235, 1e-13);
        assert_close(cyl_neumann(2.5, 0.1).unwrap(), -758.20447152837421, 1e-13);
        assert_close(cyl_neumann(20.0, 5.0).unwrap(), -593396529.69143207, 1e-12);

        assert_eq!(
            cyl_neumann(0.0, 0.0).unwrap_err(),
            Error::overflow("cyl_neumann", true)
        );
        assert_eq!(cyl_neumann(-0.5, 0.0).unwrap(), 0.0);
        assert_eq!(cyl_neumann(1.0, -1.0).unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(cyl_neumann(500.0, 1e-3).unwrap_err().kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_modified_bessel_i() {
        assert_close(cyl_bessel_i(0.0, 1.0).unwrap(), 1.2660658777520083, 1e-14);
        assert_close(cyl_bessel_i(1.5, 3.0).unwrap(), 3.0994834567256358, 1e-13);
        assert_close(cyl_bessel_i(-0.5, 2.0).unwrap(), 2.1225916201776372, 1e-13);
        assert_close(cyl_bessel_i(2.0, -1.0).unwrap(), 0.13574766976703828, 1e-13);
        assert_close(cyl_bessel_i(0.5, 50.0).unwrap(), 2.92515685299129e20, 1e-12);
        assert_close(cyl_bessel_i(10.0, 0.01).unwrap(), 2.6911505717111426e-30, 1e-13);

        assert_eq!(cyl_bessel_i(0.0, 0.0).unwrap(), 1.0);
        assert_eq!(cyl_bessel_i(1.0, 0.0).unwrap(), 0.0);
        assert_eq!(
            cyl_bessel_i(0.0, 1000.0).unwrap_err(),
            Error::overflow("cyl_bessel_i", false)
        );
    }

    #[test]
    fn test_modified_bessel_k() {
        assert_close(cyl_bessel_k(0.0, 1.0).unwrap(), 0.42102443824070833, 1e-13);
        assert_close(cyl_bessel_k(2.5, 0.5).unwrap(), 20.425904466498485, 1e-13);
        assert_close(cyl_bessel_k(-1.5, 4.0).unwrap(), 0.014347030720760067, 1e-13);
        assert_close(cyl_bessel_k(1.0, 100.0).unwrap(), 4.6798537356369093e-45, 1e-13);
        assert_close(cyl_bessel_k(50.0, 10.0).unwrap(), 2.0613737753892575e27, 1e-12);

        assert_eq!(
            cyl_bessel_k(0.0, 0.0).unwrap_err(),
            Error::overflow("cyl_bessel_k", false)
        );
        assert_eq!(
            cyl_bessel_k(0.0, 800.0).unwrap_err(),
            Error::underflow("cyl_bessel_k")
        );
        assert_eq!(cyl_bessel_k(0.0, -1.0).unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(cyl_bessel_k(0.0, f64::INFINITY).unwrap(), 0.0);
    }

    #[test]
    fn test_spherical() {
        assert_close(sph_bessel(0, 1.0).unwrap(), 0.84147098480789651, 1e-14);
        assert_close(sph_bessel(1, 2.0).unwrap(), 0.43539777497999162, 1e-14);
        assert_close(sph_bessel(3, 0.5).unwrap(), 0.0011740354438675573, 1e-13);
        assert_close(sph_bessel(10, 20.0).unwrap(), 0.039686698644626371, 1e-12);
        assert_close(sph_neumann(0, 1.0).unwrap(), -0.54030230586813972, 1e-14);
        assert_close(sph_neumann(1, 2.0).unwrap(), -0.35061200427605525, 1e-14);
        assert_close(sph_neumann(3, 0.5).unwrap(), -246.13004692361646, 1e-13);
        assert_close(sph_neumann(10, 20.0).unwrap(), -0.036843410496289962, 1e-12);

        assert_eq!(sph_bessel(0, 0.0).unwrap(), 1.0);
        assert_eq!(sph_bessel(2, 0.0).unwrap(), 0.0);
        assert_eq!(
            sph_neumann(1, 0.0).unwrap_err(),
            Error::overflow("sph_neumann", true)
        );
        assert_eq!(sph_bessel(1, -1.0).unwrap_err().kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_small_argument_fractional_order() {
        let cases = [
            (0.25, 1e-3, 0.16497621310670325298, -7.5527355812032834339),
            (0.5, 1e-50, 7.9788456080286535892e-26, -7.9788456080286535284e24),
            (2.5, 1e-50, 5.3192304053524358071e-127, -2.3936536824085960221e125),
            (1.0 / 3.0, 1e-300, 8.8882277331237472775e-101, -1.0743757779659907819e100),
        ];
        for (nu, x, j, y) in cases {
            assert_close(cyl_bessel_j(nu, x).unwrap(), j, 1e-12);
            assert_close(cyl_neumann(nu, x).unwrap(), y, 1e-12);
        }
        assert_close(cyl_bessel_j(-2.5, 1e-50).unwrap(), 2.3936536824085960221e125, 1e-12);
        assert_close(cyl_neumann(0.5, 1e-300).unwrap(), -7.9788456080286534588e149, 1e-12);
    }

    #[test]
    fn test_small_argument_integer_order() {
        assert_close(cyl_bessel_j(1.0, 1e-20).unwrap(), 4.9999999999999997258e-21, 1e-14);
        assert_close(cyl_neumann(1.0, 1e-20).unwrap(), -63661977236758137799.0, 1e-13);
        assert_close(cyl_bessel_j(3.0, 1e-5).unwrap(), 2.0833333333203130113e-17, 1e-13);
        assert_close(cyl_neumann(3.0, 1e-5).unwrap(), -5092958179004311.472, 1e-13);
        assert_close(cyl_bessel_j(10.0, 0.5).unwrap(), 2.6131773608228030862e-13, 1e-13);
        assert_close(cyl_neumann(10.0, 0.5).unwrap(), -121963623349.56963053, 1e-12);
        assert_close(cyl_neumann(0.0, 1e-8).unwrap(), -11.800773877179530755, 1e-13);
        assert_close(cyl_neumann(1.0, 1e-9).unwrap(), -636619772.36758131022, 1e-13);
        assert_close(cyl_neumann(2.0, 1e-100).unwrap(), -1.2732395447351626352e200, 1e-13);
    }

    #[test]
    fn test_subnormal_argument() {
        let x = 1e-310;
        assert_eq!(cyl_bessel_j(0.0, x).unwrap(), 1.0);
        assert_close(cyl_neumann(0.0, x).unwrap(), -454.49387560035388851, 1e-13);
        assert_close(cyl_bessel_k(0.0, x).unwrap(), 713.91731034381257755, 1e-13);
        assert_close(cyl_bessel_i(0.5, x).unwrap(), 7.9788456080286413708e-156, 1e-12);
        assert_close(sph_bessel(0, x).unwrap(), 1.0, 1e-12);
        assert_eq!(
            sph_neumann(0, x).unwrap_err(),
            Error::overflow("sph_neumann", true)
        );
        assert_close(cyl_bessel_k(0.5, 1e-300).unwrap(), 1.2533141373155002355e150, 1e-12);
        assert_close(cyl_neumann(0.75, 1e-306).unwrap(), -2.0744664695219179614e229, 1e-11);
        assert_close(cyl_bessel_k(0.25, 1e-307).unwrap(), 1.2122957378749282144e77, 1e-11);
        assert_eq!(
            cyl_neumann(1.0, 1e-310).unwrap_err(),
            Error::overflow("cyl_neumann", true)
        );
    }

    #[test]
    fn test_spherical_small_argument() {
        assert_eq!(sph_bessel(0, 1e-50).unwrap(), 1.0);
        assert_close(sph_bessel(1, 1e-30).unwrap(), 3.3333333333333336111e-31, 1e-13);
        assert_close(sph_bessel(3, 1e-10).unwrap(), 9.5238095238095248504e-33, 1e-13);
    }

    #[test]
    fn test_cylindrical_derivatives() {
        assert_close(cyl_bessel_j_prime(0.0, 1.0).unwrap(), -0.44005058574493351596, 1e-14);
        assert_close(cyl_bessel_j_prime(2.5, 0.5).unwrap(), 0.045519660528752680139, 1e-13);
        assert_close(cyl_bessel_j_prime(-0.5, 3.0).unwrap(), 0.010999953921729751694, 1e-12);
        assert_close(cyl_bessel_j_prime(3.0, -2.0).unwrap(), 0.1594191544040346425, 1e-13);
        assert_close(cyl_bessel_j_prime(0.5, 1e-20).unwrap(), 3989422804.0143268888, 1e-13);
        assert_eq!(cyl_bessel_j_prime(1.0, 0.0).unwrap(), 0.5);
        assert_eq!(cyl_bessel_j_prime(-1.0, 0.0).unwrap(), -0.5);
        assert_eq!(cyl_bessel_j_prime(2.0, 0.0).unwrap(), 0.0);
        assert_eq!(
            cyl_bessel_j_prime(0.5, 0.0).unwrap_err(),
            Error::overflow("cyl_bessel_j_prime", false)
        );

        assert_close(cyl_neumann_prime(0.0, 1.0).unwrap(), 0.78121282130028871655, 1e-13);
        assert_close(cyl_neumann_prime(2.5, 0.5).unwrap(), 68.17127156100177329, 1e-13);
        assert_close(cyl_neumann_prime(1.0, 30.0).unwrap(), -0.12010991737538893308, 1e-12);
        assert_close(cyl_neumann_prime(-1.5, 2.0).unwrap(), -0.14454580254645599291, 1e-13);
        assert_close(cyl_neumann_prime(3.0, 1e-5).unwrap(), 1.5278874536885609212e21, 1e-13);
        assert_eq!(
            cyl_neumann_prime(0.0, 0.0).unwrap_err(),
            Error::overflow("cyl_neumann_prime", false)
        );
        assert_eq!(
            cyl_neumann_prime(500.0, 1e-3).unwrap_err(),
            Error::overflow("cyl_neumann_prime", false)
        );
        assert_eq!(cyl_neumann_prime(1.0, -1.0).unwrap_err().kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_modified_derivatives() {
        assert_close(cyl_bessel_i_prime(0.0, 1.0).unwrap(), 0.56515910399248502721, 1e-14);
        assert_close(cyl_bessel_i_prime(1.5, 3.0).unwrap(), 3.0650811750447830428, 1e-13);
        assert_close(cyl_bessel_i_prime(-0.5, 2.0).unwrap(), 1.5155889580446457382, 1e-13);
        assert_close(cyl_bessel_i_prime(2.0, -1.0).unwrap(), -0.29366376445840846484, 1e-13);
        assert_close(cyl_bessel_i_prime(0.5, 50.0).unwrap(), 2.8959052844613771415e20, 1e-12);
        assert_eq!(cyl_bessel_i_prime(-1.0, 0.0).unwrap(), 0.5);
        assert_eq!(cyl_bessel_i_prime(0.0, f64::INFINITY).unwrap(), f64::INFINITY);

        assert_close(cyl_bessel_k_prime(0.0, 1.0).unwrap(), -0.60190723019723457474, 1e-13);
        assert_close(cyl_bessel_k_prime(2.5, 0.5).unwrap(), -105.35466514299218339, 1e-13);
        assert_close(cyl_bessel_k_prime(-1.5, 4.0).unwrap(), -0.016857761096893078481, 1e-13);
        assert_close(cyl_bessel_k_prime(1.0, 100.0).unwrap(), -4.7034267665322711118e-45, 1e-13);
        assert_eq!(
            cyl_bessel_k_prime(1.0, 0.0).unwrap_err(),
            Error::overflow("cyl_bessel_k_prime", true)
        );
        assert!(cyl_bessel_k_prime(1.0, f64::INFINITY).unwrap().is_sign_negative());
    }

    #[test]
    fn test_spherical_derivatives() {
        assert_close(sph_bessel_prime(0, 1.0).unwrap(), -0.30116867893975678925, 1e-14);
        assert_close(sph_bessel_prime(1, 2.0).unwrap(), 0.01925093843284923035, 1e-12);
        assert_close(sph_bessel_prime(3, 0.5).unwrap(), 0.0069788230570529541452, 1e-13);
        assert_close(sph_bessel_prime(1, 1e-8).unwrap(), 1.0 / 3.0, 1e-14);
        assert_eq!(sph_bessel_prime(1, 0.0).unwrap(), 1.0 / 3.0);
        assert_eq!(sph_bessel_prime(2, 0.0).unwrap(), 0.0);

        assert_close(sph_neumann_prime(0, 1.0).unwrap(), 1.3817732906760362241, 1e-14);
        assert_close(sph_neumann_prime(1, 2.0).unwrap(), 0.55868542254962644445, 1e-13);
        assert_close(sph_neumann_prime(3, 0.5).unwrap(), 1943.9804525640930499, 1e-13);
        assert_eq!(
            sph_neumann_prime(0, 0.0).unwrap_err(),
            Error::overflow("sph_neumann_prime", false)
        );
        assert_eq!(
            sph_neumann_prime(200, 1e-3).unwrap_err(),
            Error::overflow("sph_neumann_prime", false)
        );
    }

    #[test]
    fn test_temme_gammas_at_zero() {
        let g = temme_gammas(0.0);
        assert_close(g.gam1, -crate::algorithm::special::EULER_MASCHERONI, 1e-15);
        assert_eq!(g.gam2, 1.0);
        assert_eq!(g.gampl, 1.0);
        assert_eq!(g.gammi, 1.0);
    }
}
