//! Legendre functions and spherical harmonics
//!
//! - Legendre polynomials P_l(x), their derivative and zeros
//! - Legendre functions of the second kind Q_l(x)
//! - Associated Legendre functions P_l^m(x) (Condon-Shortley phase included)
//! - Spherical harmonics Y_n^m(θ, φ)
//!
//! # References
//! - DLMF 14: Legendre and Related Functions
//! - DLMF 18.9: Recurrence Relations
//! - Abramowitz & Stegun 8.6, 8.8, 22.7

use std::f64::consts::PI;

use num_complex::Complex;

use crate::algorithm::special::{settle, signal};
use crate::error::{Error, Result};
use crate::policy;

/// Highest degree accepted by the O(l) recurrences
const MAX_DEGREE: i64 = 1 << 20;

/// Highest degree accepted by the O(l²) root finder
const MAX_ZEROS_DEGREE: i64 = 1 << 13;

/// P_{-l-1} = P_l
fn reflect_degree(l: i64) -> i64 {
    if l < 0 { -l - 1 } else { l }
}

fn check_degree(function: &'static str, l: i64, cap: i64) -> Result<()> {
    if l > cap {
        return Err(Error::evaluation(function, "degree too large"));
    }
    Ok(())
}

fn check_unit_interval(function: &'static str, x: f64) -> Result<()> {
    if x.is_nan() {
        return Err(Error::nan_argument(function));
    }
    if x.abs() > 1.0 {
        return Err(Error::domain(function, "requires |x| <= 1"));
    }
    Ok(())
}

/// (P_l(x), P_{l-1}(x)) by the three-term recurrence
/// (k+1)P_{k+1}(x) = (2k+1)xP_k(x) - kP_{k-1}(x).
fn legendre_pair(l: i64, x: f64) -> (f64, f64) {
    if l == 0 {
        return (1.0, 0.0);
    }
    let mut p_prev = 1.0;
    let mut p_curr = x;
    for k in 1..l {
        let k_f = k as f64;
        let p_next = ((2.0 * k_f + 1.0) * x * p_curr - k_f * p_prev) / (k_f + 1.0);
        p_prev = p_curr;
        p_curr = p_next;
    }
    (p_curr, p_prev)
}

// ============================================================================
// Legendre Polynomials
// ============================================================================

/// Legendre polynomial P_l(x) for |x| <= 1.
///
/// Negative degrees follow P_{-l-1}(x) = P_l(x).
pub fn legendre_p(l: i32, x: f64) -> Result<f64> {
    const F: &str = "legendre_p";
    let raw = || -> Result<f64> {
        check_unit_interval(F, x)?;
        let l = reflect_degree(i64::from(l));
        check_degree(F, l, MAX_DEGREE)?;
        Ok(legendre_pair(l, x).0)
    };
    raw().or_else(policy::raise)
}

/// Derivative P'_l(x) for |x| <= 1, including the endpoints.
///
/// Uses P'_l = Σ (2k+1) P_k over k = l-1, l-3, ..., which stays finite at x = ±1.
pub fn legendre_p_prime(l: i32, x: f64) -> Result<f64> {
    const F: &str = "legendre_p_prime";
    let raw = || -> Result<f64> {
        check_unit_interval(F, x)?;
        let l = reflect_degree(i64::from(l));
        check_degree(F, l, MAX_DEGREE)?;

        let mut sum = 0.0;
        let mut p_prev = 0.0;
        let mut p_curr = 1.0;
        for k in 0..l {
            if (l - 1 - k) % 2 == 0 {
                sum += (2 * k + 1) as f64 * p_curr;
            }
            let k_f = k as f64;
            let p_next = ((2.0 * k_f + 1.0) * x * p_curr - k_f * p_prev) / (k_f + 1.0);
            p_prev = p_curr;
            p_curr = p_next;
        }
        Ok(sum)
    };
    match raw() {
        Ok(v) => settle(F, v),
        Err(err) => policy::raise(err),
    }
}

/// Legendre function of the second kind Q_l(x) for |x| < 1.
///
/// Q_l(±1) diverges; the overflow carries the sign of the limit.
pub fn legendre_q(l: u32, x: f64) -> Result<f64> {
    const F: &str = "legendre_q";
    let raw = || -> Result<f64> {
        check_unit_interval(F, x)?;
        let l = i64::from(l);
        check_degree(F, l, MAX_DEGREE)?;
        if x == 1.0 {
            return Err(Error::overflow(F, false));
        }
        if x == -1.0 {
            // Q_l(x) ~ P_l(x) atanh(x) near the endpoints
            return Err(Error::overflow(F, l % 2 == 0));
        }

        let q0 = x.atanh();
        if l == 0 {
            return Ok(q0);
        }
        let mut q_prev = q0;
        let mut q_curr = x * q0 - 1.0;
        for k in 1..l {
            let k_f = k as f64;
            let q_next = ((2.0 * k_f + 1.0) * x * q_curr - k_f * q_prev) / (k_f + 1.0);
            q_prev = q_curr;
            q_curr = q_next;
        }
        Ok(q_curr)
    };
    raw().or_else(policy::raise)
}

/// Non-negative zeros of P_l in ascending order; there are ceil(l/2) of them.
///
/// Zero is included for odd l. Negative degrees follow P_{-l-1} = P_l.
pub fn legendre_p_zeros(l: i32) -> Result<Vec<f64>> {
    const F: &str = "legendre_p_zeros";
    let raw = || -> Result<Vec<f64>> {
        let l = reflect_degree(i64::from(l));
        check_degree(F, l, MAX_ZEROS_DEGREE)?;

        let count = ((l + 1) / 2) as usize;
        let mut zeros = Vec::with_capacity(count);
        if l % 2 == 1 {
            zeros.push(0.0);
        }
        let l_f = l as f64;
        // The positive roots, largest first
        let positive = l / 2;
        let mut found = Vec::with_capacity(positive as usize);
        for i in 1..=positive {
            let mut z = (PI * (i as f64 - 0.25) / (l_f + 0.5)).cos();
            for _ in 0..100 {
                let (p, p_prev) = legendre_pair(l, z);
                let dp = l_f * (z * p - p_prev) / (z * z - 1.0);
                let dz = p / dp;
                z -= dz;
                if dz.abs() <= 1e-16 * z.abs() {
                    break;
                }
            }
            found.push(z);
        }
        zeros.extend(found.into_iter().rev());
        Ok(zeros)
    };
    signal(raw(), |s| vec![s])
}

// ============================================================================
// Associated Legendre Functions
// ============================================================================

/// P_l^m(x) for 0 <= m <= l, starting from P_m^m = (-1)^m (2m-1)!! (1-x²)^(m/2).
fn legendre_p_assoc_positive(l: i64, m: i64, x: f64) -> f64 {
    let sin_theta = ((1.0 - x) * (1.0 + x)).sqrt();
    let mut pmm = 1.0;
    let mut fact = 1.0;
    for _ in 0..m {
        pmm *= -fact * sin_theta;
        fact += 2.0;
    }
    if l == m {
        return pmm;
    }

    let mut p_prev = pmm;
    let mut p_curr = x * (2 * m + 1) as f64 * pmm;
    let m_f = m as f64;
    for k in (m + 1)..l {
        let k_f = k as f64;
        let p_next =
            ((2.0 * k_f + 1.0) * x * p_curr - (k_f + m_f) * p_prev) / (k_f - m_f + 1.0);
        p_prev = p_curr;
        p_curr = p_next;
    }
    p_curr
}

/// Associated Legendre function P_l^m(x) for |x| <= 1, with the Condon-Shortley phase.
///
/// Negative orders use P_l^{-m} = (-1)^m (l-m)!/(l+m)! P_l^m, negative degrees
/// P_{-l-1}^m = P_l^m. |m| > l gives 0.
pub fn legendre_p_assoc(l: i32, m: i32, x: f64) -> Result<f64> {
    const F: &str = "legendre_p_assoc";
    let raw = || -> Result<f64> {
        check_unit_interval(F, x)?;
        let l = reflect_degree(i64::from(l));
        let m = i64::from(m);
        check_degree(F, l, MAX_DEGREE)?;
        if m.abs() > l {
            return Ok(0.0);
        }
        if m >= 0 {
            return Ok(legendre_p_assoc_positive(l, m, x));
        }

        let m = -m;
        let mut ratio = 1.0;
        for k in (l - m + 1)..=(l + m) {
            ratio /= k as f64;
        }
        let sign = if m % 2 == 1 { -1.0 } else { 1.0 };
        Ok(sign * ratio * legendre_p_assoc_positive(l, m, x))
    };
    match raw() {
        Ok(v) => settle(F, v),
        Err(err) => policy::raise(err),
    }
}

// ============================================================================
// Spherical Harmonics
// ============================================================================

/// √((2n+1)/4π (n-m)!/(n+m)!) P_n^m(cos θ) for 0 <= m <= n, with |sin θ| in place of
/// sin θ.
///
/// Runs the recurrence on the normalised functions so that the factorial ratio never
/// has to be formed.
fn spherical_harmonic_prefix(n: i64, m: i64, theta: f64) -> f64 {
    let x = theta.cos();
    let sin2 = theta.sin().powi(2);

    let mut pmm = 1.0;
    let mut fact = 1.0;
    for _ in 0..m {
        pmm *= sin2 * fact / (fact + 1.0);
        fact += 2.0;
    }
    pmm = ((2 * m + 1) as f64 * pmm / (4.0 * PI)).sqrt();
    if m % 2 == 1 {
        pmm = -pmm;
    }
    if n == m {
        return pmm;
    }

    let mut old_fact = ((2 * m + 3) as f64).sqrt();
    let mut pmmp1 = x * old_fact * pmm;
    let m2 = (m * m) as f64;
    for ll in (m + 2)..=n {
        let ll_f = ll as f64;
        let fact = ((4.0 * ll_f * ll_f - 1.0) / (ll_f * ll_f - m2)).sqrt();
        let pll = (x * pmmp1 - pmm / old_fact) * fact;
        old_fact = fact;
        pmm = pmmp1;
        pmmp1 = pll;
    }
    pmmp1
}

/// Spherical harmonic Y_n^m(θ, φ) = N P_n^m(cos θ) e^{imφ}, orthonormal over the sphere.
///
/// Negative orders follow Y_n^{-m} = (-1)^m conj(Y_n^m). For odd m, a polar angle outside
/// [0, π] (mod 2π) flips the sign, matching sin θ rather than |sin θ|.
pub fn spherical_harmonic(n: u32, m: i32, theta: f64, phi: f64) -> Result<Complex<f64>> {
    const F: &str = "spherical_harmonic";
    let raw = || -> Result<Complex<f64>> {
        if theta.is_nan() || phi.is_nan() {
            return Err(Error::nan_argument(F));
        }
        if theta.is_infinite() || phi.is_infinite() {
            return Err(Error::domain(F, "infinite angle"));
        }
        let n = i64::from(n);
        check_degree(F, n, MAX_DEGREE)?;
        let m = i64::from(m);
        let abs_m = m.abs();
        if abs_m > n {
            return Ok(Complex::new(0.0, 0.0));
        }

        let mut re_negate = m < 0 && abs_m % 2 == 1;
        let mut im_negate = m < 0 && abs_m % 2 == 0;
        if abs_m % 2 == 1 && theta.rem_euclid(2.0 * PI) > PI {
            re_negate = !re_negate;
            im_negate = !im_negate;
        }

        let prefix = spherical_harmonic_prefix(n, abs_m, theta);
        let (s, c) = (abs_m as f64 * phi).sin_cos();
        let re = if re_negate { -prefix * c } else { prefix * c };
        let im = if im_negate { -prefix * s } else { prefix * s };
        Ok(Complex::new(re, im))
    };
    signal(raw(), |s| Complex::new(s, s))
}

/// Real part of [`spherical_harmonic`].
pub fn spherical_harmonic_r(n: u32, m: i32, theta: f64, phi: f64) -> Result<f64> {
    spherical_harmonic(n, m, theta, phi).map(|y| y.re)
}

/// Imaginary part of [`spherical_harmonic`].
pub fn spherical_harmonic_i(n: u32, m: i32, theta: f64, phi: f64) -> Result<f64> {
    spherical_harmonic(n, m, theta, phi).map(|y| y.im)
}
