//! Hankel functions H⁽¹⁾ = J + iY, H⁽²⁾ = J − iY and their spherical forms
//!
//! The values are assembled from [`bessel_jy`]; a component that diverges makes the whole
//! result an overflow whose sign follows the divergent component.

use std::f64::consts::PI;

use num_complex::Complex;

use super::bessel::bessel_jy;
use super::elementary::{cos_pi_raw, sin_pi_raw};
use crate::algorithm::special::signal;
use crate::error::{Error, Result};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    First,
    Second,
}

impl Kind {
    fn imaginary_sign(self) -> f64 {
        match self {
            Kind::First => 1.0,
            Kind::Second => -1.0,
        }
    }
}

fn spread(sentinel: f64) -> Complex<f64> {
    Complex::new(sentinel, sentinel)
}

/// √(π/2x) H_{order}(x) with `spherical`, H_{order}(x) otherwise.
fn hankel_raw(
    function: &'static str,
    order: f64,
    x: f64,
    kind: Kind,
    spherical: bool,
) -> Result<Complex<f64>> {
    if order.is_nan() || x.is_nan() {
        return Err(Error::nan_argument(function));
    }
    if order.is_infinite() {
        return Err(Error::domain(function, "infinite order"));
    }
    if x < 0.0 {
        return Err(Error::domain(function, "requires x >= 0"));
    }
    if x.is_infinite() {
        return Ok(Complex::new(0.0, 0.0));
    }
    let im_sign = kind.imaginary_sign();

    if x == 0.0 {
        // Y diverges unless the order is a negative half-integer, where J does instead
        let c = if order < 0.0 { cos_pi_raw(-order) } else { 1.0 };
        if c != 0.0 {
            return Err(Error::overflow(function, c * im_sign > 0.0));
        }
        return Err(Error::overflow(function, sin_pi_raw(-order) < 0.0));
    }

    let (j, y) = bessel_jy(function, order, x)?;
    let scale = if spherical { (PI / (2.0 * x)).sqrt() } else { 1.0 };
    let value = Complex::new(scale * j, im_sign * scale * y);
    if value.im.is_infinite() {
        return Err(Error::overflow(function, value.im < 0.0));
    }
    if value.re.is_infinite() {
        return Err(Error::overflow(function, value.re < 0.0));
    }
    if value.re.is_nan() || value.im.is_nan() {
        return Err(Error::evaluation(function, "method produced NaN"));
    }
    Ok(value)
}

/// Compute the Hankel function of the first kind H⁽¹⁾_ν(x) = J_ν(x) + iY_ν(x).
pub fn cyl_hankel_1(nu: f64, x: f64) -> Result<Complex<f64>> {
    signal(hankel_raw("cyl_hankel_1", nu, x, Kind::First, false), spread)
}

/// Compute the Hankel function of the second kind H⁽²⁾_ν(x) = J_ν(x) − iY_ν(x).
pub fn cyl_hankel_2(nu: f64, x: f64) -> Result<Complex<f64>> {
    signal(hankel_raw("cyl_hankel_2", nu, x, Kind::Second, false), spread)
}

/// Compute the spherical Hankel function h⁽¹⁾_ν(x) = √(π/2x) H⁽¹⁾_{ν+1/2}(x).
pub fn sph_hankel_1(nu: f64, x: f64) -> Result<Complex<f64>> {
    signal(hankel_raw("sph_hankel_1", nu + 0.5, x, Kind::First, true), spread)
}

/// Compute the spherical Hankel function h⁽²⁾_ν(x) = √(π/2x) H⁽²⁾_{ν+1/2}(x).
pub fn sph_hankel_2(nu: f64, x: f64) -> Result<Complex<f64>> {
    signal(hankel_raw("sph_hankel_2", nu + 0.5, x, Kind::Second, true), spread)
}
