//! Totality and idempotence over finite, infinite and NaN arguments
//!
//! Every symbol must return a number for any input, and the same number (bit for bit)
//! for the same input. The checked surface is called as well: a panic there fails the
//! test instead of being absorbed by the boundary.

mod common;

use std::ptr;

use common::AWKWARD;
use proptest::prelude::*;
use sfabi::ffi::*;
use sfabi::math;

type Unary = (&'static str, extern "C" fn(f64) -> f64, fn(f64) -> sfabi::Result<f64>);
type Binary = (
    &'static str,
    extern "C" fn(f64, f64) -> f64,
    fn(f64, f64) -> sfabi::Result<f64>,
);

const UNARY: [Unary; 19] = [
    ("tgamma", sfabi_tgamma, math::tgamma),
    ("lgamma", sfabi_lgamma, math::lgamma),
    ("digamma", sfabi_digamma, math::digamma),
    ("trigamma", sfabi_trigamma, math::trigamma),
    ("erf", sfabi_erf, math::erf),
    ("erfc", sfabi_erfc, math::erfc),
    ("erf_inv", sfabi_erf_inv, math::erf_inv),
    ("erfc_inv", sfabi_erfc_inv, math::erfc_inv),
    ("ellint_1", sfabi_ellint_1, math::ellint_1),
    ("ellint_2", sfabi_ellint_2, math::ellint_2),
    ("airy_ai", sfabi_airy_ai, math::airy_ai),
    ("airy_bi", sfabi_airy_bi, math::airy_bi),
    ("airy_ai_prime", sfabi_airy_ai_prime, math::airy_ai_prime),
    ("airy_bi_prime", sfabi_airy_bi_prime, math::airy_bi_prime),
    ("expm1", sfabi_expm1, math::expm1),
    ("log1p", sfabi_log1p, math::log1p),
    ("sin_pi", sfabi_sin_pi, math::sin_pi),
    ("cos_pi", sfabi_cos_pi, math::cos_pi),
    ("sinc_pi", sfabi_sinc_pi, math::sinc_pi),
];

const BINARY: [Binary; 16] = [
    ("beta", sfabi_beta, math::beta),
    ("gamma_p", sfabi_gamma_p, math::gamma_p),
    ("gamma_q", sfabi_gamma_q, math::gamma_q),
    ("gamma_p_inv", sfabi_gamma_p_inv, math::gamma_p_inv),
    ("gamma_q_inv", sfabi_gamma_q_inv, math::gamma_q_inv),
    ("cyl_bessel_j", sfabi_cyl_bessel_j, math::cyl_bessel_j),
    ("cyl_neumann", sfabi_cyl_neumann, math::cyl_neumann),
    ("cyl_bessel_i", sfabi_cyl_bessel_i, math::cyl_bessel_i),
    ("cyl_bessel_k", sfabi_cyl_bessel_k, math::cyl_bessel_k),
    ("cyl_bessel_j_prime", sfabi_cyl_bessel_j_prime, math::cyl_bessel_j_prime),
    ("cyl_neumann_prime", sfabi_cyl_neumann_prime, math::cyl_neumann_prime),
    ("cyl_bessel_i_prime", sfabi_cyl_bessel_i_prime, math::cyl_bessel_i_prime),
    ("cyl_bessel_k_prime", sfabi_cyl_bessel_k_prime, math::cyl_bessel_k_prime),
    ("ellint_1_inc", sfabi_ellint_1_inc, math::ellint_1_inc),
    ("ellint_2_inc", sfabi_ellint_2_inc, math::ellint_2_inc),
    ("powm1", sfabi_powm1, math::powm1),
];

fn same(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

fn check_unary(x: f64) {
    for (name, boundary, checked) in UNARY {
        let _ = checked(x);
        let first = boundary(x);
        assert!(same(first, boundary(x)), "{}({}) not idempotent", name, x);
    }
}

fn check_binary(a: f64, b: f64) {
    for (name, boundary, checked) in BINARY {
        let _ = checked(a, b);
        let first = boundary(a, b);
        assert!(same(first, boundary(a, b)), "{}({}, {}) not idempotent", name, a, b);
    }
}

fn hankel(nu: f64, x: f64) -> [f64; 8] {
    let mut out = [0.0; 8];
    let [a, b, c, d, e, f, g, h] = &mut out;
    unsafe {
        sfabi_cyl_hankel_1(nu, x, a, b);
        sfabi_cyl_hankel_2(nu, x, c, d);
        sfabi_sph_hankel_1(nu, x, e, f);
        sfabi_sph_hankel_2(nu, x, g, h);
    }
    out
}

/// Any f64 including the special classes, or one of the awkward values.
fn argument() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => any::<f64>(),
        2 => -50.0..50.0f64,
        1 => prop::sample::select(AWKWARD.to_vec()),
    ]
}

/// Bessel orders and Legendre degrees stay moderate so each case runs quickly.
fn order() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => -60.0..60.0f64,
        1 => prop::sample::select(vec![0.0, -0.5, 0.5, -1.0, f64::NAN, f64::INFINITY]),
    ]
}

#[test]
fn test_awkward_grid() {
    for &a in &AWKWARD {
        check_unary(a);
        for &b in &AWKWARD {
            check_binary(a, b);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_unary_total(x in argument()) {
        check_unary(x);
    }

    #[test]
    fn test_binary_total(a in argument(), b in argument()) {
        check_binary(a, b);
    }

    #[test]
    fn test_bessel_total(nu in order(), x in argument(), n in 0u32..60) {
        check_binary(nu, x);
        let _ = (math::sph_bessel(n, x), math::sph_neumann(n, x));
        prop_assert!(same(sfabi_sph_bessel(n, x), sfabi_sph_bessel(n, x)));
        prop_assert!(same(sfabi_sph_neumann(n, x), sfabi_sph_neumann(n, x)));
        let _ = (math::sph_bessel_prime(n, x), math::sph_neumann_prime(n, x));
        prop_assert!(same(sfabi_sph_bessel_prime(n, x), sfabi_sph_bessel_prime(n, x)));
        prop_assert!(same(sfabi_sph_neumann_prime(n, x), sfabi_sph_neumann_prime(n, x)));

        let _ = math::cyl_hankel_1(nu, x);
        let first = hankel(nu, x);
        let second = hankel(nu, x);
        prop_assert!(first.iter().zip(&second).all(|(a, b)| same(*a, *b)));
    }

    #[test]
    fn test_polygamma_total(n in -6i32..60, x in argument()) {
        let _ = math::polygamma(n, x);
        prop_assert!(same(sfabi_polygamma(n, x), sfabi_polygamma(n, x)));
    }

    #[test]
    fn test_polygamma_extreme_orders(n in any::<i32>(), x in prop::sample::select(AWKWARD.to_vec())) {
        prop_assert!(same(sfabi_polygamma(n, x), sfabi_polygamma(n, x)));
    }

    #[test]
    fn test_legendre_total(l in -80i32..80, m in -90i32..90, x in argument(), y in argument()) {
        let _ = (math::legendre_p(l, x), math::legendre_p_assoc(l, m, x));
        let _ = (math::legendre_p_prime(l, x), math::legendre_q(l.unsigned_abs(), x));
        let _ = math::spherical_harmonic(l.unsigned_abs(), m, x, y);

        prop_assert!(same(sfabi_legendre_p(l, x), sfabi_legendre_p(l, x)));
        prop_assert!(same(sfabi_legendre_p_assoc(l, m, x), sfabi_legendre_p_assoc(l, m, x)));
        prop_assert!(same(sfabi_legendre_p_prime(l, x), sfabi_legendre_p_prime(l, x)));
        let q = l.unsigned_abs();
        prop_assert!(same(sfabi_legendre_q(q, x), sfabi_legendre_q(q, x)));

        let (mut re, mut im) = (0.0, 0.0);
        unsafe { sfabi_spherical_harmonic(q, m, x, y, &mut re, &mut im) };
        prop_assert!(same(re, sfabi_spherical_harmonic_r(q, m, x, y)));
        prop_assert!(same(im, sfabi_spherical_harmonic_i(q, m, x, y)));

        let mut zeros = vec![0.0; 41];
        unsafe { sfabi_legendre_p_zeros(l, zeros.as_mut_ptr()) };
        unsafe { sfabi_legendre_p_zeros(l, ptr::null_mut()) };
    }

    #[test]
    fn test_hypergeometric_total(
        a in argument(),
        b in argument(),
        c in argument(),
        x in prop_oneof![argument(), -1.0..1.0f64],
    ) {
        let _ = (math::hypergeometric_1f1(a, b, x), math::hypergeometric_2f1(a, b, c, x));
        prop_assert!(same(sfabi_hypergeometric_1f1(a, b, x), sfabi_hypergeometric_1f1(a, b, x)));
        prop_assert!(same(
            sfabi_hypergeometric_2f1(a, b, c, x),
            sfabi_hypergeometric_2f1(a, b, c, x)
        ));
    }

    #[test]
    fn test_factorials_total(n in any::<u32>(), k in any::<u32>()) {
        let _ = (math::factorial(n), math::binomial_coefficient(n, k));
        prop_assert!(same(sfabi_factorial(n), sfabi_factorial(n)));
        prop_assert!(same(sfabi_binomial_coefficient(n, k), sfabi_binomial_coefficient(n, k)));
        let _ = math::double_factorial(n);
        prop_assert!(same(sfabi_double_factorial(n), sfabi_double_factorial(n)));
    }

    #[test]
    fn test_rising_falling_total(x in argument(), n in any::<i32>()) {
        let _ = (math::rising_factorial(x, n), math::falling_factorial(x, n.unsigned_abs()));
        prop_assert!(same(sfabi_rising_factorial(x, n), sfabi_rising_factorial(x, n)));
        let m = n.unsigned_abs();
        prop_assert!(same(sfabi_falling_factorial(x, m), sfabi_falling_factorial(x, m)));
    }
}
