//! Analytic limits for the polygamma family
//!
//! Digamma, trigamma and polygamma of any integer order share [`polygamma`]. It answers
//! the limiting and singular arguments itself and hands everything else to a
//! [`PolygammaEvaluator`]:
//!
//! | Argument | Order | Result |
//! |---|---|---|
//! | x = -∞ | any | NaN |
//! | x = +∞ | n = 0 | +∞ |
//! | x = +∞ | n > 0 odd / even | +0.0 / -0.0 |
//! | x ∈ {0, -1, -2, ...} | n odd / even | +∞ / NaN |
//! | x NaN | any | NaN |
//! | finite x | n = -1 | ln Γ(x) |
//! | finite x | n < -1 | NaN |
//!
//! The rows are tried top to bottom, so `polygamma(-1, -2.0)` is +∞ (odd order at a
//! non-positive integer), not the log-gamma pole.

use crate::algorithm::special::{self, is_nonpositive_integer};
use crate::error::{Error, Result};
use crate::policy;

/// The evaluations the override layer delegates to.
///
/// Implementations only ever see arguments that none of the limit rows matched.
pub trait PolygammaEvaluator {
    /// ln|Γ(x)|, used for order -1
    fn lgamma(&self, x: f64) -> Result<f64>;

    /// ψ⁽ⁿ⁾(x) for n >= 0
    fn polygamma(&self, n: u32, x: f64) -> Result<f64>;
}

/// The crate's own scalar evaluators.
#[derive(Debug, Clone, Copy, Default)]
pub struct Numerics;

impl PolygammaEvaluator for Numerics {
    fn lgamma(&self, x: f64) -> Result<f64> {
        special::lgamma(x)
    }

    fn polygamma(&self, n: u32, x: f64) -> Result<f64> {
        special::polygamma(n, x)
    }
}

/// ψ⁽ⁿ⁾(x) with the analytic limits applied, evaluated by [`Numerics`].
pub fn polygamma(n: i32, x: f64) -> Result<f64> {
    polygamma_with(&Numerics, n, x)
}

/// ψ⁽ⁿ⁾(x) with the analytic limits applied, delegating to `evaluator`.
pub fn polygamma_with<E>(evaluator: &E, n: i32, x: f64) -> Result<f64>
where
    E: PolygammaEvaluator + ?Sized,
{
    const F: &str = "polygamma";
    let odd = n % 2 != 0;

    if x == f64::NEG_INFINITY {
        tracing::trace!(n, x, "polygamma limit at -inf");
        return policy::raise(Error::domain(F, "x = -inf"));
    }
    if x == f64::INFINITY && n >= 0 {
        tracing::trace!(n, x, "polygamma limit at +inf");
        return Ok(match n {
            0 => f64::INFINITY,
            _ if odd => 0.0,
            _ => -0.0,
        });
    }
    if is_nonpositive_integer(x) {
        tracing::trace!(n, x, "polygamma at a pole");
        // Odd orders diverge to +∞ from both sides; even orders change sign.
        return if odd {
            Ok(f64::INFINITY)
        } else {
            policy::raise(Error::pole(F, x))
        };
    }
    if x.is_nan() {
        tracing::trace!(n, "polygamma of NaN");
        return policy::raise(Error::nan_argument(F));
    }

    match n {
        -1 => evaluator.lgamma(x),
        n if n < -1 => {
            tracing::trace!(n, x, "polygamma order below -1");
            policy::raise(Error::domain(F, "order below -1"))
        }
        n => evaluator.polygamma(n.unsigned_abs(), x),
    }
}
