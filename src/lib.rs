//! # sfabi
//!
//! **Special functions behind an exception-free C ABI.**
//!
//! sfabi exposes gamma, Bessel, Legendre, elliptic, hypergeometric, Airy and related
//! functions as plain `extern "C"` symbols. Every symbol returns a number, whatever the input:
//! failures surface as sentinel values instead of errors or unwinding.
//!
//! ## Why sfabi?
//!
//! - **Total**: NaN and ±∞ arguments are fine; no call aborts or unwinds into the caller
//! - **Sign-correct**: overflow reports the sign of the true result
//! - **Analytic limits**: the polygamma family answers at ±∞ and at its poles
//! - **Pure Rust**: no C++ runtime, one `cdylib`/`staticlib`
//!
//! ## Sentinels
//!
//! | Failure | Returned |
//! |---|---|
//! | domain, pole, evaluation, internal (panics included) | NaN |
//! | overflow | ±∞ |
//! | underflow | 0.0 |
//!
//! ## Quick Start
//!
//! From C, link the library and call `sfabi_*`:
//!
//! ```c
//! double psi = sfabi_digamma(1.0);       /* -0.5772156649015329 */
//! double bad = sfabi_tgamma(-2.0);       /* NaN */
//! double re, im;
//! sfabi_cyl_hankel_1(0.0, 1.0, &re, &im);
//! ```
//!
//! From Rust, the same functions return [`Result`] in [`math`]:
//!
//! ```rust
//! use sfabi::math;
//!
//! assert!(math::tgamma(-2.0).is_err());
//! assert_eq!(sfabi::ffi::sfabi_factorial(171), f64::INFINITY);
//! ```
//!
//! ## Feature Flags
//!
//! - `header`: generate `include/sfabi.h` with cbindgen at build time
//!
//! ## Environment
//!
//! Unless a policy was installed through [`policy::install`], the first evaluation reads
//! `SFABI_<CATEGORY>_ERROR=signal|ignore` (see [`policy::ErrorPolicy::from_env`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod algorithm;
pub mod error;
pub mod ffi;
pub mod math;
pub mod overrides;
pub mod policy;

pub use error::{Error, ErrorKind, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::math;
    pub use crate::policy::{ErrorAction, ErrorPolicy};
    pub use num_complex::Complex;
}
