//! The `extern "C"` table
//!
//! One unmangled `sfabi_*` symbol per function of [`crate::math`]. Every symbol evaluates
//! through [`crate::adapter`], so it always returns a plain number:
//!
//! - domain, pole, evaluation and internal errors return NaN
//! - overflow returns ±∞ with the sign of the true result
//! - underflow returns 0.0
//!
//! Two-component results are written through `re`/`im` output pointers and sequences into a
//! caller-sized buffer. Null output pointers are skipped.
//!
//! The symbols are grouped by family, mirroring [`crate::algorithm::special::scalar`].

pub mod airy;
pub mod bessel;
pub mod elementary;
pub mod elliptic;
pub mod error_functions;
pub mod gamma;
pub mod hypergeometric;
pub mod legendre;

pub use airy::*;
pub use bessel::*;
pub use elementary::*;
pub use elliptic::*;
pub use error_functions::*;
pub use gamma::*;
pub use hypergeometric::*;
pub use legendre::*;
