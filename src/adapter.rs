//! Sentinel projection of checked evaluations
//!
//! Every `extern "C"` entry point runs its evaluation through one of the guards here. A guard
//! catches both failure channels of the evaluators, a signalled [`Error`] and an unwinding
//! panic, and replaces them with the sentinel of their category:
//!
//! | Outcome | Returned |
//! |---|---|
//! | `Ok(v)` | `v`, bit for bit |
//! | `Err(e)` | [`Error::sentinel`]: NaN, ±∞ or 0.0 |
//! | panic | NaN (internal error) |
//!
//! Nothing escapes a guard, so no unwind ever reaches a foreign frame.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use num_complex::Complex;

use crate::error::{Error, Result};

/// Run `eval`, projecting failures onto their sentinels.
pub fn guard<F>(function: &'static str, eval: F) -> f64
where
    F: FnOnce() -> Result<f64>,
{
    project(function, eval, |err| err.sentinel())
}

/// [`guard`] for two-component results; a failure sets both components to the sentinel.
pub fn guard_complex<F>(function: &'static str, eval: F) -> Complex<f64>
where
    F: FnOnce() -> Result<Complex<f64>>,
{
    project(function, eval, |err| {
        let s = err.sentinel();
        Complex::new(s, s)
    })
}

/// [`guard`] for sequence results; a failure yields an empty sequence.
pub fn guard_sequence<F>(function: &'static str, eval: F) -> Vec<f64>
where
    F: FnOnce() -> Result<Vec<f64>>,
{
    project(function, eval, |_| Vec::new())
}

fn project<T, F, S>(function: &'static str, eval: F, sentinel: S) -> T
where
    F: FnOnce() -> Result<T>,
    S: FnOnce(&Error) -> T,
{
    let outcome = match panic::catch_unwind(AssertUnwindSafe(eval)) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(function, panic = %message, "panic intercepted at the C boundary");
            Err(Error::internal(function, "evaluation panicked"))
        }
    };

    match outcome {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(function, kind = %err.kind(), error = %err, "error converted to sentinel");
            sentinel(&err)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Write `value` into the `re`/`im` slots, skipping null pointers.
///
/// # Safety
///
/// Each non-null pointer must be valid for a write of one `f64`.
pub unsafe fn write_complex(value: Complex<f64>, re: *mut f64, im: *mut f64) {
    // SAFETY: non-null slots are writable per the caller's contract.
    unsafe {
        if let Some(slot) = re.as_mut() {
            *slot = value.re;
        }
        if let Some(slot) = im.as_mut() {
            *slot = value.im;
        }
    }
}

/// Copy `values` to the buffer at `out`, skipping a null pointer.
///
/// # Safety
///
/// A non-null `out` must be valid for writes of `values.len()` elements and must not
/// overlap `values`.
pub unsafe fn write_sequence(values: &[f64], out: *mut f64) {
    if out.is_null() {
        return;
    }
    // SAFETY: checked non-null; length is guaranteed by the caller.
    unsafe { std::ptr::copy_nonoverlapping(values.as_ptr(), out, values.len()) }
}
