//! Numerical algorithms behind the boundary
//!
//! [`special`] holds the scalar special-function evaluators. They are the only code in the
//! crate that does numerical work; everything above them (overrides, adapter, C table)
//! decides how their outcomes surface.

pub mod special;
