//! Error types for sfabi

use thiserror::Error;

/// Result type alias using sfabi's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Category of a special-function failure.
///
/// Each category maps to exactly one sentinel at the C boundary, see [`Error::sentinel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Argument outside the function's mathematical domain
    Domain,
    /// Function has a pole at the argument
    Pole,
    /// True result exceeds the representable range
    Overflow,
    /// True result is nonzero but rounds to zero
    Underflow,
    /// Iterative or series method did not converge
    Evaluation,
    /// Any other failure, including an intercepted panic
    Internal,
}

impl ErrorKind {
    /// All categories, in declaration order.
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::Domain,
        ErrorKind::Pole,
        ErrorKind::Overflow,
        ErrorKind::Underflow,
        ErrorKind::Evaluation,
        ErrorKind::Internal,
    ];

    /// Lower-case name, as used in logs and environment variables.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Domain => "domain",
            ErrorKind::Pole => "pole",
            ErrorKind::Overflow => "overflow",
            ErrorKind::Underflow => "underflow",
            ErrorKind::Evaluation => "evaluation",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors signalled by the special-function evaluators.
///
/// Every variant is allocation-free so that signalling and absorbing an error at the
/// boundary never touches the heap.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Argument outside the mathematical domain
    #[error("Domain error in {function}: {reason}")]
    Domain {
        /// The function that signalled
        function: &'static str,
        /// Why the argument was rejected
        reason: &'static str,
    },

    /// Evaluation at a pole
    #[error("Pole error in {function} at {at}")]
    Pole {
        /// The function that signalled
        function: &'static str,
        /// The offending argument
        at: f64,
    },

    /// Result too large to represent
    #[error("Overflow in {function} (result is {})", infinity_label(.negative))]
    Overflow {
        /// The function that signalled
        function: &'static str,
        /// Sign of the true result
        negative: bool,
    },

    /// Result too small to represent
    #[error("Underflow in {function}")]
    Underflow {
        /// The function that signalled
        function: &'static str,
    },

    /// Non-convergence or unsupported parameter range of an evaluation method
    #[error("Evaluation error in {function}: {reason}")]
    Evaluation {
        /// The function that signalled
        function: &'static str,
        /// What went wrong
        reason: &'static str,
    },

    /// Generic internal error
    #[error("Internal error in {function}: {reason}")]
    Internal {
        /// The function that signalled
        function: &'static str,
        /// What went wrong
        reason: &'static str,
    },
}

fn infinity_label(negative: &bool) -> &'static str {
    if *negative { "-inf" } else { "+inf" }
}

impl Error {
    /// Create a domain error
    pub const fn domain(function: &'static str, reason: &'static str) -> Self {
        Self::Domain { function, reason }
    }

    /// Create a pole error
    pub const fn pole(function: &'static str, at: f64) -> Self {
        Self::Pole { function, at }
    }

    /// Create an overflow error; `negative` is the sign of the true result
    pub const fn overflow(function: &'static str, negative: bool) -> Self {
        Self::Overflow { function, negative }
    }

    /// Create an underflow error
    pub const fn underflow(function: &'static str) -> Self {
        Self::Underflow { function }
    }

    /// Create an evaluation error
    pub const fn evaluation(function: &'static str, reason: &'static str) -> Self {
        Self::Evaluation { function, reason }
    }

    /// Create an internal error
    pub const fn internal(function: &'static str, reason: &'static str) -> Self {
        Self::Internal { function, reason }
    }

    /// Shorthand for the NaN-argument domain error
    pub const fn nan_argument(function: &'static str) -> Self {
        Self::Domain {
            function,
            reason: "NaN argument",
        }
    }

    /// The category of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Domain { .. } => ErrorKind::Domain,
            Error::Pole { .. } => ErrorKind::Pole,
            Error::Overflow { .. } => ErrorKind::Overflow,
            Error::Underflow { .. } => ErrorKind::Underflow,
            Error::Evaluation { .. } => ErrorKind::Evaluation,
            Error::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Name of the function that signalled
    pub const fn function(&self) -> &'static str {
        match self {
            Error::Domain { function, .. }
            | Error::Pole { function, .. }
            | Error::Overflow { function, .. }
            | Error::Underflow { function }
            | Error::Evaluation { function, .. }
            | Error::Internal { function, .. } => *function,
        }
    }

    /// The value returned across the C boundary in place of this error.
    ///
    /// | Category | Sentinel |
    /// |---|---|
    /// | domain, pole, evaluation, internal | NaN |
    /// | overflow | ±∞, sign of the true result |
    /// | underflow | 0.0 |
    pub const fn sentinel(&self) -> f64 {
        match self {
            Error::Overflow { negative: true, .. } => f64::NEG_INFINITY,
            Error::Overflow { negative: false, .. } => f64::INFINITY,
            Error::Underflow { .. } => 0.0,
            Error::Domain { .. }
            | Error::Pole { .. }
            | Error::Evaluation { .. }
            | Error::Internal { .. } => f64::NAN,
        }
    }
}
