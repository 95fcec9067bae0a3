//! Process-wide error policy
//!
//! The evaluators in [`crate::algorithm::special::scalar`] never decide on their own whether a
//! failure is reported. They hand every classified [`Error`] to the installed
//! [`ErrorPolicy`], which either signals it (`Err`) or ignores it (`Ok(sentinel)`).
//!
//! The policy is an immutable value. It is installed at most once, before the first
//! evaluation, and is never mutated afterwards:
//!
//! ```rust
//! use sfabi::policy::{self, ErrorAction, ErrorPolicy};
//!
//! let quiet_underflow = ErrorPolicy {
//!     underflow: ErrorAction::Ignore,
//!     ..ErrorPolicy::default()
//! };
//! // Fails if something already evaluated a function or installed a policy.
//! let _ = policy::install(quiet_underflow);
//! ```

use once_cell::sync::OnceCell;

use crate::error::{Error, ErrorKind, Result};

/// What to do with one category of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorAction {
    /// Report the error to the caller as `Err`
    #[default]
    Signal,
    /// Replace the error by its sentinel and report success
    Ignore,
}

impl ErrorAction {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "signal" | "error" | "throw" => Some(ErrorAction::Signal),
            "ignore" | "quiet" => Some(ErrorAction::Ignore),
            _ => None,
        }
    }
}

/// Per-category error handling.
///
/// The default signals every category, which is what the C boundary expects: all
/// signalled errors are converted to sentinels there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ErrorPolicy {
    /// Domain errors
    pub domain: ErrorAction,
    /// Pole errors
    pub pole: ErrorAction,
    /// Overflow
    pub overflow: ErrorAction,
    /// Underflow
    pub underflow: ErrorAction,
    /// Non-convergence
    pub evaluation: ErrorAction,
    /// Anything else
    pub internal: ErrorAction,
}

impl ErrorPolicy {
    /// Signal every category.
    pub const SIGNAL_ALL: ErrorPolicy = ErrorPolicy {
        domain: ErrorAction::Signal,
        pole: ErrorAction::Signal,
        overflow: ErrorAction::Signal,
        underflow: ErrorAction::Signal,
        evaluation: ErrorAction::Signal,
        internal: ErrorAction::Signal,
    };

    /// Ignore every category.
    pub const IGNORE_ALL: ErrorPolicy = ErrorPolicy {
        domain: ErrorAction::Ignore,
        pole: ErrorAction::Ignore,
        overflow: ErrorAction::Ignore,
        underflow: ErrorAction::Ignore,
        evaluation: ErrorAction::Ignore,
        internal: ErrorAction::Ignore,
    };

    /// Build a policy from `SFABI_<CATEGORY>_ERROR` environment variables.
    ///
    /// Each variable accepts `signal` or `ignore` (case-insensitive); unset or
    /// unrecognised values keep the default (`signal`).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = ErrorPolicy::default();
        for kind in ErrorKind::ALL {
            let key = format!("SFABI_{}_ERROR", kind.as_str().to_ascii_uppercase());
            let Some(raw) = lookup(&key) else { continue };
            match ErrorAction::parse(&raw) {
                Some(action) => policy.set(kind, action),
                None => tracing::warn!(key = %key, value = %raw, "unrecognised error action"),
            }
        }
        policy
    }

    /// The action configured for `kind`.
    pub const fn action(&self, kind: ErrorKind) -> ErrorAction {
        match kind {
            ErrorKind::Domain => self.domain,
            ErrorKind::Pole => self.pole,
            ErrorKind::Overflow => self.overflow,
            ErrorKind::Underflow => self.underflow,
            ErrorKind::Evaluation => self.evaluation,
            ErrorKind::Internal => self.internal,
        }
    }

    fn set(&mut self, kind: ErrorKind, action: ErrorAction) {
        let slot = match kind {
            ErrorKind::Domain => &mut self.domain,
            ErrorKind::Pole => &mut self.pole,
            ErrorKind::Overflow => &mut self.overflow,
            ErrorKind::Underflow => &mut self.underflow,
            ErrorKind::Evaluation => &mut self.evaluation,
            ErrorKind::Internal => &mut self.internal,
        };
        *slot = action;
    }

    /// Apply the policy to `err`.
    pub fn raise<T: From<f64>>(&self, err: Error) -> Result<T> {
        match self.action(err.kind()) {
            ErrorAction::Signal => Err(err),
            ErrorAction::Ignore => Ok(T::from(err.sentinel())),
        }
    }
}

static POLICY: OnceCell<ErrorPolicy> = OnceCell::new();

/// Install the process-wide policy.
///
/// Succeeds only once, and only before the policy has been read. On failure the
/// rejected policy is handed back and the installed one stays in effect.
pub fn install(policy: ErrorPolicy) -> std::result::Result<(), ErrorPolicy> {
    match POLICY.set(policy) {
        Ok(()) => {
            tracing::debug!(?policy, "error policy installed");
            Ok(())
        }
        Err(rejected) => {
            tracing::warn!(installed = ?POLICY.get(), "error policy already fixed, install ignored");
            Err(rejected)
        }
    }
}

/// The policy in effect.
///
/// If nothing was installed, the first call fixes [`ErrorPolicy::from_env`], which is the
/// default unless `SFABI_<CATEGORY>_ERROR` variables are set.
pub fn current() -> &'static ErrorPolicy {
    POLICY.get_or_init(ErrorPolicy::from_env)
}

/// Hand `err` to the current policy.
pub(crate) fn raise<T: From<f64>>(err: Error) -> Result<T> {
    current().raise(err)
}
