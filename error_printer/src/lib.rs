//! Log-and-pass-through helpers for `Result` and `Option`.
//!
//! These let a call site record why something failed (with the caller's location) without
//! changing how the value is propagated:
//!
//! ```rust
//! use error_printer::ErrorPrinter;
//!
//! fn read_len(path: &str) -> std::io::Result<u64> {
//!     let meta = std::fs::metadata(path).log_error(format!("cannot stat {path}"))?;
//!     Ok(meta.len())
//! }
//! ```

use std::fmt::{Debug, Display};
use std::panic::Location;

use tracing::{debug, error, info, warn};

/// Logs the error variant of a `Result` at the chosen level and hands the value back unchanged.
pub trait ErrorPrinter {
    fn log_error<M: Display>(self, message: M) -> Self;

    fn warn_error<M: Display>(self, message: M) -> Self;

    fn debug_error<M: Display>(self, message: M) -> Self;
}

impl<T, E: Debug> ErrorPrinter for Result<T, E> {
    #[track_caller]
    fn log_error<M: Display>(self, message: M) -> Self {
        if let Err(e) = &self {
            let caller = Location::caller();
            error!(caller = %caller, "{message}, error: {e:?}");
        }
        self
    }

    #[track_caller]
    fn warn_error<M: Display>(self, message: M) -> Self {
        if let Err(e) = &self {
            let caller = Location::caller();
            warn!(caller = %caller, "{message}, error: {e:?}");
        }
        self
    }

    #[track_caller]
    fn debug_error<M: Display>(self, message: M) -> Self {
        if let Err(e) = &self {
            let caller = Location::caller();
            debug!(caller = %caller, "{message}, error: {e:?}");
        }
        self
    }
}

/// Logs a message when an `Option` is `None` and hands the value back unchanged.
pub trait OptionPrinter {
    fn error_none<M: Display>(self, message: M) -> Self;

    fn warn_none<M: Display>(self, message: M) -> Self;

    fn info_none<M: Display>(self, message: M) -> Self;
}

impl<T> OptionPrinter for Option<T> {
    #[track_caller]
    fn error_none<M: Display>(self, message: M) -> Self {
        if self.is_none() {
            error!(caller = %Location::caller(), "{message}");
        }
        self
    }

    #[track_caller]
    fn warn_none<M: Display>(self, message: M) -> Self {
        if self.is_none() {
            warn!(caller = %Location::caller(), "{message}");
        }
        self
    }

    #[track_caller]
    fn info_none<M: Display>(self, message: M) -> Self {
        if self.is_none() {
            info!(caller = %Location::caller(), "{message}");
        }
        self
    }
}
