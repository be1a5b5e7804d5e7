//! The facade's unified error type.

use formbench_core::{ConfigError, EquivalenceError};
use formbench_isolate::IsolateError;

/// Any failure a comparison run can produce.
///
/// Configuration and equivalence failures surface the same way regardless
/// of which execution context detected them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The run request was malformed.
    #[error(transparent)]
    Config(ConfigError),

    /// Two candidates produced non-equivalent results.
    #[error(transparent)]
    Equivalence(EquivalenceError),

    /// The isolated execution context failed to build or run a driver.
    #[error(transparent)]
    Isolate(IsolateError),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<EquivalenceError> for Error {
    fn from(err: EquivalenceError) -> Self {
        Error::Equivalence(err)
    }
}

impl From<formbench_core::Error> for Error {
    fn from(err: formbench_core::Error) -> Self {
        match err {
            formbench_core::Error::Config(e) => Error::Config(e),
            formbench_core::Error::Equivalence(e) => Error::Equivalence(e),
        }
    }
}

impl From<IsolateError> for Error {
    fn from(err: IsolateError) -> Self {
        match err {
            IsolateError::Config(e) => Error::Config(e),
            IsolateError::Equivalence(e) => Error::Equivalence(e),
            other => Error::Isolate(other),
        }
    }
}
