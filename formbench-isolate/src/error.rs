//! Error types for the isolated execution context.

use formbench_core::{ConfigError, EquivalenceError};
use std::process::ExitStatus;

/// Any failure an isolated run can produce.
#[derive(Debug, thiserror::Error)]
pub enum IsolateError {
    /// The generated driver failed to compile. Carries the compiler's
    /// stderr verbatim.
    #[error("isolated driver failed to compile:\n{stderr}")]
    Build {
        /// Compiler diagnostics.
        stderr: String,
    },

    /// The compiler itself could not be started.
    #[error("failed to invoke rustc")]
    Compiler(#[source] std::io::Error),

    /// The driver process exited abnormally, which means a form faulted.
    #[error("isolated driver exited with {status}:\n{stderr}")]
    Candidate {
        /// The driver's exit status.
        status: ExitStatus,
        /// The driver's stderr.
        stderr: String,
    },

    /// Two forms produced non-equivalent results inside the driver.
    #[error(transparent)]
    Equivalence(#[from] EquivalenceError),

    /// The driver's stdout did not follow the record protocol.
    #[error("malformed driver output: {0}")]
    Protocol(String),

    /// Filesystem or process I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The run request itself was malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
