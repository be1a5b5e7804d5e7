//! Error types for the measurement engine.

use crate::equivalence::EquivalenceError;

/// A structural problem with a run request, detected before any candidate
/// executes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The candidate set was empty.
    #[error("no candidates supplied")]
    EmptyCandidateSet,

    /// Two candidates resolved to the same label.
    #[error("duplicate candidate label {0:?}")]
    DuplicateLabel(String),

    /// The requested iteration count was zero.
    #[error("iteration count must be at least 1")]
    ZeroIterations,

    /// An isolated run was requested for a candidate that carries no
    /// source text.
    #[error("candidate {0:?} has no source text and cannot run isolated")]
    MissingSource(String),

    /// A binding name was not a valid identifier.
    #[error("binding name {0:?} is not a valid identifier")]
    InvalidBinding(String),

    /// A multi-environment run was requested with no environments.
    #[error("no environments supplied")]
    EmptyEnvironmentSet,
}

/// Any failure an in-process run can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The run request itself was malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Two candidates produced non-equivalent results.
    #[error(transparent)]
    Equivalence(#[from] EquivalenceError),
}
