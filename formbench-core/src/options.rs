//! Run Options
//!
//! Shared knobs for every execution context. The defaults mirror the
//! cheapest useful run: one iteration, no equivalence checking, full
//! optimization for isolated builds.

use crate::error::ConfigError;

/// Optimization level applied when compiling isolated drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptLevel {
    /// No optimization.
    O0,
    /// Basic optimization.
    O1,
    /// Some optimization.
    O2,
    /// Full optimization.
    #[default]
    O3,
}

impl OptLevel {
    /// The value passed to `rustc -C opt-level=`.
    pub fn as_flag(&self) -> &'static str {
        match self {
            OptLevel::O0 => "0",
            OptLevel::O1 => "1",
            OptLevel::O2 => "2",
            OptLevel::O3 => "3",
        }
    }
}

/// Options controlling one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// How many times each candidate is invoked. Must be at least 1.
    pub iterations: u64,
    /// Whether candidate results are checked for pairwise equivalence.
    pub check_equivalence: bool,
    /// Optimization level for isolated builds. Ignored by in-process runs.
    pub opt_level: OptLevel,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            iterations: 1,
            check_equivalence: false,
            opt_level: OptLevel::default(),
        }
    }
}

impl Options {
    /// Reject option combinations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }
}
