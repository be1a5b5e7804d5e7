#![warn(missing_docs)]
//! Formbench Core - Measurement Engine
//!
//! This crate provides the in-process half of the comparison harness:
//! - `Candidate` / `SourceForm` model for alternative implementations
//! - Wall-clock timing plus allocator activity collection per candidate
//! - Value-equivalence checking with structural diffs
//! - The single-threaded run pipeline shared by every execution context

mod allocator;
mod candidate;
mod equivalence;
mod error;
mod measure;
mod options;
mod runner;

pub use allocator::{allocation_stats, reset_allocation_stats, AllocStats, TrackingAlloc};
pub use candidate::{resolve_labels, validate_bindings, Binding, Candidate, Environment, SourceForm};
pub use equivalence::{check_all, Diff, Equivalence, EquivalenceError, EquivalenceRecord};
pub use error::{ConfigError, Error};
pub use measure::{measure, Measurement, Timer};
pub use options::{OptLevel, Options};
pub use runner::run_candidates;

// The crate's own tests opt into allocation tracking the same way callers do.
#[cfg(test)]
#[global_allocator]
static TEST_ALLOC: TrackingAlloc = TrackingAlloc;
