#![warn(missing_docs)]
//! Formbench - Implementation Comparison Harness
//!
//! Compare alternative implementations of the same computation by total
//! runtime and allocator activity, and optionally verify that they all
//! compute the same result. Results come back as a table sorted
//! fastest-first with relative speed factors.
//!
//! Candidates run either in-process (cheap, shares the caller's heap state)
//! or isolated (each run compiles a fresh driver binary and starts a fresh
//! process). The composite drivers combine both contexts, or run the same
//! forms across several named input environments, into one merged table.
//!
//! ```
//! use formbench::{candidate, benchmark, Options};
//!
//! let table = benchmark(
//!     vec![
//!         candidate!("fold", (1..=100u64).fold(0, |a, b| a + b)),
//!         candidate!("formula", 100u64 * 101 / 2),
//!     ],
//!     &Options {
//!         iterations: 10,
//!         check_equivalence: true,
//!         ..Options::default()
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(table.rows.len(), 2);
//! println!("{table}");
//! ```
//!
//! Allocation columns read zero unless [`TrackingAlloc`] is installed as
//! the global allocator (isolated drivers install their own):
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: formbench::TrackingAlloc = formbench::TrackingAlloc;
//! ```

mod drivers;
mod error;

pub use drivers::{
    benchmark, benchmark_dual_context, benchmark_isolated, benchmark_isolated_raw,
    benchmark_multi_environment, benchmark_raw,
};
pub use error::Error;

pub use formbench_core::{
    allocation_stats, reset_allocation_stats, AllocStats, Binding, Candidate, ConfigError, Diff,
    Environment, Equivalence, EquivalenceError, Measurement, OptLevel, Options, SourceForm,
    TrackingAlloc,
};
pub use formbench_isolate::{run_isolated, IsolateError, IsolationUnit};
pub use formbench_report::{aggregate, ReportRow, SpeedFactor, Table, HEADER};

/// Build a [`Candidate`] from an expression, capturing both a closure for
/// in-process runs and the expression text for isolated runs.
///
/// The single-argument form leaves the candidate unlabeled; it will be
/// named by its position.
#[macro_export]
macro_rules! candidate {
    ($label:expr, $expr:expr) => {
        $crate::Candidate::new(move || $expr)
            .labeled($label)
            .with_source(stringify!($expr))
    };
    ($expr:expr) => {
        $crate::Candidate::new(move || $expr).with_source(stringify!($expr))
    };
}

/// Build a [`SourceForm`] from an expression without evaluating it. The
/// expression may refer to names established by run-time [`Binding`]s.
#[macro_export]
macro_rules! form {
    ($label:expr, $expr:expr) => {
        $crate::SourceForm::labeled($label, stringify!($expr))
    };
    ($expr:expr) => {
        $crate::SourceForm::new(stringify!($expr))
    };
}
