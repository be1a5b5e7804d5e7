#![warn(missing_docs)]
//! Formbench Isolate - Out-of-Process Execution Context
//!
//! Runs source forms in a freshly compiled, freshly started process so the
//! caller's heap state and code cache cannot influence the measurements.
//! The pipeline is: generate a self-contained driver program, compile it
//! with `rustc`, run it once, and parse its measurements back off stdout.
//! All build artifacts live in a temporary directory that is removed when
//! the unit is dropped.

mod codegen;
mod error;
mod protocol;
mod unit;

pub use codegen::generate_driver;
pub use error::IsolateError;
pub use protocol::{
    parse_mismatch, parse_records, LEFT_PREFIX, MISMATCH_EXIT_CODE, MISMATCH_PREFIX,
    RECORD_PREFIX, RIGHT_PREFIX,
};
pub use unit::{run_isolated, IsolationUnit};
