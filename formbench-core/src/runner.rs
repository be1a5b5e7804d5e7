//! In-Process Run Pipeline
//!
//! Runs a set of candidates sequentially in the caller's process: validate
//! the request, measure each candidate in declaration order, and optionally
//! check that every candidate computed the same value.

use crate::candidate::{resolve_labels, Candidate};
use crate::equivalence::{Equivalence, EquivalenceRecord};
use crate::error::Error;
use crate::measure::{measure, Measurement};
use crate::options::Options;

/// Measure every candidate in declaration order.
///
/// When `options.check_equivalence` is set, each candidate's first-iteration
/// result is compared against the previous candidate's as soon as it
/// finishes; a mismatch aborts the run without executing the remaining
/// candidates.
pub fn run_candidates<T: Equivalence>(
    mut candidates: Vec<Candidate<T>>,
    options: &Options,
) -> Result<Vec<Measurement>, Error> {
    options.validate()?;
    let labels = resolve_labels(candidates.iter().map(|c| c.label.as_deref()))?;

    tracing::debug!(
        candidates = labels.len(),
        iterations = options.iterations,
        check_equivalence = options.check_equivalence,
        "starting in-process run"
    );

    let mut measurements = Vec::with_capacity(candidates.len());
    let mut record = EquivalenceRecord::new();
    for (candidate, label) in candidates.iter_mut().zip(&labels) {
        let (measurement, first) = measure(
            label,
            options.iterations,
            candidate.thunk_mut(),
            options.check_equivalence,
        );
        measurements.push(measurement);
        if let Some(value) = first {
            record.insert(label, value)?;
        }
    }
    Ok(measurements)
}
