//! Driver Stdout Protocol
//!
//! The generated driver reports back over its stdout: one JSON record line
//! per form, each tagged with a fixed prefix so ordinary program output
//! passes through untouched. A result mismatch is reported as three tagged
//! lines followed by a dedicated exit code.

use crate::error::IsolateError;
use formbench_core::{Diff, EquivalenceError, Measurement};
use serde::Deserialize;
use std::time::Duration;

/// Prefix of a per-form measurement line.
pub const RECORD_PREFIX: &str = "formbench::record ";
/// Prefix of the mismatch line, carrying the two form indices.
pub const MISMATCH_PREFIX: &str = "formbench::mismatch ";
/// Prefix of the line carrying the earlier form's rendered value.
pub const LEFT_PREFIX: &str = "formbench::left ";
/// Prefix of the line carrying the later form's rendered value.
pub const RIGHT_PREFIX: &str = "formbench::right ";
/// Exit code the driver uses for a result mismatch, distinguishing it from
/// a form fault.
pub const MISMATCH_EXIT_CODE: i32 = 2;

#[derive(Debug, Deserialize)]
struct RawRecord {
    index: usize,
    elapsed_ns: u64,
    allocs: u64,
    alloc_elapsed_ns: u64,
}

/// Parse the driver's stdout into one measurement per form, in form order.
///
/// Every form must report exactly once; anything else is a protocol error.
pub fn parse_records(stdout: &str, labels: &[String]) -> Result<Vec<Measurement>, IsolateError> {
    let mut slots: Vec<Option<RawRecord>> = labels.iter().map(|_| None).collect();

    for line in stdout.lines() {
        let Some(body) = line.strip_prefix(RECORD_PREFIX) else {
            continue;
        };
        let record: RawRecord = serde_json::from_str(body)
            .map_err(|e| IsolateError::Protocol(format!("bad record line {body:?}: {e}")))?;
        if record.index >= slots.len() {
            return Err(IsolateError::Protocol(format!(
                "record index {} out of range for {} forms",
                record.index,
                slots.len()
            )));
        }
        let index = record.index;
        if slots[index].is_some() {
            return Err(IsolateError::Protocol(format!(
                "duplicate record for form {index}"
            )));
        }
        slots[index] = Some(record);
    }

    slots
        .into_iter()
        .zip(labels)
        .enumerate()
        .map(|(index, (slot, label))| {
            let record = slot.ok_or_else(|| {
                IsolateError::Protocol(format!("missing record for form {index}"))
            })?;
            Ok(Measurement {
                label: label.clone(),
                elapsed: Duration::from_nanos(record.elapsed_ns),
                allocs: record.allocs,
                alloc_elapsed: Duration::from_nanos(record.alloc_elapsed_ns),
            })
        })
        .collect()
}

/// Reconstruct the mismatch a driver reported before exiting with
/// [`MISMATCH_EXIT_CODE`].
pub fn parse_mismatch(stdout: &str, labels: &[String]) -> Result<EquivalenceError, IsolateError> {
    let mut indices: Option<(usize, usize)> = None;
    let mut left_value = None;
    let mut right_value = None;

    for line in stdout.lines() {
        if let Some(body) = line.strip_prefix(MISMATCH_PREFIX) {
            let mut parts = body.split_whitespace();
            let parse = |part: Option<&str>| {
                part.and_then(|p| p.parse::<usize>().ok())
                    .filter(|&i| i < labels.len())
            };
            match (parse(parts.next()), parse(parts.next())) {
                (Some(l), Some(r)) => indices = Some((l, r)),
                _ => {
                    return Err(IsolateError::Protocol(format!(
                        "bad mismatch line {body:?}"
                    )))
                }
            }
        } else if let Some(body) = line.strip_prefix(LEFT_PREFIX) {
            left_value = Some(body.to_string());
        } else if let Some(body) = line.strip_prefix(RIGHT_PREFIX) {
            right_value = Some(body.to_string());
        }
    }

    let (l, r) = indices.ok_or_else(|| {
        IsolateError::Protocol("driver exited with the mismatch code but reported none".into())
    })?;
    Ok(EquivalenceError {
        left: labels[l].clone(),
        right: labels[r].clone(),
        diff: Diff::Values {
            left: left_value.unwrap_or_default(),
            right: right_value.unwrap_or_default(),
        },
    })
}
