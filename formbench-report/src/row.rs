//! Report rows.

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Column headers for the rendered table.
pub const HEADER: [&str; 5] = [
    "Form",
    "x fastest",
    "Total runtime",
    "# of allocs",
    "Total alloc runtime",
];

/// Relative speed against the fastest candidate in the same table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedFactor {
    /// This row is the fastest one.
    Fastest,
    /// This row took the given multiple of the fastest row's time.
    Times(f64),
}

impl fmt::Display for SpeedFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedFactor::Fastest => write!(f, "fastest"),
            SpeedFactor::Times(factor) => write!(f, "{factor:.2}"),
        }
    }
}

impl Serialize for SpeedFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One aggregated row of the comparison table.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    /// Candidate label, possibly context-prefixed by a composite driver.
    pub label: String,
    /// Speed relative to the fastest row.
    pub factor: SpeedFactor,
    /// Total wall-clock time across all iterations.
    #[serde(rename = "elapsed_seconds", serialize_with = "as_seconds")]
    pub elapsed: Duration,
    /// Heap allocations during the timed window.
    pub allocs: u64,
    /// Time spent inside the allocator during the timed window.
    #[serde(rename = "alloc_elapsed_seconds", serialize_with = "as_seconds")]
    pub alloc_elapsed: Duration,
}

fn as_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl ReportRow {
    /// The runtime column, rendered as seconds with six decimals.
    pub fn runtime_cell(&self) -> String {
        format!("{:.6}", self.elapsed.as_secs_f64())
    }

    /// The allocator-runtime column. A window with no allocator activity
    /// renders as the bare digit rather than a padded decimal.
    pub fn alloc_runtime_cell(&self) -> String {
        if self.alloc_elapsed.is_zero() {
            "0".to_string()
        } else {
            format!("{:.6}", self.alloc_elapsed.as_secs_f64())
        }
    }
}
