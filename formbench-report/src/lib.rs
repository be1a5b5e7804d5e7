#![warn(missing_docs)]
//! Formbench Report - Aggregation and Rendering
//!
//! Turns raw per-candidate measurements into a comparison table sorted
//! fastest-first, with relative speed factors against the fastest entry.
//! Tables render as padded plain text and serialize to JSON.

mod row;
mod table;

pub use row::{ReportRow, SpeedFactor, HEADER};
pub use table::{aggregate, Table};
