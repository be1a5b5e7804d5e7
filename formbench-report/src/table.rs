//! Table aggregation and rendering.

use crate::row::{ReportRow, SpeedFactor, HEADER};
use formbench_core::Measurement;
use serde::Serialize;
use std::fmt;

/// A comparison table, sorted fastest-first.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    /// Aggregated rows, fastest first.
    pub rows: Vec<ReportRow>,
}

/// Aggregate raw measurements into a table.
///
/// Rows are sorted by total runtime ascending; ties keep their input order.
/// The first row's factor is `Fastest`; every other row's factor is its
/// runtime divided by the first row's.
pub fn aggregate(mut measurements: Vec<Measurement>) -> Table {
    measurements.sort_by_key(|m| m.elapsed);

    let baseline = measurements
        .first()
        .map(|m| m.elapsed)
        .unwrap_or_default();

    let rows = measurements
        .into_iter()
        .enumerate()
        .map(|(index, m)| {
            let factor = if index == 0 {
                SpeedFactor::Fastest
            } else if baseline.is_zero() {
                // A zero baseline with a non-zero entry has no finite
                // ratio. Equal zeros compare as 1.0.
                if m.elapsed.is_zero() {
                    SpeedFactor::Times(1.0)
                } else {
                    SpeedFactor::Times(f64::INFINITY)
                }
            } else {
                SpeedFactor::Times(m.elapsed.as_secs_f64() / baseline.as_secs_f64())
            };
            ReportRow {
                label: m.label,
                factor,
                elapsed: m.elapsed,
                allocs: m.allocs,
                alloc_elapsed: m.alloc_elapsed,
            }
        })
        .collect();

    Table { rows }
}

impl Table {
    /// The table as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn cells(&self) -> Vec<[String; 5]> {
        self.rows
            .iter()
            .map(|row| {
                [
                    row.label.clone(),
                    row.factor.to_string(),
                    row.runtime_cell(),
                    row.allocs.to_string(),
                    row.alloc_runtime_cell(),
                ]
            })
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells();

        let mut widths: [usize; 5] = [0; 5];
        for (i, header) in HEADER.iter().enumerate() {
            widths[i] = header.len();
        }
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }

        let render = |f: &mut fmt::Formatter<'_>, row: &[String; 5]| -> fmt::Result {
            // Labels read better left-aligned; numeric columns right-aligned.
            write!(f, "{:<width$}", row[0], width = widths[0])?;
            for i in 1..5 {
                write!(f, "  {:>width$}", row[i], width = widths[i])?;
            }
            writeln!(f)
        };

        let header: [String; 5] = HEADER.map(|h| h.to_string());
        render(f, &header)?;
        let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        writeln!(f, "{}", "=".repeat(total))?;
        for row in &cells {
            render(f, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn measurement(label: &str, elapsed_ns: u64) -> Measurement {
        Measurement {
            label: label.into(),
            elapsed: Duration::from_nanos(elapsed_ns),
            allocs: 0,
            alloc_elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn sorts_fastest_first_with_relative_factors() {
        let table = aggregate(vec![
            measurement("slow", 4_000_000),
            measurement("fast", 1_000_000),
            measurement("mid", 2_000_000),
        ]);
        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["fast", "mid", "slow"]);

        assert_eq!(table.rows[0].factor, SpeedFactor::Fastest);
        match table.rows[1].factor {
            SpeedFactor::Times(f) => assert!((f - 2.0).abs() < 1e-9),
            other => panic!("unexpected factor: {other:?}"),
        }
        match table.rows[2].factor {
            SpeedFactor::Times(f) => assert!((f - 4.0).abs() < 1e-9),
            other => panic!("unexpected factor: {other:?}"),
        }
    }

    #[test]
    fn ties_keep_input_order() {
        let table = aggregate(vec![
            measurement("first", 1_000),
            measurement("second", 1_000),
        ]);
        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second"]);
    }

    #[test]
    fn all_zero_baseline_compares_as_one() {
        let table = aggregate(vec![measurement("a", 0), measurement("b", 0)]);
        assert_eq!(table.rows[0].factor, SpeedFactor::Fastest);
        assert_eq!(table.rows[1].factor, SpeedFactor::Times(1.0));
    }

    #[test]
    fn zero_baseline_with_nonzero_entry_is_infinite() {
        let table = aggregate(vec![measurement("a", 0), measurement("b", 5)]);
        match table.rows[1].factor {
            SpeedFactor::Times(f) => assert!(f.is_infinite()),
            other => panic!("unexpected factor: {other:?}"),
        }
    }

    #[test]
    fn display_includes_header_rule_and_all_labels() {
        let table = aggregate(vec![
            measurement("alpha", 2_000_000),
            measurement("beta", 1_000_000),
        ]);
        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("Form"));
        assert!(lines[0].contains("x fastest"));
        assert!(lines[0].contains("Total alloc runtime"));
        assert!(lines[1].chars().all(|c| c == '='));
        assert!(lines[2].starts_with("beta"));
        assert!(lines[2].contains("fastest"));
        assert!(lines[3].starts_with("alpha"));
        assert!(lines[3].contains("2.00"));
    }

    #[test]
    fn json_round_trips_through_serde_value() {
        let table = aggregate(vec![measurement("only", 1_000_000)]);
        let json = table.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"][0]["label"], "only");
        assert_eq!(value["rows"][0]["factor"], "fastest");
    }

    #[test]
    fn empty_table_renders_header_only() {
        let table = aggregate(vec![]);
        let rendered = table.to_string();
        assert_eq!(rendered.lines().count(), 2);
    }
}
