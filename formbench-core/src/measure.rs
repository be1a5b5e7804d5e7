//! Candidate Measurement
//!
//! Times one candidate's repeated execution and snapshots allocator
//! activity for that candidate alone.

use crate::allocator::{allocation_stats, reset_allocation_stats};
use std::time::{Duration, Instant};

/// Raw statistics captured for one candidate's repeated execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Candidate label: caller-supplied, or the zero-based ordinal position.
    pub label: String,
    /// Wall-clock time for all iterations.
    pub elapsed: Duration,
    /// Heap allocations performed during the timed window.
    pub allocs: u64,
    /// Time spent inside the allocator during the timed window.
    pub alloc_elapsed: Duration,
}

/// Timer for one measurement window.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return the elapsed wall-clock time.
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Invoke `thunk` exactly `iterations` times, sequentially and
/// single-threaded, and record elapsed time plus allocator activity.
///
/// The allocation counters are reset first so activity from earlier
/// candidates is not attributed to this one. Every result is passed through
/// `std::hint::black_box`; when `keep_first` is set the first iteration's
/// result is returned alongside the measurement for equivalence checking.
///
/// A panicking `thunk` propagates unchanged and aborts the whole run.
pub fn measure<T>(
    label: &str,
    iterations: u64,
    thunk: &mut dyn FnMut() -> T,
    keep_first: bool,
) -> (Measurement, Option<T>) {
    reset_allocation_stats();

    let mut first = None;
    let timer = Timer::start();
    for iter in 0..iterations {
        let value = std::hint::black_box(thunk());
        if iter == 0 && keep_first {
            first = Some(value);
        }
    }
    let elapsed = timer.stop();
    let stats = allocation_stats();

    tracing::trace!(
        label,
        iterations,
        elapsed_ns = elapsed.as_nanos() as u64,
        allocs = stats.count,
        "measured candidate"
    );

    (
        Measurement {
            label: label.to_string(),
            elapsed,
            allocs: stats.count,
            alloc_elapsed: stats.elapsed(),
        },
        first,
    )
}
