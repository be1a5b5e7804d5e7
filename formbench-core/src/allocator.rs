//! Allocation Tracking
//!
//! Counts heap allocation events and the time spent inside the global
//! allocator. This is the collection-statistics collaborator of the
//! harness: the measurement pipeline snapshots these counters around each
//! candidate's timed window.
//!
//! Tracking is opt-in. Install the wrapper as the global allocator to get
//! non-zero allocation columns:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: formbench_core::TrackingAlloc = formbench_core::TrackingAlloc;
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static ALLOC_COUNT: AtomicU64 = AtomicU64::new(0);
static ALLOC_NANOS: AtomicU64 = AtomicU64::new(0);

/// Allocator activity observed since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Number of heap allocations performed.
    pub count: u64,
    /// Nanoseconds spent inside `alloc`/`dealloc` combined.
    pub nanos: u64,
}

impl AllocStats {
    /// Time spent inside the allocator as a `Duration`.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.nanos)
    }
}

/// Global allocator wrapper over `System` that counts allocation events and
/// the time spent servicing them.
pub struct TrackingAlloc;

unsafe impl GlobalAlloc for TrackingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let start = Instant::now();
        let ptr = System.alloc(layout);
        ALLOC_NANOS.fetch_add(start.elapsed().as_nanos() as u64, Ordering::Relaxed);
        ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let start = Instant::now();
        System.dealloc(ptr, layout);
        ALLOC_NANOS.fetch_add(start.elapsed().as_nanos() as u64, Ordering::Relaxed);
    }
}

/// Zero the allocation counters so activity from earlier work is not
/// attributed to the next measurement window.
pub fn reset_allocation_stats() {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    ALLOC_NANOS.store(0, Ordering::Relaxed);
}

/// Allocator activity since the last reset. Reads zero when `TrackingAlloc`
/// is not installed as the global allocator.
pub fn allocation_stats() -> AllocStats {
    AllocStats {
        count: ALLOC_COUNT.load(Ordering::Relaxed),
        nanos: ALLOC_NANOS.load(Ordering::Relaxed),
    }
}

// The counters are process-global, so tests that reset or assert them must
// not interleave.
#[cfg(test)]
pub(crate) fn counter_test_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
