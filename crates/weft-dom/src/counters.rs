//! Process-wide counters
//!
//! Element identity and render statistics. Both start at zero when the
//! process starts and only ever grow.

use std::sync::atomic::{AtomicU64, Ordering};

static ELEMENT_COUNT: AtomicU64 = AtomicU64::new(0);
static RENDER_COUNT: AtomicU64 = AtomicU64::new(0);

/// Allocate the identity of a new element (first element is 1)
pub(crate) fn next_element_id() -> u64 {
    ELEMENT_COUNT.fetch_add(1, Ordering::Relaxed) + 1
}

pub(crate) fn record_render() {
    RENDER_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// Number of elements created by this process
pub fn element_count() -> u64 {
    ELEMENT_COUNT.load(Ordering::Relaxed)
}

/// Number of element serializations recomputed by this process
pub fn render_count() -> u64 {
    RENDER_COUNT.load(Ordering::Relaxed)
}
