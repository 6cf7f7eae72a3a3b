//! The mutable accumulator behind every cluster counter.

use std::sync::atomic::{AtomicI64, Ordering};

/// A thread-safe 64-bit accumulator.
///
/// Cells are owned by the store's registry; clones of the owning `Arc`
/// may be handed to an exporter for read-only observation. All atomic
/// operations use `Relaxed` ordering: the values are statistics and no
/// inter-thread ordering hangs off them.
#[derive(Debug, Default)]
pub struct Counter(AtomicI64);

impl Counter {
    /// Create a cell reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the cell.
    pub fn inc(&self, delta: i64) {
        self.0.fetch_add(delta, Ordering::Relaxed);
    }

    /// Subtract `delta` from the cell.
    pub fn dec(&self, delta: i64) {
        self.0.fetch_sub(delta, Ordering::Relaxed);
    }

    /// Current value of the cell.
    #[must_use]
    pub fn count(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Bring the cell back to zero by decrementing its current value.
    ///
    /// Read-then-decrement, not a store: callers must hold the store's
    /// exclusive clear permit so no increment can land between the read
    /// and the decrement. Under that permit the cell reads zero
    /// afterwards; without it an interleaved increment would survive
    /// into the next window or be lost.
    pub fn reset(&self) {
        let current = self.0.load(Ordering::Relaxed);
        self.0.fetch_sub(current, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inc_dec_count() {
        let cell = Counter::new();
        assert_eq!(cell.count(), 0);
        cell.inc(100);
        cell.inc(20);
        cell.dec(30);
        assert_eq!(cell.count(), 90);
    }

    #[test]
    fn reset_returns_to_zero() {
        let cell = Counter::new();
        cell.inc(1_234);
        cell.reset();
        assert_eq!(cell.count(), 0);
        // A reset of an already-zero cell is a no-op.
        cell.reset();
        assert_eq!(cell.count(), 0);
    }

    #[test]
    fn transient_negative_allowed() {
        let cell = Counter::new();
        cell.dec(10);
        assert_eq!(cell.count(), -10);
        cell.inc(10);
        assert_eq!(cell.count(), 0);
    }
}
