//! Seam to the external metrics exporter.
//!
//! The coordinator's counters are published externally by a registry
//! the store does not own. The store announces every cell it creates
//! and tells the exporter when a clear has happened so aggregates
//! tracked outside the store's own bookkeeping reset too. The exporter
//! observes cells, it never owns them.

use std::sync::Arc;

use crate::counter::Counter;

/// Observer interface to the external metrics registry.
pub trait Exporter: Send + Sync {
    /// A counter cell was created, seeded or lazy, under its
    /// cluster-facing name. Called exactly once per cell.
    fn counter_registered(&self, name: &str, cell: &Arc<Counter>);

    /// The store completed a clear; externally tracked aggregates
    /// should reset as well.
    fn reset(&self);
}

/// Exporter that ignores everything. The default when no external
/// registry is wired up, and what tests use when they only care about
/// store state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExporter;

impl Exporter for NoopExporter {
    fn counter_registered(&self, _name: &str, _cell: &Arc<Counter>) {}

    fn reset(&self) {}
}
