//! Concurrent mapping from counter key to counter cell.

use std::hash::BuildHasherDefault;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxHasher;

use crate::counter::Counter;
use crate::key::ClusterKey;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// The set of live cluster counters.
///
/// Keys are unique; cells are created either by seeding at store
/// initialization or lazily on first use of a per-backing-store name.
/// Lazy creation is exactly-once under concurrent first use: racing
/// callers observe the same cell instance.
#[derive(Debug, Default)]
pub struct CounterRegistry {
    cells: DashMap<ClusterKey, Arc<Counter>, FxBuildHasher>,
}

impl CounterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cell for `key`, if one exists.
    #[must_use]
    pub fn get(&self, key: &ClusterKey) -> Option<Arc<Counter>> {
        self.cells.get(key).map(|cell| Arc::clone(cell.value()))
    }

    /// Fetch the cell for `key`, creating it if absent.
    ///
    /// Returns the cell and whether this call created it. The insert is
    /// atomic: concurrent callers racing on the same absent key get the
    /// same cell and exactly one of them sees `true`.
    pub fn get_or_create(&self, key: ClusterKey) -> (Arc<Counter>, bool) {
        match self.cells.entry(key) {
            Entry::Occupied(occupied) => (Arc::clone(occupied.get()), false),
            Entry::Vacant(vacant) => {
                let cell = Arc::new(Counter::new());
                vacant.insert(Arc::clone(&cell));
                (cell, true)
            }
        }
    }

    /// Number of cells currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Visit every cell currently registered.
    pub fn for_each(&self, mut f: impl FnMut(&ClusterKey, &Arc<Counter>)) {
        for entry in &self.cells {
            f(entry.key(), entry.value());
        }
    }
}
