//! The cluster counter store.
//!
//! One instance lives in the coordinator process. Report handlers call
//! the ingest operations concurrently; a periodic task calls [`clear`]
//! to start a new aggregation window. The two sides meet at a
//! shared/exclusive gate: ingest holds the shared permit, clear the
//! exclusive one, so a clear is never observed as a partial reset mixed
//! with concurrent increments. The shared permit exists purely to block
//! against clears, ingesters never serialize against each other.
//!
//! [`clear`]: MetricsStore::clear

use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use shoal_metrics::name;
use shoal_metrics::record::{MetricKind, MetricRecord, ReporterClass};
use tracing::{debug, trace};

use crate::counter::Counter;
use crate::exporter::{Exporter, NoopExporter};
use crate::key::ClusterKey;
use crate::registry::CounterRegistry;

/// The seed set: reports arriving under the class and reported name are
/// aggregated into the cell announced under the cluster-facing name.
/// The two all-UFS summary cells are addressed directly by their
/// cluster-facing name.
const SEEDS: [(ReporterClass, &str, &str); 8] = [
    (
        ReporterClass::Worker,
        name::BYTES_READ_CACHE,
        name::CLUSTER_BYTES_READ_CACHE,
    ),
    (
        ReporterClass::Worker,
        name::BYTES_WRITTEN_CACHE,
        name::CLUSTER_BYTES_WRITTEN_CACHE,
    ),
    (
        ReporterClass::Worker,
        name::BYTES_READ_DOMAIN,
        name::CLUSTER_BYTES_READ_DOMAIN,
    ),
    (
        ReporterClass::Worker,
        name::BYTES_WRITTEN_DOMAIN,
        name::CLUSTER_BYTES_WRITTEN_DOMAIN,
    ),
    (
        ReporterClass::Client,
        name::BYTES_READ_LOCAL,
        name::CLUSTER_BYTES_READ_LOCAL,
    ),
    (
        ReporterClass::Client,
        name::BYTES_WRITTEN_LOCAL,
        name::CLUSTER_BYTES_WRITTEN_LOCAL,
    ),
    (
        ReporterClass::Cluster,
        name::CLUSTER_BYTES_READ_UFS_ALL,
        name::CLUSTER_BYTES_READ_UFS_ALL,
    ),
    (
        ReporterClass::Cluster,
        name::CLUSTER_BYTES_WRITTEN_UFS_ALL,
        name::CLUSTER_BYTES_WRITTEN_UFS_ALL,
    ),
];

#[derive(Debug)]
struct Inner {
    registry: CounterRegistry,
    last_clear: SystemTime,
}

/// Aggregates counter reports from the whole cluster.
///
/// Not a singleton: callers hold the store in an `Arc` and hand clones
/// to report handlers and the window roller. Independent instances are
/// fully isolated, which is what makes the store unit-testable.
#[derive(Debug)]
pub struct MetricsStore<E: Exporter = NoopExporter> {
    gate: RwLock<Inner>,
    exporter: E,
}

impl MetricsStore<NoopExporter> {
    /// Create a store with no external exporter attached.
    #[must_use]
    pub fn new() -> Self {
        Self::with_exporter(NoopExporter)
    }
}

impl Default for MetricsStore<NoopExporter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Exporter> MetricsStore<E> {
    /// Create a store announcing its cells to `exporter`.
    pub fn with_exporter(exporter: E) -> Self {
        Self {
            gate: RwLock::new(Inner {
                registry: CounterRegistry::new(),
                last_clear: SystemTime::now(),
            }),
            exporter,
        }
    }

    /// Populate the seed set.
    ///
    /// Startup-only: must run exactly once, before any ingestion or
    /// clearing begins. Runs under the shared permit to serialize with
    /// an in-flight clear, not with itself.
    pub fn init(&self) {
        let inner = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        for (class, reported, cluster_facing) in SEEDS {
            let (cell, created) = inner.registry.get_or_create(ClusterKey::new(class, reported));
            if created {
                self.exporter.counter_registered(cluster_facing, &cell);
            }
        }
        debug!(cells = inner.registry.len(), "cluster counters seeded");
    }

    /// Apply a batch of records reported by the worker at `hostname`.
    ///
    /// A missing hostname or an empty batch is a no-op. Records are
    /// independent: one that fails a validity check is skipped, the
    /// rest still apply.
    pub fn ingest_from_worker(&self, hostname: Option<&str>, records: &[MetricRecord]) {
        self.ingest(ReporterClass::Worker, hostname, records);
    }

    /// Apply a batch of records reported by the client at `hostname`.
    ///
    /// Same skip rules as [`Self::ingest_from_worker`], except unknown
    /// names never fan out: only pre-seeded client counters aggregate.
    pub fn ingest_from_client(&self, hostname: Option<&str>, records: &[MetricRecord]) {
        self.ingest(ReporterClass::Client, hostname, records);
    }

    fn ingest(&self, class: ReporterClass, hostname: Option<&str>, records: &[MetricRecord]) {
        if records.is_empty() {
            return;
        }
        let Some(hostname) = hostname else {
            return;
        };

        // Shared permit held for the whole batch: a clear cannot begin
        // until every record here has applied.
        let inner = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        for record in records {
            if record.hostname.is_none() {
                trace!(%class, name = %record.name, "record without hostname, skipped");
                continue;
            }
            if record.kind != MetricKind::Counter {
                continue;
            }

            let delta = record.delta();
            if let Some(cell) = inner.registry.get(&ClusterKey::new(class, &*record.name)) {
                cell.inc(delta);
            } else if class == ReporterClass::Worker {
                match &*record.name {
                    name::BYTES_READ_PER_UFS => self.fan_out(
                        &inner,
                        record,
                        name::CLUSTER_BYTES_READ_PER_UFS,
                        name::CLUSTER_BYTES_READ_UFS_ALL,
                        delta,
                    ),
                    name::BYTES_WRITTEN_PER_UFS => self.fan_out(
                        &inner,
                        record,
                        name::CLUSTER_BYTES_WRITTEN_PER_UFS,
                        name::CLUSTER_BYTES_WRITTEN_UFS_ALL,
                        delta,
                    ),
                    other => {
                        trace!(%hostname, name = other, "unregistered worker metric, skipped");
                    }
                }
            } else {
                trace!(%hostname, name = %record.name, "unregistered client metric, skipped");
            }
        }
    }

    /// One per-UFS sample updates two cells by the same delta: the
    /// tag-specific counter, created lazily on first use, and the
    /// pre-seeded all-backing-stores summary.
    fn fan_out(
        &self,
        inner: &Inner,
        record: &MetricRecord,
        per_tag_prefix: &str,
        summary_name: &str,
        delta: i64,
    ) {
        let Some(tag_value) = record.tags.get(name::UFS_TAG) else {
            trace!(name = %record.name, "per-UFS record without ufs tag, skipped");
            return;
        };

        let tagged = name::tagged(per_tag_prefix, name::UFS_TAG, tag_value);
        let (cell, created) = inner.registry.get_or_create(ClusterKey::cluster(&*tagged));
        if created {
            self.exporter.counter_registered(&tagged, &cell);
        }
        cell.inc(delta);

        let summary = inner
            .registry
            .get(&ClusterKey::cluster(summary_name))
            .unwrap_or_else(|| {
                panic!(
                    "catastrophic programming error: summary counter {summary_name} absent, init() must complete before ingestion"
                )
            });
        summary.inc(delta);
    }

    /// Reset every counter to zero and start a new aggregation window.
    ///
    /// Holds the exclusive permit for the whole sweep: no ingester runs
    /// until it completes, which is what makes the per-cell
    /// read-then-decrement reset sound. Stamps the clear time and then
    /// tells the exporter so externally tracked aggregates reset too.
    pub fn clear(&self) {
        let mut inner = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        let cells = inner.registry.len();
        inner.registry.for_each(|_key, cell| cell.reset());
        inner.last_clear = SystemTime::now();
        self.exporter.reset();
        debug!(cells, "cluster counters cleared");
    }

    /// When the current aggregation window started: the time of the
    /// most recent [`Self::clear`], or of construction if none has run.
    #[must_use]
    pub fn last_clear_time(&self) -> SystemTime {
        self.gate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last_clear
    }

    /// Look up the cell addressed by `key`, if it exists.
    #[must_use]
    pub fn counter(&self, key: &ClusterKey) -> Option<Arc<Counter>> {
        self.gate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .registry
            .get(key)
    }

    /// Number of cells currently registered, seeded plus lazy.
    #[must_use]
    pub fn counter_count(&self) -> usize {
        self.gate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .registry
            .len()
    }
}
