//! Control-node metrics aggregation for the shoal caching cluster
//!
//! The coordinator receives periodic metric reports from many worker
//! and client processes and maintains a small set of cluster-wide
//! aggregate counters derived from them. The [`store::MetricsStore`]
//! accepts concurrent, unordered report traffic while the
//! [`window::WindowRoller`] periodically resets all aggregates
//! atomically with respect to that traffic.
//!
//! Transport of reports, the canonical metric-key registry and the
//! external exporter are collaborators outside this crate; the store
//! exposes the seams they plug into.

#![deny(clippy::all)]
#![deny(clippy::cargo)]
#![deny(clippy::perf)]
#![deny(clippy::suspicious)]
#![deny(clippy::complexity)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_docs)]

pub mod counter;
pub mod exporter;
pub mod key;
pub mod registry;
pub mod store;
pub mod window;
