//! Shared metric-report primitives for the shoal caching cluster
//!
//! Workers and clients periodically report metric samples to the
//! coordinator; this crate holds the types both sides agree on: the
//! [`record::MetricRecord`] sample shape and the well-known metric names
//! in [`name`]. The wire encoding of a record belongs to the transport
//! layer, not to this crate.

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

pub mod name;
pub mod record;
