//! The unit of metric report traffic.
//!
//! A [`MetricRecord`] is one observed value from one reporter. Records
//! are created by the transport per reported sample, consumed once by
//! the coordinator's ingest path and then discarded, never stored.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
/// The class of process a metric report originates from.
pub enum ReporterClass {
    /// A worker node serving cached data.
    Worker,
    /// A client process embedded in an application.
    Client,
    /// Pseudo-class for counters addressed directly by their final
    /// cluster-facing name rather than derived from a worker or client
    /// report name. Never appears on the wire.
    Cluster,
}

impl std::fmt::Display for ReporterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Worker => write!(f, "worker"),
            Self::Client => write!(f, "client"),
            Self::Cluster => write!(f, "cluster"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// The kinds of metrics that appear in a report.
pub enum MetricKind {
    /// A monotonically increasing value. The only kind the coordinator
    /// aggregates into cluster counters.
    Counter,
    /// A point-at-time value.
    Gauge,
    /// A rate-of-events value.
    Meter,
    /// A duration distribution.
    Timer,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
/// One reported metric sample.
pub struct MetricRecord {
    /// Hostname of the reporting process. Records without one are
    /// malformed and dropped at ingest.
    pub hostname: Option<String>,
    /// The class of the reporter as stamped on the wire. The ingest
    /// entry point's class is authoritative for counter addressing;
    /// this field travels with the record for diagnostics.
    pub class: ReporterClass,
    /// What kind of metric this sample belongs to.
    pub kind: MetricKind,
    /// The metric name as the reporter knows it.
    pub name: String,
    /// The observed value. May be fractional on the wire; counter
    /// aggregation truncates it toward zero.
    pub value: f64,
    /// Dimension tags, e.g. the backing-store identity under the
    /// [`crate::name::UFS_TAG`] key.
    pub tags: FxHashMap<String, String>,
}

impl MetricRecord {
    /// The integer delta this record contributes to a counter: the
    /// value truncated toward zero. Out-of-range values saturate and
    /// NaN truncates to 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn delta(&self) -> i64 {
        self.value as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: f64) -> MetricRecord {
        MetricRecord {
            hostname: Some(String::from("worker-0")),
            class: ReporterClass::Worker,
            kind: MetricKind::Counter,
            name: String::from("BytesReadCache"),
            value,
            tags: FxHashMap::default(),
        }
    }

    #[test]
    fn delta_truncates_toward_zero() {
        assert_eq!(record(99.9).delta(), 99);
        assert_eq!(record(-99.9).delta(), -99);
        assert_eq!(record(0.0).delta(), 0);
    }

    #[test]
    fn delta_is_total() {
        // `as` casts saturate and map NaN to zero, so no reported value
        // can panic the ingest path.
        assert_eq!(record(f64::NAN).delta(), 0);
        assert_eq!(record(f64::INFINITY).delta(), i64::MAX);
        assert_eq!(record(f64::NEG_INFINITY).delta(), i64::MIN);
    }

    #[test]
    fn wire_shape_round_trips() {
        let mut tags = FxHashMap::default();
        tags.insert(String::from("ufs"), String::from("s3://bucket-a"));
        let rec = MetricRecord {
            hostname: Some(String::from("worker-3")),
            class: ReporterClass::Worker,
            kind: MetricKind::Counter,
            name: String::from("BytesReadPerUfs"),
            value: 100.0,
            tags,
        };

        let json = serde_json::to_string(&rec).expect("serialize");
        assert!(json.contains("\"class\":\"worker\""));
        assert!(json.contains("\"kind\":\"counter\""));
        let back: MetricRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, rec);
    }
}
