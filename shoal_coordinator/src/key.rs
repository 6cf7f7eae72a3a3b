//! Composite identity of a cluster counter.

use shoal_metrics::record::ReporterClass;

/// Addresses one counter cell in the registry: the pair of reporter
/// class and metric name. Value equality only, used strictly as a map
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterKey {
    /// Which class of reporter this counter aggregates, or
    /// [`ReporterClass::Cluster`] for counters addressed directly by
    /// their cluster-facing name.
    pub class: ReporterClass,
    /// The metric name under that class.
    pub name: String,
}

impl ClusterKey {
    /// Key for a counter fed by reports of the given class.
    pub fn new(class: ReporterClass, name: impl Into<String>) -> Self {
        Self {
            class,
            name: name.into(),
        }
    }

    /// Key for a counter addressed by its cluster-facing name.
    pub fn cluster(name: impl Into<String>) -> Self {
        Self::new(ReporterClass::Cluster, name)
    }
}

impl std::fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.class, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_requires_both_fields() {
        let a = ClusterKey::new(ReporterClass::Worker, "BytesReadCache");
        let b = ClusterKey::new(ReporterClass::Worker, "BytesReadCache");
        let c = ClusterKey::new(ReporterClass::Client, "BytesReadCache");
        let d = ClusterKey::new(ReporterClass::Worker, "BytesWrittenCache");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
