//! Well-known metric names.
//!
//! These constants are the interface to the cluster's metric-key
//! registry: the names workers and clients report under, the
//! cluster-facing counters the coordinator aggregates them into, and
//! the builder for tag-qualified per-backing-store names.

/// Worker bytes read from the internal fast tier.
pub const BYTES_READ_CACHE: &str = "BytesReadCache";
/// Worker bytes written to the internal fast tier.
pub const BYTES_WRITTEN_CACHE: &str = "BytesWrittenCache";
/// Worker bytes read from the direct-attached domain tier.
pub const BYTES_READ_DOMAIN: &str = "BytesReadDomain";
/// Worker bytes written to the direct-attached domain tier.
pub const BYTES_WRITTEN_DOMAIN: &str = "BytesWrittenDomain";
/// Client bytes read through the local short-circuit path.
pub const BYTES_READ_LOCAL: &str = "BytesReadLocal";
/// Client bytes written through the local short-circuit path.
pub const BYTES_WRITTEN_LOCAL: &str = "BytesWrittenLocal";

/// Worker bytes read from a specific backing store, fan-out trigger.
pub const BYTES_READ_PER_UFS: &str = "BytesReadPerUfs";
/// Worker bytes written to a specific backing store, fan-out trigger.
pub const BYTES_WRITTEN_PER_UFS: &str = "BytesWrittenPerUfs";

/// Cluster-facing counterpart of [`BYTES_READ_CACHE`].
pub const CLUSTER_BYTES_READ_CACHE: &str = "Cluster.BytesReadCache";
/// Cluster-facing counterpart of [`BYTES_WRITTEN_CACHE`].
pub const CLUSTER_BYTES_WRITTEN_CACHE: &str = "Cluster.BytesWrittenCache";
/// Cluster-facing counterpart of [`BYTES_READ_DOMAIN`].
pub const CLUSTER_BYTES_READ_DOMAIN: &str = "Cluster.BytesReadDomain";
/// Cluster-facing counterpart of [`BYTES_WRITTEN_DOMAIN`].
pub const CLUSTER_BYTES_WRITTEN_DOMAIN: &str = "Cluster.BytesWrittenDomain";
/// Cluster-facing counterpart of [`BYTES_READ_LOCAL`].
pub const CLUSTER_BYTES_READ_LOCAL: &str = "Cluster.BytesReadLocal";
/// Cluster-facing counterpart of [`BYTES_WRITTEN_LOCAL`].
pub const CLUSTER_BYTES_WRITTEN_LOCAL: &str = "Cluster.BytesWrittenLocal";

/// Prefix of per-backing-store read counters; the full name carries
/// the `ufs` tag, see [`tagged`].
pub const CLUSTER_BYTES_READ_PER_UFS: &str = "Cluster.BytesReadPerUfs";
/// Prefix of per-backing-store write counters.
pub const CLUSTER_BYTES_WRITTEN_PER_UFS: &str = "Cluster.BytesWrittenPerUfs";
/// Summary counter over all backing stores, read side.
pub const CLUSTER_BYTES_READ_UFS_ALL: &str = "Cluster.BytesReadUfsAll";
/// Summary counter over all backing stores, write side.
pub const CLUSTER_BYTES_WRITTEN_UFS_ALL: &str = "Cluster.BytesWrittenUfsAll";

/// Tag key carrying the backing-store identity on per-UFS records.
pub const UFS_TAG: &str = "ufs";

/// Build a tag-qualified metric name, `prefix.key:value`.
#[must_use]
pub fn tagged(prefix: &str, tag_key: &str, tag_value: &str) -> String {
    format!("{prefix}.{tag_key}:{tag_value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_name_shape() {
        assert_eq!(
            tagged(CLUSTER_BYTES_READ_PER_UFS, UFS_TAG, "s3://bucket-a"),
            "Cluster.BytesReadPerUfs.ufs:s3://bucket-a"
        );
    }
}
