//! Periodic aggregation-window roller.
//!
//! Drives [`MetricsStore::clear`] at a configured interval so cluster
//! counters always describe the current window. Runs as one task next
//! to the report handlers and stops on the shutdown signal.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::exporter::{Exporter, NoopExporter};
use crate::store::MetricsStore;

fn default_clear_interval_milliseconds() -> u64 {
    60_000
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(deny_unknown_fields)]
/// Configuration for the window roller.
pub struct Config {
    /// How often counters are cleared, in milliseconds.
    #[serde(default = "default_clear_interval_milliseconds")]
    pub clear_interval_milliseconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clear_interval_milliseconds: default_clear_interval_milliseconds(),
        }
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
/// Errors produced by [`WindowRoller`].
pub enum Error {
    /// Window roller shut down unexpectedly
    #[error("Unexpected shutdown")]
    EarlyShutdown,
}

/// Clears the store once per configured interval.
#[derive(Debug)]
pub struct WindowRoller<E: Exporter = NoopExporter> {
    config: Config,
    store: Arc<MetricsStore<E>>,
    shutdown: watch::Receiver<bool>,
}

impl<E: Exporter> WindowRoller<E> {
    /// Create a new [`WindowRoller`] over `store`, stopping when
    /// `shutdown` flips to `true`.
    pub fn new(config: Config, store: Arc<MetricsStore<E>>, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            config,
            store,
            shutdown,
        }
    }

    /// Run this [`WindowRoller`] to completion.
    ///
    /// Clears the store at the configured interval until the shutdown
    /// signal arrives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EarlyShutdown`] if the shutdown channel closes
    /// without a signal.
    pub async fn run(mut self) -> Result<(), Error> {
        let period = Duration::from_millis(self.config.clear_interval_milliseconds);
        info!("window roller starting, clearing at {period:?} interval");

        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately; consume it so the
        // roller does not clear a window that just opened.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    debug!("rolling aggregation window");
                    self.store.clear();
                }
                res = self.shutdown.changed() => {
                    match res {
                        Ok(()) => {
                            if *self.shutdown.borrow() {
                                info!("shutdown signal received");
                                return Ok(());
                            }
                        }
                        Err(_) => return Err(Error::EarlyShutdown),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_metrics::name;
    use shoal_metrics::record::{MetricKind, MetricRecord, ReporterClass};

    use crate::key::ClusterKey;

    fn read_cache_record(value: f64) -> MetricRecord {
        MetricRecord {
            hostname: Some(String::from("worker-0")),
            class: ReporterClass::Worker,
            kind: MetricKind::Counter,
            name: String::from(name::BYTES_READ_CACHE),
            value,
            tags: rustc_hash::FxHashMap::default(),
        }
    }

    #[test]
    fn config_defaults_and_rejects_unknown_fields() {
        let config: Config = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config.clear_interval_milliseconds, 60_000);

        let config: Config =
            serde_json::from_str(r#"{"clear_interval_milliseconds": 250}"#).expect("valid config");
        assert_eq!(config.clear_interval_milliseconds, 250);

        let err = serde_json::from_str::<Config>(r#"{"interval": 250}"#);
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn rolls_windows_until_shutdown() {
        let store = Arc::new(MetricsStore::new());
        store.init();
        store.ingest_from_worker(Some("worker-0"), &[read_cache_record(100.0)]);

        let before = store.last_clear_time();
        let (tx, rx) = watch::channel(false);
        let config = Config {
            clear_interval_milliseconds: 10,
        };
        let handle = tokio::spawn(WindowRoller::new(config, Arc::clone(&store), rx).run());

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).expect("roller alive");
        handle.await.expect("join").expect("clean shutdown");

        let key = ClusterKey::new(ReporterClass::Worker, name::BYTES_READ_CACHE);
        assert_eq!(store.counter(&key).expect("seeded").count(), 0);
        assert!(store.last_clear_time() > before);
    }

    #[tokio::test]
    async fn does_not_clear_at_startup() {
        let store = Arc::new(MetricsStore::new());
        store.init();
        store.ingest_from_worker(Some("worker-0"), &[read_cache_record(100.0)]);

        let (tx, rx) = watch::channel(false);
        let config = Config {
            clear_interval_milliseconds: 60_000,
        };
        let handle = tokio::spawn(WindowRoller::new(config, Arc::clone(&store), rx).run());

        // Give the roller time to consume its immediate first tick.
        tokio::time::sleep(Duration::from_millis(20)).await;
        let key = ClusterKey::new(ReporterClass::Worker, name::BYTES_READ_CACHE);
        assert_eq!(store.counter(&key).expect("seeded").count(), 100);

        tx.send(true).expect("roller alive");
        handle.await.expect("join").expect("clean shutdown");
    }

    #[tokio::test]
    async fn dropped_sender_is_early_shutdown() {
        let store = Arc::new(MetricsStore::new());
        store.init();

        let (tx, rx) = watch::channel(false);
        let config = Config {
            clear_interval_milliseconds: 60_000,
        };
        let handle = tokio::spawn(WindowRoller::new(config, store, rx).run());
        drop(tx);

        let res = handle.await.expect("join");
        assert!(matches!(res, Err(Error::EarlyShutdown)));
    }
}
