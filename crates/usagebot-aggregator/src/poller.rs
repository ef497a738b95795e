//! Interval-driven collection loop.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, warn};

use usagebot_config::Config;
use usagebot_persistence::SnapshotStore;

use crate::collector::refresh_once;

/// Drives the collection run on a fixed interval.
///
/// The first tick fires immediately, so a freshly started bot has a
/// snapshot as soon as the panels answer. A failed run only logs; the
/// previous snapshot stays servable until the next interval.
pub struct UsagePoller {
    config: Arc<Config>,
    store: SnapshotStore,
    shutdown: watch::Receiver<bool>,
}

impl UsagePoller {
    /// Creates a new poller.
    pub fn new(config: Arc<Config>, store: SnapshotStore, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            config,
            store,
            shutdown,
        }
    }

    /// Run the collection loop until the shutdown signal flips.
    pub async fn run(&mut self) {
        let mut ticker = interval(self.config.refresh_interval);

        debug!(
            interval_secs = self.config.refresh_interval.as_secs(),
            panels = self.config.panels.len(),
            "starting usage poller"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = refresh_once(&self.config, &self.store).await {
                        warn!(error = %e, "snapshot not replaced this run");
                    }
                }
                _ = self.shutdown.changed() => {
                    if *self.shutdown.borrow() {
                        debug!("usage poller received shutdown signal");
                        break;
                    }
                }
            }
        }

        debug!("usage poller stopped");
    }
}
