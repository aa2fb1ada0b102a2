//! Background sweep for expired records.
//!
//! Expired records already read as absent; the sweep only reclaims space.

use crate::config::CleanupConfig;
use crate::storage::RecordStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Run one purge pass and report how many records were dropped.
///
/// Failures are logged, not returned; the next pass retries.
pub async fn sweep(store: &dyn RecordStore) -> u64 {
    match store.purge_expired().await {
        Ok(0) => {
            tracing::debug!("Sweep: nothing expired");
            0
        }
        Ok(purged) => {
            tracing::info!("Sweep: purged {} expired records", purged);
            purged
        }
        Err(e) => {
            tracing::error!("Sweep failed: {}", e);
            0
        }
    }
}

/// Spawn the periodic sweep.
///
/// The first pass runs immediately. Abort the returned handle to stop it.
pub fn spawn_cleanup_task(
    store: Arc<dyn RecordStore>,
    config: CleanupConfig,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if !config.enabled {
            tracing::info!("Expiry sweep disabled");
            return;
        }

        // tokio panics on a zero period
        let period = Duration::from_secs(config.interval_secs.max(1));
        tracing::info!("Expiry sweep every {:?}", period);

        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            sweep(store.as_ref()).await;
        }
    })
}
