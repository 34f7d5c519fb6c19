//! Job reaper
//!
//! Evicts job records once their TTL has elapsed, finished or not, so
//! single-process memory stays bounded. A sweep runs on every
//! submission and on a periodic background tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time;
use tracing::{debug, info};

use crate::store::JobStore;

/// Removes every job whose TTL has elapsed; returns the eviction count
pub fn sweep(store: &JobStore, ttl: Duration) -> usize {
    let expired = store.expired_ids(Utc::now(), ttl);

    for id in &expired {
        store.remove(*id);
        debug!("Evicted job {} after TTL", id);
    }

    if !expired.is_empty() {
        info!("Evicted {} expired job(s)", expired.len());
    }

    expired.len()
}

/// Spawns the periodic sweep task
pub fn spawn_sweeper(
    store: Arc<JobStore>,
    ttl: Duration,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);

        loop {
            ticker.tick().await;
            sweep(&store, ttl);
        }
    })
}
