// libs/reservation-cell/src/services/sweep.rs
use std::sync::Arc;

use chrono::Utc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

use shared_store::AppState;

use crate::services::lease::LeaseService;

/// Periodic background pass that finds and expires overdue Pending leases.
/// Each expiry goes through the lease transition guard, so overlapping sweeps
/// and concurrent staff resolutions stay safe.
pub struct ExpirySweepService {
    state: Arc<AppState>,
    is_shutdown: tokio::sync::RwLock<bool>,
}

impl ExpirySweepService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            is_shutdown: tokio::sync::RwLock::new(false),
        }
    }

    /// Sweep loop; runs until `shutdown` is called.
    pub async fn start(&self) {
        let period = Duration::from_secs(self.state.config.sweep_interval_seconds);
        info!("Starting lease expiry sweep (every {:?})", period);

        let mut ticker = interval(period);
        loop {
            ticker.tick().await;

            if *self.is_shutdown.read().await {
                info!("Expiry sweep received shutdown signal");
                break;
            }

            self.run_once().await;
        }
    }

    /// One pass over the lease table. Failures are logged, never fatal; the
    /// next tick retries whatever is still pending.
    pub async fn run_once(&self) -> usize {
        let leases = LeaseService::new(Arc::clone(&self.state));
        let expired = leases.expire_due(Utc::now()).await;
        if expired == 0 {
            debug!("Expiry sweep: nothing due");
        }
        expired
    }

    pub async fn shutdown(&self) {
        let mut is_shutdown = self.is_shutdown.write().await;
        *is_shutdown = true;
    }
}
