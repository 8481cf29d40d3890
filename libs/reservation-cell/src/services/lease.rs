// libs/reservation-cell/src/services/lease.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use inventory_cell::{InventoryError, InventoryService};
use shared_models::{Lease, LeaseStatus};
use shared_store::AppState;

use crate::models::{LeaseError, LeaseOutcome, ReserveBedRequest};
use crate::services::lifecycle::LeaseLifecycleService;

/// The lease manager: creates time-bounded bed holds against the inventory
/// store and drives them through their state machine.
pub struct LeaseService {
    state: Arc<AppState>,
    inventory: InventoryService,
    lifecycle: LeaseLifecycleService,
}

impl LeaseService {
    pub fn new(state: Arc<AppState>) -> Self {
        let inventory = InventoryService::new(Arc::clone(&state));
        Self {
            state,
            inventory,
            lifecycle: LeaseLifecycleService::new(),
        }
    }

    /// Reserve one unit: atomic check-and-decrement on the bed counter, then
    /// a Pending lease with `expires_at = now + TTL`. The decrement happens
    /// first so a lost race leaves no state behind.
    pub async fn reserve(&self, request: ReserveBedRequest) -> Result<Lease, LeaseError> {
        let candidates = self
            .state
            .store
            .beds
            .filter(|bed| {
                bed.is_active
                    && bed.hospital_id == request.hospital_id
                    && bed.bed_type == request.bed_type
            })
            .await;

        let Some(bed) = candidates.into_iter().next() else {
            debug!(
                "No bed row for hospital {} type {}",
                request.hospital_id, request.bed_type
            );
            return Err(LeaseError::CapacityExhausted);
        };

        match self.inventory.adjust_available(bed.id, -1).await {
            Ok(_) => {}
            // A failed decrement means the last unit went to a concurrent
            // caller (or the row vanished); either way there is nothing to
            // hold.
            Err(InventoryError::InventoryViolation(_)) | Err(InventoryError::BedTypeNotFound) => {
                return Err(LeaseError::CapacityExhausted);
            }
            Err(e) => return Err(LeaseError::Inventory(e)),
        }

        let now = Utc::now();
        let lease = Lease {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            hospital_id: request.hospital_id,
            bed_id: bed.id,
            bed_type: bed.bed_type,
            status: LeaseStatus::Pending,
            urgency: request.urgency,
            address: request.address,
            created_at: now,
            expires_at: now + Duration::minutes(self.state.config.lease_ttl_minutes),
        };
        self.state.store.leases.insert(lease.id, lease.clone()).await;

        info!(
            "Reserved bed {} for patient {} (lease {}, expires {})",
            lease.bed_id, lease.patient_id, lease.id, lease.expires_at
        );
        Ok(lease)
    }

    /// Staff or patient resolution of a pending lease.
    pub async fn resolve(&self, lease_id: Uuid, outcome: LeaseOutcome) -> Result<Lease, LeaseError> {
        self.transition(lease_id, outcome.into()).await
    }

    /// Expire every Pending lease whose deadline has passed. Each lease goes
    /// through the same transition guard as `resolve`, so a lease resolved by
    /// a concurrent staff action is skipped and its unit is not
    /// double-released. A failed inventory return is logged and the pass
    /// moves on, so one bad row never holds up the rest of the sweep.
    /// Returns the number of leases expired and settled.
    pub async fn expire_due(&self, now: DateTime<Utc>) -> usize {
        let due = self
            .state
            .store
            .leases
            .filter(|lease| lease.status == LeaseStatus::Pending && lease.expires_at <= now)
            .await;

        let mut expired = 0;
        for lease in due {
            match self.transition(lease.id, LeaseStatus::Expired).await {
                Ok(_) => expired += 1,
                // Lost the race to a staff resolution between scan and
                // transition; the winner already settled the inventory.
                Err(LeaseError::InvalidTransition { current }) => {
                    debug!("Lease {} already {}, skipping expiry", lease.id, current);
                }
                Err(LeaseError::NotFound) => {}
                // The transition committed; only the inventory return failed.
                Err(e) => {
                    warn!("Failed to settle expired lease {}: {}", lease.id, e);
                }
            }
        }

        if expired > 0 {
            info!("Expired {} overdue lease(s)", expired);
        }
        expired
    }

    pub async fn get(&self, lease_id: Uuid) -> Result<Lease, LeaseError> {
        self.state
            .store
            .leases
            .get(lease_id)
            .await
            .ok_or(LeaseError::NotFound)
    }

    /// Patient lease history, newest first.
    pub async fn list_for_patient(&self, patient_id: Uuid) -> Vec<Lease> {
        let mut leases = self
            .state
            .store
            .leases
            .filter(|lease| lease.patient_id == patient_id)
            .await;
        leases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        leases
    }

    /// Staff queue for one hospital, newest first.
    pub async fn list_for_hospital(&self, hospital_id: Uuid) -> Vec<Lease> {
        let mut leases = self
            .state
            .store
            .leases
            .filter(|lease| lease.hospital_id == hospital_id)
            .await;
        leases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        leases
    }

    /// Single-writer transition: the guard runs under the lease row's write
    /// lock, so exactly one of two racing callers commits. Inventory is
    /// settled after the winning transition, at most once per lease.
    async fn transition(&self, lease_id: Uuid, target: LeaseStatus) -> Result<Lease, LeaseError> {
        let updated = self
            .state
            .store
            .leases
            .update(lease_id, |lease| {
                self.lifecycle.validate_transition(lease.status, target)?;
                lease.status = target;
                Ok::<(), LeaseError>(())
            })
            .await?;

        let lease = updated.ok_or(LeaseError::NotFound)?;

        if target.releases_bed() {
            if let Err(e) = self.inventory.adjust_available(lease.bed_id, 1).await {
                // Only reachable when staff shrank the total below the live
                // hold count; the transition stands, the breach is surfaced.
                error!(
                    "Failed to return bed {} for lease {}: {}",
                    lease.bed_id, lease.id, e
                );
                return Err(LeaseError::Inventory(e));
            }
        } else {
            debug!(
                "Lease {} marked {}: bed {} consumed, capacity stays reduced until a staff edit",
                lease.id, target, lease.bed_id
            );
        }

        info!("Lease {} transitioned to {}", lease.id, target);
        Ok(lease)
    }
}
