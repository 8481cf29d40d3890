// libs/reservation-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{LeaseError, LeaseStatus};

/// Transition table for bed leases. The guard doubles as the optimistic lock:
/// whichever of a resolve and an expiry sweep reaches the row first wins, the
/// loser fails here.
pub struct LeaseLifecycleService;

impl LeaseLifecycleService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_transition(
        &self,
        current: LeaseStatus,
        target: LeaseStatus,
    ) -> Result<(), LeaseError> {
        debug!("Validating lease transition {} -> {}", current, target);

        if !self.valid_transitions(current).contains(&target) {
            warn!("Invalid lease transition attempted: {} -> {}", current, target);
            return Err(LeaseError::InvalidTransition { current });
        }

        Ok(())
    }

    pub fn valid_transitions(&self, current: LeaseStatus) -> Vec<LeaseStatus> {
        match current {
            LeaseStatus::Pending => vec![
                LeaseStatus::Arrived,
                LeaseStatus::Cancelled,
                LeaseStatus::Rejected,
                LeaseStatus::Expired,
            ],
            // Terminal states are immutable.
            LeaseStatus::Arrived
            | LeaseStatus::Cancelled
            | LeaseStatus::Rejected
            | LeaseStatus::Expired => vec![],
        }
    }
}

impl Default for LeaseLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
