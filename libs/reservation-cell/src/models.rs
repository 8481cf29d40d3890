// libs/reservation-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inventory_cell::InventoryError;

pub use shared_models::{Lease, LeaseStatus, Urgency};

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveBedRequest {
    pub patient_id: Uuid,
    pub hospital_id: Uuid,
    pub bed_type: String,
    #[serde(default = "default_urgency")]
    pub urgency: Urgency,
    pub address: Option<String>,
}

fn default_urgency() -> Urgency {
    Urgency::Normal
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveLeaseRequest {
    pub outcome: LeaseOutcome,
}

/// Outcomes a caller may resolve a lease to. `Expired` is reserved for the
/// sweep and is not accepted from the gateway.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeaseOutcome {
    Arrived,
    Cancelled,
    Rejected,
}

impl From<LeaseOutcome> for LeaseStatus {
    fn from(outcome: LeaseOutcome) -> Self {
        match outcome {
            LeaseOutcome::Arrived => LeaseStatus::Arrived,
            LeaseOutcome::Cancelled => LeaseStatus::Cancelled,
            LeaseOutcome::Rejected => LeaseStatus::Rejected,
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum LeaseError {
    #[error("Lease not found")]
    NotFound,

    #[error("No beds available")]
    CapacityExhausted,

    #[error("Lease is {current}, not pending")]
    InvalidTransition { current: LeaseStatus },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}
