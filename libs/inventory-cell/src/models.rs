// libs/inventory-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use shared_models::{BedType, Doctor, Hospital};

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Staff inventory edit: creates the (hospital, bed type) row or replaces its
/// counts and price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertBedTypeRequest {
    pub bed_type: String,
    pub total_count: i64,
    pub available_count: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BedSearchQuery {
    pub location: Option<String>,
    pub bed_type: Option<String>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedSearchResult {
    pub bed_id: Uuid,
    pub bed_type: String,
    pub price: f64,
    pub available_count: i64,
    pub hospital_id: Uuid,
    pub hospital_name: String,
    pub hospital_location: String,
}

/// Aggregated per-hospital availability for the public hospital list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalSummary {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub contact: String,
    pub available_beds: i64,
    pub total_beds: i64,
}

/// Staff view of one hospital: every bed row, inactive and exhausted ones
/// included, plus the doctor roster. This is where staff read bed ids from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalDetails {
    pub hospital: Hospital,
    pub beds: Vec<BedType>,
    pub doctors: Vec<Doctor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalAnalytics {
    pub patients_served: i64,
    pub peak_hours: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum InventoryError {
    #[error("Hospital not found")]
    HospitalNotFound,

    #[error("Bed type not found")]
    BedTypeNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Inventory violation: {0}")]
    InventoryViolation(String),
}
