// libs/scheduling-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use shared_models::{Appointment, AppointmentStatus, Doctor};

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: Uuid,
    pub hospital_id: Uuid,
    pub doctor_name: String,
    pub date: NaiveDate,
}

/// Booking result. `doctor_off_duty` is advice for the caller's UI; the core
/// books regardless of the roster flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentResponse {
    pub appointment: Appointment,
    pub doctor_off_duty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceAppointmentRequest {
    pub target: AdvanceTarget,
}

/// Staff-reachable targets. Cancellation has its own endpoint and Pending is
/// never a target, so the wire surface cannot express an illegal direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceTarget {
    CheckedIn,
    Completed,
}

impl From<AdvanceTarget> for AppointmentStatus {
    fn from(target: AdvanceTarget) -> Self {
        match target {
            AdvanceTarget::CheckedIn => AppointmentStatus::CheckedIn,
            AdvanceTarget::Completed => AppointmentStatus::Completed,
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulingError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Appointment is {current}, cannot move to {target}")]
    InvalidTransition {
        current: AppointmentStatus,
        target: AppointmentStatus,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}
