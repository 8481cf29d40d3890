// libs/scheduling-cell/src/services/roster.rs
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use shared_models::Doctor;
use shared_store::AppState;

use crate::models::SchedulingError;

/// Read-only roster lookup for the scheduler, plus the staff availability
/// toggle. Doctor registration itself lives outside this core.
pub struct DoctorRosterService {
    state: Arc<AppState>,
}

impl DoctorRosterService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Case-insensitive lookup by hospital and display name, matching how
    /// bookings reference doctors.
    pub async fn find(&self, hospital_id: Uuid, doctor_name: &str) -> Option<Doctor> {
        let needle = doctor_name.trim().to_lowercase();
        self.state
            .store
            .doctors
            .filter(|doc| doc.hospital_id == hospital_id && doc.name.to_lowercase() == needle)
            .await
            .into_iter()
            .next()
    }

    pub async fn list_for_hospital(&self, hospital_id: Uuid) -> Vec<Doctor> {
        let mut doctors = self
            .state
            .store
            .doctors
            .filter(|doc| doc.hospital_id == hospital_id)
            .await;
        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        doctors
    }

    /// Staff toggle: flips `is_available` and returns the updated row.
    pub async fn toggle_availability(&self, doctor_id: Uuid) -> Result<Doctor, SchedulingError> {
        let updated = self
            .state
            .store
            .doctors
            .update(doctor_id, |doc| {
                doc.is_available = !doc.is_available;
                Ok::<(), SchedulingError>(())
            })
            .await?;

        let doctor = updated.ok_or(SchedulingError::DoctorNotFound)?;
        info!(
            "Doctor {} availability set to {}",
            doctor.id, doctor.is_available
        );
        Ok(doctor)
    }

    pub async fn get(&self, doctor_id: Uuid) -> Result<Doctor, SchedulingError> {
        debug!("Fetching doctor {}", doctor_id);
        self.state
            .store
            .doctors
            .get(doctor_id)
            .await
            .ok_or(SchedulingError::DoctorNotFound)
    }
}
