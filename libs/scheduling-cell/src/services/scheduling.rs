// libs/scheduling-cell/src/services/scheduling.rs
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::{Appointment, AppointmentStatus};
use shared_store::AppState;

use crate::models::{AdvanceTarget, BookAppointmentRequest, BookAppointmentResponse, SchedulingError};
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::roster::DoctorRosterService;

/// Books appointments and advances them through the checked state machine.
/// Appointments are not countable inventory: any number of Pending rows may
/// exist per doctor and date.
pub struct SchedulingService {
    state: Arc<AppState>,
    lifecycle: AppointmentLifecycleService,
    roster: DoctorRosterService,
}

impl SchedulingService {
    pub fn new(state: Arc<AppState>) -> Self {
        let roster = DoctorRosterService::new(Arc::clone(&state));
        Self {
            state,
            lifecycle: AppointmentLifecycleService::new(),
            roster,
        }
    }

    pub fn roster(&self) -> &DoctorRosterService {
        &self.roster
    }

    /// Book a Pending appointment. A roster doctor currently off duty does
    /// not block the booking; the response carries the advisory flag.
    pub async fn book(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<BookAppointmentResponse, SchedulingError> {
        let doctor_name = request.doctor_name.trim();
        if doctor_name.is_empty() {
            return Err(SchedulingError::ValidationError(
                "Doctor name must not be empty".to_string(),
            ));
        }
        if self
            .state
            .store
            .hospitals
            .get(request.hospital_id)
            .await
            .is_none()
        {
            return Err(SchedulingError::ValidationError(
                "Unknown hospital".to_string(),
            ));
        }

        let doctor_off_duty = self
            .roster
            .find(request.hospital_id, doctor_name)
            .await
            .map(|doc| !doc.is_available)
            .unwrap_or(false);

        let now = Utc::now();
        let id = Uuid::new_v4();
        let appointment = Appointment {
            id,
            appointment_no: format!("APT-{}", &id.simple().to_string()[..8].to_uppercase()),
            patient_id: request.patient_id,
            hospital_id: request.hospital_id,
            doctor_name: doctor_name.to_string(),
            date: request.date,
            status: AppointmentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.state
            .store
            .appointments
            .insert(appointment.id, appointment.clone())
            .await;

        info!(
            "Appointment {} booked for patient {} with {} on {}",
            appointment.appointment_no, appointment.patient_id, appointment.doctor_name,
            appointment.date
        );
        Ok(BookAppointmentResponse {
            appointment,
            doctor_off_duty,
        })
    }

    /// Staff check-in or completion; the target must strictly follow the
    /// current status.
    pub async fn advance(
        &self,
        appointment_id: Uuid,
        target: AdvanceTarget,
    ) -> Result<Appointment, SchedulingError> {
        self.transition(appointment_id, target.into()).await
    }

    /// Patient cancellation; valid from Pending only.
    pub async fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, SchedulingError> {
        self.transition(appointment_id, AppointmentStatus::Cancelled)
            .await
    }

    pub async fn get(&self, appointment_id: Uuid) -> Result<Appointment, SchedulingError> {
        self.state
            .store
            .appointments
            .get(appointment_id)
            .await
            .ok_or(SchedulingError::NotFound)
    }

    /// Full patient history, newest date first; terminal rows included.
    pub async fn list_for_patient(&self, patient_id: Uuid) -> Vec<Appointment> {
        let mut appointments = self
            .state
            .store
            .appointments
            .filter(|apt| apt.patient_id == patient_id)
            .await;
        appointments.sort_by(|a, b| b.date.cmp(&a.date));
        appointments
    }

    /// Staff view for one hospital, date ascending. Completed rows leave the
    /// active view but stay in patient history.
    pub async fn list_for_hospital(&self, hospital_id: Uuid) -> Vec<Appointment> {
        let mut appointments = self
            .state
            .store
            .appointments
            .filter(|apt| {
                apt.hospital_id == hospital_id && apt.status != AppointmentStatus::Completed
            })
            .await;
        appointments.sort_by(|a, b| a.date.cmp(&b.date));
        appointments
    }

    async fn transition(
        &self,
        appointment_id: Uuid,
        target: AppointmentStatus,
    ) -> Result<Appointment, SchedulingError> {
        debug!("Advancing appointment {} to {}", appointment_id, target);

        let updated = self
            .state
            .store
            .appointments
            .update(appointment_id, |apt| {
                self.lifecycle.validate_transition(apt.status, target)?;
                apt.status = target;
                apt.updated_at = Utc::now();
                Ok(())
            })
            .await?;

        let appointment = updated.ok_or(SchedulingError::NotFound)?;
        info!("Appointment {} is now {}", appointment.id, appointment.status);
        Ok(appointment)
    }
}
