// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::AppState;

use crate::models::{AdvanceAppointmentRequest, BookAppointmentRequest, SchedulingError};
use crate::services::scheduling::SchedulingService;

fn map_scheduling_error(e: SchedulingError) -> AppError {
    match e {
        SchedulingError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        SchedulingError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        SchedulingError::InvalidTransition { current, target } => AppError::InvalidTransition(
            format!("Cannot move appointment from {} to {}", current, target),
        ),
        SchedulingError::ValidationError(msg) => AppError::ValidationError(msg),
    }
}

/// Patient booking. Always lands Pending; a doctor off duty is advisory.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = SchedulingService::new(state);
    let response = service.book(request).await.map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "message": if response.doctor_off_duty {
            "Appointment booked; note the doctor is currently marked off duty"
        } else {
            "Appointment booked successfully"
        },
        "booking": response
    })))
}

/// Staff-only check-in / completion.
#[axum::debug_handler]
pub async fn advance_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<AdvanceAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = SchedulingService::new(state);
    let appointment = service
        .advance(appointment_id, request.target)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "message": "Appointment status updated",
        "appointment": appointment
    })))
}

/// Patient cancellation; valid from Pending only.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = SchedulingService::new(state);
    let appointment = service
        .cancel(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "message": "Appointment cancelled",
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn list_patient_appointments(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = SchedulingService::new(state);
    let appointments = service.list_for_patient(patient_id).await;
    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn list_hospital_appointments(
    State(state): State<Arc<AppState>>,
    Path(hospital_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = SchedulingService::new(state);
    let appointments = service.list_for_hospital(hospital_id).await;
    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn list_hospital_doctors(
    State(state): State<Arc<AppState>>,
    Path(hospital_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = SchedulingService::new(state);
    let doctors = service.roster().list_for_hospital(hospital_id).await;
    Ok(Json(json!(doctors)))
}

/// Staff roster toggle; flips `is_available`.
#[axum::debug_handler]
pub async fn toggle_doctor_availability(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = SchedulingService::new(state);
    let doctor = service
        .roster()
        .toggle_availability(doctor_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "message": "Doctor status updated",
        "is_available": doctor.is_available
    })))
}
