// libs/reservation-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::AppState;

use crate::models::{LeaseError, ReserveBedRequest, ResolveLeaseRequest};
use crate::services::lease::LeaseService;

fn map_lease_error(e: LeaseError) -> AppError {
    match e {
        LeaseError::NotFound => AppError::NotFound("Reservation not found".to_string()),
        LeaseError::CapacityExhausted => {
            AppError::CapacityExhausted("No beds available".to_string())
        }
        LeaseError::InvalidTransition { current } => {
            AppError::InvalidTransition(format!("Reservation already resolved ({})", current))
        }
        LeaseError::Inventory(e) => AppError::InventoryViolation(e.to_string()),
    }
}

/// Patient-initiated bed hold. Succeeds with a Pending lease or fails with
/// 409 when the last unit went to a concurrent caller.
#[axum::debug_handler]
pub async fn reserve_bed(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReserveBedRequest>,
) -> Result<Json<Value>, AppError> {
    if request.bed_type.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Bed type must not be empty".to_string(),
        ));
    }

    let ttl_minutes = state.config.lease_ttl_minutes;
    let service = LeaseService::new(state);
    let lease = service.reserve(request).await.map_err(map_lease_error)?;

    Ok(Json(json!({
        "message": format!("Bed reserved successfully for {} minutes!", ttl_minutes),
        "lease": lease
    })))
}

/// Staff (arrived/rejected) or patient (cancelled) resolution.
#[axum::debug_handler]
pub async fn resolve_lease(
    State(state): State<Arc<AppState>>,
    Path(lease_id): Path<Uuid>,
    Json(request): Json<ResolveLeaseRequest>,
) -> Result<Json<Value>, AppError> {
    let service = LeaseService::new(state);
    let lease = service
        .resolve(lease_id, request.outcome)
        .await
        .map_err(map_lease_error)?;

    Ok(Json(json!({
        "message": format!("Reservation status updated to {}", lease.status),
        "lease": lease
    })))
}

#[axum::debug_handler]
pub async fn list_patient_leases(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = LeaseService::new(state);
    let leases = service.list_for_patient(patient_id).await;
    Ok(Json(json!(leases)))
}

#[axum::debug_handler]
pub async fn list_hospital_leases(
    State(state): State<Arc<AppState>>,
    Path(hospital_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = LeaseService::new(state);
    let leases = service.list_for_hospital(hospital_id).await;
    Ok(Json(json!(leases)))
}
