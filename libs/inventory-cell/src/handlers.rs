// libs/inventory-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::AppState;

use crate::models::{BedSearchQuery, InventoryError, UpsertBedTypeRequest};
use crate::services::inventory::InventoryService;

fn map_inventory_error(e: InventoryError) -> AppError {
    match e {
        InventoryError::HospitalNotFound => AppError::NotFound("Hospital not found".to_string()),
        InventoryError::BedTypeNotFound => AppError::NotFound("Bed type not found".to_string()),
        InventoryError::ValidationError(msg) => AppError::ValidationError(msg),
        InventoryError::InventoryViolation(msg) => AppError::InventoryViolation(msg),
    }
}

/// Staff edit of a hospital's bed-type counts and price.
#[axum::debug_handler]
pub async fn upsert_bed_type(
    State(state): State<Arc<AppState>>,
    Path(hospital_id): Path<Uuid>,
    Json(request): Json<UpsertBedTypeRequest>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(state);
    let bed = service
        .upsert_bed_type(hospital_id, request)
        .await
        .map_err(map_inventory_error)?;

    Ok(Json(json!({
        "message": "Bed data updated",
        "bed": bed
    })))
}

/// Soft-remove a bed type; active leases keep resolving against it.
#[axum::debug_handler]
pub async fn remove_bed_type(
    State(state): State<Arc<AppState>>,
    Path(bed_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(state);
    let bed = service
        .remove_bed_type(bed_id)
        .await
        .map_err(map_inventory_error)?;

    Ok(Json(json!({
        "message": "Bed type removed",
        "bed": bed
    })))
}

/// Public bed search; empty result is a success, not an error.
#[axum::debug_handler]
pub async fn search_beds(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BedSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(state);
    let results = service.search_beds(query).await;
    Ok(Json(json!(results)))
}

/// Hospital list with aggregated availability.
#[axum::debug_handler]
pub async fn list_hospitals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(state);
    let hospitals = service.hospital_summaries().await;
    Ok(Json(json!(hospitals)))
}

/// Staff detail view: all bed rows plus the doctor roster for one hospital.
#[axum::debug_handler]
pub async fn hospital_details(
    State(state): State<Arc<AppState>>,
    Path(hospital_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(state);
    let details = service
        .hospital_details(hospital_id)
        .await
        .map_err(map_inventory_error)?;
    Ok(Json(json!(details)))
}

#[axum::debug_handler]
pub async fn hospital_analytics(
    State(state): State<Arc<AppState>>,
    Path(hospital_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(state);
    let analytics = service
        .hospital_analytics(hospital_id)
        .await
        .map_err(map_inventory_error)?;
    Ok(Json(json!(analytics)))
}
