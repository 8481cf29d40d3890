// libs/reservation-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_store::AppState;

use crate::handlers;

pub fn reservation_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::reserve_bed))
        .route("/{lease_id}/resolve", post(handlers::resolve_lease))
        .route("/patients/{patient_id}", get(handlers::list_patient_leases))
        .route("/hospitals/{hospital_id}", get(handlers::list_hospital_leases))
        .with_state(state)
}
