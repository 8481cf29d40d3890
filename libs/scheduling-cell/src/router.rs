// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use shared_store::AppState;

use crate::handlers;

pub fn scheduling_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/{appointment_id}/advance", post(handlers::advance_appointment))
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route("/patients/{patient_id}", get(handlers::list_patient_appointments))
        .route("/hospitals/{hospital_id}", get(handlers::list_hospital_appointments))
        .route("/hospitals/{hospital_id}/doctors", get(handlers::list_hospital_doctors))
        .route(
            "/doctors/{doctor_id}/availability",
            put(handlers::toggle_doctor_availability),
        )
        .with_state(state)
}
