// libs/inventory-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{delete, get, put},
    Router,
};

use shared_store::AppState;

use crate::handlers;

pub fn inventory_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/hospitals", get(handlers::list_hospitals))
        .route("/hospitals/{hospital_id}/details", get(handlers::hospital_details))
        .route("/hospitals/{hospital_id}/analytics", get(handlers::hospital_analytics))
        .route("/hospitals/{hospital_id}/beds", put(handlers::upsert_bed_type))
        .route("/beds/{bed_id}", delete(handlers::remove_bed_type))
        .route("/beds/search", get(handlers::search_beds))
        .with_state(state)
}
