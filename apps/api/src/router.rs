use std::sync::Arc;

use axum::{routing::get, Router};

use inventory_cell::router::inventory_routes;
use reservation_cell::router::reservation_routes;
use scheduling_cell::router::scheduling_routes;
use shared_store::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "HospiTrack reservation API is running!" }))
        .nest("/inventory", inventory_routes(state.clone()))
        .nest("/reservations", reservation_routes(state.clone()))
        .nest("/appointments", scheduling_routes(state))
}
