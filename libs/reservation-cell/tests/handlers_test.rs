use std::sync::Arc;

use axum::body::{to_bytes, Body};
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use inventory_cell::models::UpsertBedTypeRequest;
use inventory_cell::InventoryService;
use reservation_cell::router::reservation_routes;
use shared_config::AppConfig;
use shared_models::Hospital;
use shared_store::AppState;

async fn setup(available: i64) -> (axum::Router, Arc<AppState>, Uuid, Uuid) {
    let state = AppState::new(AppConfig::default());
    let hospital = Hospital {
        id: Uuid::new_v4(),
        name: "City Hospital".to_string(),
        location: "Downtown".to_string(),
        contact: "555-0101".to_string(),
    };
    state.store.hospitals.insert(hospital.id, hospital.clone()).await;

    let bed = InventoryService::new(Arc::clone(&state))
        .upsert_bed_type(
            hospital.id,
            UpsertBedTypeRequest {
                bed_type: "ICU".to_string(),
                total_count: 10,
                available_count: available,
                price: 500.0,
            },
        )
        .await
        .unwrap();

    (
        reservation_routes(Arc::clone(&state)),
        state,
        hospital.id,
        bed.id,
    )
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn reserving_a_bed_returns_a_pending_lease() {
    let (router, state, hospital_id, bed_id) = setup(5).await;

    let response = router
        .oneshot(post_json(
            "/",
            json!({
                "patient_id": Uuid::new_v4(),
                "hospital_id": hospital_id,
                "bed_type": "ICU",
                "urgency": "high",
                "address": "42 Elm Street"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(
        body["message"],
        "Bed reserved successfully for 30 minutes!"
    );
    assert_eq!(body["lease"]["status"], "pending");
    assert_eq!(body["lease"]["urgency"], "high");

    assert_eq!(
        state.store.beds.get(bed_id).await.unwrap().available_count,
        4
    );
}

#[tokio::test]
async fn blank_bed_type_is_rejected_with_400() {
    let (router, _, hospital_id, _) = setup(5).await;

    let response = router
        .oneshot(post_json(
            "/",
            json!({
                "patient_id": Uuid::new_v4(),
                "hospital_id": hospital_id,
                "bed_type": "   "
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exhausted_capacity_is_409() {
    let (router, state, hospital_id, bed_id) = setup(0).await;

    let response = router
        .oneshot(post_json(
            "/",
            json!({
                "patient_id": Uuid::new_v4(),
                "hospital_id": hospital_id,
                "bed_type": "ICU"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["error"], "No beds available");
    assert_eq!(
        state.store.beds.get(bed_id).await.unwrap().available_count,
        0
    );
}

#[tokio::test]
async fn resolving_unknown_lease_is_404() {
    let (router, _, _, _) = setup(5).await;

    let response = router
        .oneshot(post_json(
            &format!("/{}/resolve", Uuid::new_v4()),
            json!({"outcome": "arrived"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn second_resolution_is_409() {
    let (router, _, hospital_id, _) = setup(5).await;

    let response = router
        .clone()
        .oneshot(post_json(
            "/",
            json!({
                "patient_id": Uuid::new_v4(),
                "hospital_id": hospital_id,
                "bed_type": "ICU"
            }),
        ))
        .await
        .unwrap();
    let lease_id = json_body(response).await["lease"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/{}/resolve", lease_id),
            json!({"outcome": "cancelled"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(post_json(
            &format!("/{}/resolve", lease_id),
            json!({"outcome": "arrived"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Reservation already resolved (cancelled)");
}

#[tokio::test]
async fn patient_listing_returns_lease_history() {
    let (router, _, hospital_id, _) = setup(5).await;
    let patient_id = Uuid::new_v4();

    for _ in 0..2 {
        let response = router
            .clone()
            .oneshot(post_json(
                "/",
                json!({
                    "patient_id": patient_id,
                    "hospital_id": hospital_id,
                    "bed_type": "ICU"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = router
        .oneshot(
            Request::builder()
                .uri(format!("/patients/{}", patient_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let leases = json_body(response).await;
    assert_eq!(leases.as_array().unwrap().len(), 2);
}
