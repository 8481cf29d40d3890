use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use futures::future::join_all;
use uuid::Uuid;

use inventory_cell::models::UpsertBedTypeRequest;
use inventory_cell::InventoryService;
use reservation_cell::models::ReserveBedRequest;
use reservation_cell::{ExpirySweepService, LeaseError, LeaseOutcome, LeaseService};
use shared_config::AppConfig;
use shared_models::{Hospital, LeaseStatus, Urgency};
use shared_store::AppState;

async fn state_with_bed(total: i64, available: i64) -> (Arc<AppState>, Uuid, Uuid) {
    state_with_bed_and_config(total, available, AppConfig::default()).await
}

async fn state_with_bed_and_config(
    total: i64,
    available: i64,
    config: AppConfig,
) -> (Arc<AppState>, Uuid, Uuid) {
    let state = AppState::new(config);
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
                total_count: total,
                available_count: available,
                price: 500.0,
            },
        )
        .await
        .unwrap();

    (state, hospital.id, bed.id)
}

fn reserve_request(patient_id: Uuid, hospital_id: Uuid) -> ReserveBedRequest {
    ReserveBedRequest {
        patient_id,
        hospital_id,
        bed_type: "ICU".to_string(),
        urgency: Urgency::Normal,
        address: None,
    }
}

async fn available(state: &Arc<AppState>, bed_id: Uuid) -> i64 {
    state.store.beds.get(bed_id).await.unwrap().available_count
}

#[tokio::test]
async fn reserve_decrements_and_creates_pending_lease() {
    let (state, hospital_id, bed_id) = state_with_bed(5, 5).await;
    let service = LeaseService::new(Arc::clone(&state));

    for _ in 0..3 {
        let lease = service
            .reserve(reserve_request(Uuid::new_v4(), hospital_id))
            .await
            .unwrap();
        assert_eq!(lease.status, LeaseStatus::Pending);
        assert_eq!(lease.bed_id, bed_id);
        assert_eq!(lease.expires_at, lease.created_at + Duration::minutes(30));
    }

    assert_eq!(available(&state, bed_id).await, 2);
}

#[tokio::test]
async fn reserve_unknown_bed_type_is_capacity_exhausted() {
    let (state, hospital_id, _) = state_with_bed(5, 5).await;
    let service = LeaseService::new(state);

    let mut request = reserve_request(Uuid::new_v4(), hospital_id);
    request.bed_type = "Ventilator".to_string();
    assert_matches!(
        service.reserve(request).await,
        Err(LeaseError::CapacityExhausted)
    );
}

#[tokio::test]
async fn reserve_with_no_free_units_is_capacity_exhausted() {
    let (state, hospital_id, bed_id) = state_with_bed(5, 0).await;
    let service = LeaseService::new(Arc::clone(&state));

    assert_matches!(
        service.reserve(reserve_request(Uuid::new_v4(), hospital_id)).await,
        Err(LeaseError::CapacityExhausted)
    );
    assert_eq!(available(&state, bed_id).await, 0);
    assert!(state.store.leases.all().await.is_empty());
}

#[tokio::test]
async fn concurrent_reserves_grant_exactly_the_free_units() {
    let (state, hospital_id, bed_id) = state_with_bed(10, 2).await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                LeaseService::new(state)
                    .reserve(reserve_request(Uuid::new_v4(), hospital_id))
                    .await
            })
        })
        .collect();

    let mut granted = 0;
    let mut exhausted = 0;
    for result in join_all(handles).await {
        match result.unwrap() {
            Ok(_) => granted += 1,
            Err(LeaseError::CapacityExhausted) => exhausted += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(granted, 2);
    assert_eq!(exhausted, 6);
    assert_eq!(available(&state, bed_id).await, 0);

    let pending = state
        .store
        .leases
        .filter(|lease| lease.status == LeaseStatus::Pending)
        .await;
    assert_eq!(pending.len(), 2);
}

#[tokio::test]
async fn arrival_consumes_the_unit_and_rejection_returns_it() {
    let (state, hospital_id, bed_id) = state_with_bed(5, 5).await;
    let service = LeaseService::new(Arc::clone(&state));

    let first = service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();
    let second = service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();
    let third = service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();
    assert_eq!(available(&state, bed_id).await, 2);

    let arrived = service.resolve(first.id, LeaseOutcome::Arrived).await.unwrap();
    assert_eq!(arrived.status, LeaseStatus::Arrived);
    assert_eq!(available(&state, bed_id).await, 2);

    let rejected = service.resolve(second.id, LeaseOutcome::Rejected).await.unwrap();
    assert_eq!(rejected.status, LeaseStatus::Rejected);
    assert_eq!(available(&state, bed_id).await, 3);

    let cancelled = service.resolve(third.id, LeaseOutcome::Cancelled).await.unwrap();
    assert_eq!(cancelled.status, LeaseStatus::Cancelled);
    assert_eq!(available(&state, bed_id).await, 4);

    // Free units equal total minus live holds (one Arrived lease).
    let bed = state.store.beds.get(bed_id).await.unwrap();
    let live = state
        .store
        .leases
        .filter(|lease| {
            lease.status == LeaseStatus::Pending || lease.status == LeaseStatus::Arrived
        })
        .await;
    assert_eq!(bed.available_count, bed.total_count - live.len() as i64);
}

#[tokio::test]
async fn second_resolution_loses_and_the_unit_returns_once() {
    let (state, hospital_id, bed_id) = state_with_bed(5, 5).await;
    let service = LeaseService::new(Arc::clone(&state));

    let lease = service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();

    service.resolve(lease.id, LeaseOutcome::Cancelled).await.unwrap();
    assert_eq!(available(&state, bed_id).await, 5);

    assert_matches!(
        service.resolve(lease.id, LeaseOutcome::Rejected).await,
        Err(LeaseError::InvalidTransition {
            current: LeaseStatus::Cancelled
        })
    );
    assert_eq!(available(&state, bed_id).await, 5);
}

#[tokio::test]
async fn resolve_unknown_lease_is_not_found() {
    let (state, _, _) = state_with_bed(5, 5).await;
    let service = LeaseService::new(state);
    assert_matches!(
        service.resolve(Uuid::new_v4(), LeaseOutcome::Arrived).await,
        Err(LeaseError::NotFound)
    );
}

#[tokio::test]
async fn overdue_leases_expire_and_release_their_units_once() {
    let (state, hospital_id, bed_id) = state_with_bed(5, 5).await;
    let service = LeaseService::new(Arc::clone(&state));

    let lease = service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();
    assert_eq!(available(&state, bed_id).await, 4);

    // Nothing is due before the deadline.
    assert_eq!(service.expire_due(Utc::now()).await, 0);
    assert_eq!(available(&state, bed_id).await, 4);

    let after_deadline = lease.expires_at + Duration::minutes(1);
    assert_eq!(service.expire_due(after_deadline).await, 1);
    assert_eq!(available(&state, bed_id).await, 5);
    assert_eq!(service.get(lease.id).await.unwrap().status, LeaseStatus::Expired);

    // A repeated sweep finds nothing and releases nothing.
    assert_eq!(service.expire_due(after_deadline).await, 0);
    assert_eq!(available(&state, bed_id).await, 5);
}

#[tokio::test]
async fn resolved_leases_are_not_expired() {
    let (state, hospital_id, bed_id) = state_with_bed(5, 5).await;
    let service = LeaseService::new(Arc::clone(&state));

    let lease = service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();
    service.resolve(lease.id, LeaseOutcome::Arrived).await.unwrap();

    let after_deadline = lease.expires_at + Duration::minutes(1);
    assert_eq!(service.expire_due(after_deadline).await, 0);
    assert_eq!(service.get(lease.id).await.unwrap().status, LeaseStatus::Arrived);
    assert_eq!(available(&state, bed_id).await, 4);
}

#[tokio::test]
async fn expiry_and_resolution_race_has_a_single_winner() {
    let (state, hospital_id, bed_id) = state_with_bed(5, 5).await;
    let service = LeaseService::new(Arc::clone(&state));

    let lease = service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();
    let after_deadline = lease.expires_at + Duration::minutes(1);

    let resolver = {
        let state = Arc::clone(&state);
        let lease_id = lease.id;
        tokio::spawn(async move {
            LeaseService::new(state)
                .resolve(lease_id, LeaseOutcome::Cancelled)
                .await
        })
    };
    let sweeper = {
        let state = Arc::clone(&state);
        tokio::spawn(async move { LeaseService::new(state).expire_due(after_deadline).await })
    };

    let resolved = resolver.await.unwrap();
    let expired = sweeper.await.unwrap();

    // Exactly one side transitions the lease; the unit comes back exactly once.
    assert_eq!(resolved.is_ok() as usize + expired, 1);
    assert_eq!(available(&state, bed_id).await, 5);

    let status = service.get(lease.id).await.unwrap().status;
    assert!(status == LeaseStatus::Cancelled || status == LeaseStatus::Expired);
}

#[tokio::test]
async fn expired_lease_rejects_late_resolution() {
    let (state, hospital_id, _) = state_with_bed(5, 5).await;
    let service = LeaseService::new(Arc::clone(&state));

    let lease = service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();
    service
        .expire_due(lease.expires_at + Duration::minutes(1))
        .await;

    assert_matches!(
        service.resolve(lease.id, LeaseOutcome::Arrived).await,
        Err(LeaseError::InvalidTransition {
            current: LeaseStatus::Expired
        })
    );
}

#[tokio::test]
async fn listings_are_scoped_and_newest_first() {
    let (state, hospital_id, _) = state_with_bed(10, 10).await;
    let service = LeaseService::new(Arc::clone(&state));

    let patient = Uuid::new_v4();
    let first = service.reserve(reserve_request(patient, hospital_id)).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = service.reserve(reserve_request(patient, hospital_id)).await.unwrap();
    service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();

    let mine = service.list_for_patient(patient).await;
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].id, second.id);
    assert_eq!(mine[1].id, first.id);

    assert_eq!(service.list_for_hospital(hospital_id).await.len(), 3);
    assert!(service.list_for_hospital(Uuid::new_v4()).await.is_empty());
}

#[tokio::test]
async fn sweep_pass_expires_overdue_leases() {
    let config = AppConfig {
        lease_ttl_minutes: 0,
        ..AppConfig::default()
    };
    let (state, hospital_id, bed_id) = state_with_bed_and_config(5, 5, config).await;
    let service = LeaseService::new(Arc::clone(&state));

    // TTL of zero makes the lease overdue the moment it is created.
    service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();
    assert_eq!(available(&state, bed_id).await, 4);

    let sweep = ExpirySweepService::new(Arc::clone(&state));
    assert_eq!(sweep.run_once().await, 1);
    assert_eq!(available(&state, bed_id).await, 5);
    assert_eq!(sweep.run_once().await, 0);
}

#[tokio::test]
async fn sweep_continues_past_a_failed_inventory_return() {
    let (state, hospital_id, icu_bed_id) = state_with_bed(5, 5).await;
    let inventory = InventoryService::new(Arc::clone(&state));
    let ward_bed = inventory
        .upsert_bed_type(
            hospital_id,
            UpsertBedTypeRequest {
                bed_type: "General Ward".to_string(),
                total_count: 4,
                available_count: 4,
                price: 100.0,
            },
        )
        .await
        .unwrap();
    let service = LeaseService::new(Arc::clone(&state));

    let icu_lease = service
        .reserve(reserve_request(Uuid::new_v4(), hospital_id))
        .await
        .unwrap();
    let mut ward_request = reserve_request(Uuid::new_v4(), hospital_id);
    ward_request.bed_type = "General Ward".to_string();
    let ward_lease = service.reserve(ward_request).await.unwrap();

    // A staff edit refills the ICU row, so returning its held unit would
    // push the count past the total.
    inventory
        .upsert_bed_type(
            hospital_id,
            UpsertBedTypeRequest {
                bed_type: "ICU".to_string(),
                total_count: 5,
                available_count: 5,
                price: 500.0,
            },
        )
        .await
        .unwrap();

    let after_deadline = ward_lease.expires_at + Duration::minutes(1);
    let expired = service.expire_due(after_deadline).await;

    // The ICU settlement fails, but the pass keeps going: both leases end up
    // Expired and the healthy unit still comes back.
    assert_eq!(expired, 1);
    assert_eq!(
        service.get(icu_lease.id).await.unwrap().status,
        LeaseStatus::Expired
    );
    assert_eq!(
        service.get(ward_lease.id).await.unwrap().status,
        LeaseStatus::Expired
    );
    assert_eq!(available(&state, ward_bed.id).await, 4);
    assert_eq!(available(&state, icu_bed_id).await, 5);
}
