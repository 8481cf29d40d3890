// libs/inventory-cell/src/services/inventory.rs
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::BedType;
use shared_store::AppState;

use crate::models::{
    BedSearchQuery, BedSearchResult, HospitalAnalytics, HospitalDetails, HospitalSummary,
    InventoryError, UpsertBedTypeRequest,
};

/// Authoritative bed counts per (hospital, bed type), with the single atomic
/// adjustment primitive every other component must route through.
pub struct InventoryService {
    state: Arc<AppState>,
}

impl InventoryService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Staff capacity edit. Creates the row if the (hospital, bed type) pair
    /// is new, otherwise replaces counts and price. A soft-removed row is
    /// reactivated by an edit.
    pub async fn upsert_bed_type(
        &self,
        hospital_id: Uuid,
        request: UpsertBedTypeRequest,
    ) -> Result<BedType, InventoryError> {
        if request.bed_type.trim().is_empty() {
            return Err(InventoryError::ValidationError(
                "Bed type name must not be empty".to_string(),
            ));
        }
        if request.total_count < 0 || request.available_count < 0 {
            return Err(InventoryError::ValidationError(
                "Bed counts must be non-negative".to_string(),
            ));
        }
        if request.available_count > request.total_count {
            return Err(InventoryError::ValidationError(format!(
                "Available count {} exceeds total count {}",
                request.available_count, request.total_count
            )));
        }
        if request.price < 0.0 {
            return Err(InventoryError::ValidationError(
                "Price must be non-negative".to_string(),
            ));
        }

        if self.state.store.hospitals.get(hospital_id).await.is_none() {
            return Err(InventoryError::HospitalNotFound);
        }

        let now = Utc::now();
        let bed_type_name = request.bed_type.trim().to_string();

        // Uniqueness per (hospital, bed type) is enforced under the table's
        // write lock, so two concurrent edits cannot create duplicate rows.
        let bed = self
            .state
            .store
            .beds
            .with_write(|rows| {
                if let Some(existing) = rows
                    .values_mut()
                    .find(|b| b.hospital_id == hospital_id && b.bed_type == bed_type_name)
                {
                    existing.total_count = request.total_count;
                    existing.available_count = request.available_count;
                    existing.price = request.price;
                    existing.is_active = true;
                    existing.updated_at = now;
                    return existing.clone();
                }

                let bed = BedType {
                    id: Uuid::new_v4(),
                    hospital_id,
                    bed_type: bed_type_name.clone(),
                    total_count: request.total_count,
                    available_count: request.available_count,
                    price: request.price,
                    is_active: true,
                    created_at: now,
                    updated_at: now,
                };
                rows.insert(bed.id, bed.clone());
                bed
            })
            .await;

        info!(
            "Bed inventory updated: hospital {} type {} ({}/{} available)",
            hospital_id, bed.bed_type, bed.available_count, bed.total_count
        );
        Ok(bed)
    }

    /// Soft remove. The row stays resolvable for leases that still reference
    /// it but disappears from searches and summaries.
    pub async fn remove_bed_type(&self, bed_id: Uuid) -> Result<BedType, InventoryError> {
        let updated = self
            .state
            .store
            .beds
            .update(bed_id, |bed| {
                bed.is_active = false;
                bed.updated_at = Utc::now();
                Ok::<(), InventoryError>(())
            })
            .await?;

        updated.ok_or(InventoryError::BedTypeNotFound)
    }

    /// Applies `delta` to `available_count` as one atomic unit: the bounds
    /// check and the write commit together or not at all. This is the only
    /// path allowed to mutate `available_count`. Decrements require an active
    /// row; releases stay valid after a soft remove so live leases can still
    /// return their unit.
    pub async fn adjust_available(&self, bed_id: Uuid, delta: i64) -> Result<i64, InventoryError> {
        let updated = self
            .state
            .store
            .beds
            .update(bed_id, |bed| {
                if delta < 0 && !bed.is_active {
                    return Err(InventoryError::BedTypeNotFound);
                }
                let next = bed.available_count + delta;
                if next < 0 || next > bed.total_count {
                    warn!(
                        "Rejected inventory adjustment of {} on bed {} ({} of {})",
                        delta, bed_id, bed.available_count, bed.total_count
                    );
                    return Err(InventoryError::InventoryViolation(format!(
                        "Adjustment of {} would leave available count {} outside [0, {}]",
                        delta, next, bed.total_count
                    )));
                }
                bed.available_count = next;
                bed.updated_at = Utc::now();
                Ok(())
            })
            .await?;

        match updated {
            Some(bed) => {
                debug!(
                    "Adjusted bed {} by {}: {} of {} available",
                    bed_id, delta, bed.available_count, bed.total_count
                );
                Ok(bed.available_count)
            }
            None => Err(InventoryError::BedTypeNotFound),
        }
    }

    pub async fn get_bed_type(&self, bed_id: Uuid) -> Result<BedType, InventoryError> {
        self.state
            .store
            .beds
            .get(bed_id)
            .await
            .ok_or(InventoryError::BedTypeNotFound)
    }

    /// Read-only bed search joined with hospital metadata. Only active rows
    /// with at least one free unit are listed; an empty result is a success.
    pub async fn search_beds(&self, query: BedSearchQuery) -> Vec<BedSearchResult> {
        let location = query.location.as_deref().map(str::to_lowercase);
        let beds = self
            .state
            .store
            .beds
            .filter(|bed| {
                if !bed.is_active || bed.available_count <= 0 {
                    return false;
                }
                if let Some(wanted) = &query.bed_type {
                    if &bed.bed_type != wanted {
                        return false;
                    }
                }
                if let Some(max_price) = query.max_price {
                    if bed.price > max_price {
                        return false;
                    }
                }
                true
            })
            .await;

        let mut results = Vec::new();
        for bed in beds {
            let Some(hospital) = self.state.store.hospitals.get(bed.hospital_id).await else {
                continue;
            };
            if let Some(needle) = &location {
                let matches = hospital.name.to_lowercase().contains(needle)
                    || hospital.location.to_lowercase().contains(needle);
                if !matches {
                    continue;
                }
            }
            results.push(BedSearchResult {
                bed_id: bed.id,
                bed_type: bed.bed_type,
                price: bed.price,
                available_count: bed.available_count,
                hospital_id: hospital.id,
                hospital_name: hospital.name,
                hospital_location: hospital.location,
            });
        }

        debug!("Bed search returned {} results", results.len());
        results
    }

    /// Staff detail view: the hospital row, every bed row (a soft-removed or
    /// exhausted row still shows here, unlike in search), and the roster.
    pub async fn hospital_details(
        &self,
        hospital_id: Uuid,
    ) -> Result<HospitalDetails, InventoryError> {
        let hospital = self
            .state
            .store
            .hospitals
            .get(hospital_id)
            .await
            .ok_or(InventoryError::HospitalNotFound)?;

        let mut beds = self
            .state
            .store
            .beds
            .filter(|bed| bed.hospital_id == hospital_id)
            .await;
        beds.sort_by(|a, b| a.bed_type.cmp(&b.bed_type));

        let mut doctors = self
            .state
            .store
            .doctors
            .filter(|doc| doc.hospital_id == hospital_id)
            .await;
        doctors.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(HospitalDetails {
            hospital,
            beds,
            doctors,
        })
    }

    /// Staff dashboard numbers. "Patients served" is the count of every
    /// appointment booked against the hospital; peak hours stay static until
    /// bookings carry a time of day.
    pub async fn hospital_analytics(
        &self,
        hospital_id: Uuid,
    ) -> Result<HospitalAnalytics, InventoryError> {
        if self.state.store.hospitals.get(hospital_id).await.is_none() {
            return Err(InventoryError::HospitalNotFound);
        }

        let served = self
            .state
            .store
            .appointments
            .filter(|apt| apt.hospital_id == hospital_id)
            .await
            .len();

        Ok(HospitalAnalytics {
            patients_served: served as i64,
            peak_hours: "10 AM - 2 PM".to_string(),
        })
    }

    /// Hospital list with summed free/total counts across active bed types.
    pub async fn hospital_summaries(&self) -> Vec<HospitalSummary> {
        let hospitals = self.state.store.hospitals.all().await;
        let beds = self.state.store.beds.filter(|bed| bed.is_active).await;

        hospitals
            .into_iter()
            .map(|hospital| {
                let (available, total) = beds
                    .iter()
                    .filter(|bed| bed.hospital_id == hospital.id)
                    .fold((0, 0), |(a, t), bed| {
                        (a + bed.available_count, t + bed.total_count)
                    });
                HospitalSummary {
                    id: hospital.id,
                    name: hospital.name,
                    location: hospital.location,
                    contact: hospital.contact,
                    available_beds: available,
                    total_beds: total,
                }
            })
            .collect()
    }
}
