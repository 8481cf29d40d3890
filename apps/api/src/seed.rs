use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use shared_models::{BedType, Doctor, Hospital};
use shared_store::AppState;

/// Optional demo dataset for local development (SEED_DEMO_DATA=1). Hospital
/// and doctor registration are handled outside this core, so the demo data is
/// loaded straight into the store.
pub async fn seed_demo_data(state: &Arc<AppState>) {
    if !state.store.hospitals.all().await.is_empty() {
        info!("Demo data already present, skipping seed");
        return;
    }

    let city = Hospital {
        id: Uuid::new_v4(),
        name: "City Hospital".to_string(),
        location: "Downtown".to_string(),
        contact: "555-0101".to_string(),
    };
    let general = Hospital {
        id: Uuid::new_v4(),
        name: "General Medical Center".to_string(),
        location: "Westside".to_string(),
        contact: "555-0102".to_string(),
    };
    state.store.hospitals.insert(city.id, city.clone()).await;
    state.store.hospitals.insert(general.id, general.clone()).await;

    let now = Utc::now();
    let beds = [
        (city.id, "ICU", 20, 5, 500.0),
        (city.id, "General Ward", 100, 42, 100.0),
        (city.id, "Ventilator", 10, 2, 1000.0),
        (general.id, "General Ward", 80, 10, 120.0),
    ];
    for (hospital_id, bed_type, total, available, price) in beds {
        let bed = BedType {
            id: Uuid::new_v4(),
            hospital_id,
            bed_type: bed_type.to_string(),
            total_count: total,
            available_count: available,
            price,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.store.beds.insert(bed.id, bed).await;
    }

    let doctors = [
        (city.id, "Dr. Smith", "Cardiologist", "Mon-Fri 9AM-5PM", true),
        (city.id, "Dr. Jones", "Neurologist", "Tue, Thu 2PM-6PM", true),
    ];
    for (hospital_id, name, specialization, schedule, is_available) in doctors {
        let doctor = Doctor {
            id: Uuid::new_v4(),
            hospital_id,
            name: name.to_string(),
            specialization: specialization.to_string(),
            schedule: schedule.to_string(),
            is_available,
        };
        state.store.doctors.insert(doctor.id, doctor).await;
    }

    info!("Demo data seeded: 2 hospitals, 4 bed types, 2 doctors");
}
