// libs/shared/models/src/records.rs
//
// Persisted rows shared by the cells. One table per entity, rows keyed by
// Uuid; bed types are additionally unique per (hospital_id, bed_type).
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub contact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedType {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub bed_type: String,
    pub total_count: i64,
    pub available_count: i64,
    pub price: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A time-bounded hold on one unit of bed inventory, tied to exactly one
/// patient and one bed type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lease {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub hospital_id: Uuid,
    pub bed_id: Uuid,
    pub bed_type: String,
    pub status: LeaseStatus,
    pub urgency: Urgency,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    Pending,
    Arrived,
    Cancelled,
    Rejected,
    Expired,
}

impl LeaseStatus {
    /// Terminal leases are immutable; only Pending can move.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaseStatus::Pending)
    }

    /// Whether reaching this status returns the held unit to the pool.
    /// Arrived consumes the unit permanently.
    pub fn releases_bed(&self) -> bool {
        matches!(
            self,
            LeaseStatus::Cancelled | LeaseStatus::Rejected | LeaseStatus::Expired
        )
    }
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaseStatus::Pending => write!(f, "pending"),
            LeaseStatus::Arrived => write!(f, "arrived"),
            LeaseStatus::Cancelled => write!(f, "cancelled"),
            LeaseStatus::Rejected => write!(f, "rejected"),
            LeaseStatus::Expired => write!(f, "expired"),
        }
    }
}

/// Informational metadata surfaced to staff; never a scheduling input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    High,
    Critical,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Normal => write!(f, "normal"),
            Urgency::High => write!(f, "high"),
            Urgency::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub appointment_no: String,
    pub patient_id: Uuid,
    pub hospital_id: Uuid,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    CheckedIn,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::CheckedIn => write!(f, "checked_in"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Roster row consumed read-only by the scheduler. Staff flip
/// `is_available`; the core surfaces it as advice, never a hard block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub name: String,
    pub specialization: String,
    pub schedule: String,
    pub is_available: bool,
}
