// libs/scheduling-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentStatus, SchedulingError};

/// Transition table for appointments: strictly
/// Pending -> Checked-in -> Completed, with Cancelled reachable from Pending
/// only. The guard runs at the boundary of every mutating operation.
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_transition(
        &self,
        current: AppointmentStatus,
        target: AppointmentStatus,
    ) -> Result<(), SchedulingError> {
        debug!("Validating appointment transition {} -> {}", current, target);

        if !self.valid_transitions(current).contains(&target) {
            warn!(
                "Invalid appointment transition attempted: {} -> {}",
                current, target
            );
            return Err(SchedulingError::InvalidTransition { current, target });
        }

        Ok(())
    }

    pub fn valid_transitions(&self, current: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current {
            AppointmentStatus::Pending => {
                vec![AppointmentStatus::CheckedIn, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::CheckedIn => vec![AppointmentStatus::Completed],
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => vec![],
        }
    }
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
