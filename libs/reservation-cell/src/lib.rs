pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{LeaseError, LeaseOutcome};
pub use services::lease::LeaseService;
pub use services::sweep::ExpirySweepService;
