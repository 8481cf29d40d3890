pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::SchedulingError;
pub use services::scheduling::SchedulingService;
