pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::InventoryError;
pub use services::inventory::InventoryService;
