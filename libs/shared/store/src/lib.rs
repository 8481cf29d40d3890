pub mod table;

use std::sync::Arc;

use shared_config::AppConfig;
use shared_models::{Appointment, BedType, Doctor, Hospital, Lease};

pub use table::Table;

/// Durable record store, one table per entity. Every component goes through
/// `Table::update` for counter and status mutations; nothing reads-then-writes
/// a row outside the table's write lock.
pub struct Store {
    pub hospitals: Table<Hospital>,
    pub beds: Table<BedType>,
    pub leases: Table<Lease>,
    pub appointments: Table<Appointment>,
    pub doctors: Table<Doctor>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            hospitals: Table::new(),
            beds: Table::new(),
            leases: Table::new(),
            appointments: Table::new(),
            doctors: Table::new(),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared request state handed to every cell router.
pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            store: Store::new(),
        })
    }
}
