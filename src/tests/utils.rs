use crate::db::connection::init_db; // <-- production schema loader
use crate::db::connection::Database;
use crate::domain::{InventoryRecord, LeadRecord, NormalizedRecord};
use crate::errors::ServerError;
use crate::importer::{RawRow, RecordStore, StoredRecord};
use crate::remote::SheetFetcher;
use crate::router::AppState;
use chrono::Utc;
use std::cell::RefCell;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Initialize a fresh test DB using the production schema
pub fn init_test_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "prop_pulse_test_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().to_string());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}

pub fn init_test_state() -> AppState {
    AppState {
        db: init_test_db(),
        fetcher: SheetFetcher::new(Duration::from_secs(5)).expect("Failed to build fetcher"),
    }
}

pub fn row(cells: &[(&str, &str)]) -> RawRow {
    cells.iter().copied().collect()
}

/// In-memory store that records what it was asked to create.
/// Records whose label is listed in `reject` fail to store.
#[derive(Default)]
pub struct MemoryStore {
    pub created: RefCell<Vec<(NormalizedRecord, Option<String>)>>,
    pub reject: Vec<String>,
}

impl MemoryStore {
    pub fn rejecting(labels: &[&str]) -> Self {
        Self {
            created: RefCell::default(),
            reject: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn records(&self) -> Vec<NormalizedRecord> {
        self.created.borrow().iter().map(|(r, _)| r.clone()).collect()
    }

    fn store(
        &self,
        record: NormalizedRecord,
        owner_id: Option<&str>,
    ) -> Result<StoredRecord, ServerError> {
        if self.reject.iter().any(|l| l == record.label()) {
            return Err(ServerError::DbError(format!("rejected {}", record.label())));
        }
        let mut created = self.created.borrow_mut();
        created.push((record, owner_id.map(str::to_string)));
        Ok(StoredRecord {
            id: format!("mem-{}", created.len()),
            created_at: Utc::now(),
        })
    }
}

impl RecordStore for MemoryStore {
    fn create_lead(
        &self,
        lead: &LeadRecord,
        owner_id: Option<&str>,
    ) -> Result<StoredRecord, ServerError> {
        self.store(NormalizedRecord::Lead(lead.clone()), owner_id)
    }

    fn create_inventory_item(
        &self,
        item: &InventoryRecord,
        owner_id: Option<&str>,
    ) -> Result<StoredRecord, ServerError> {
        self.store(NormalizedRecord::Inventory(item.clone()), owner_id)
    }
}
