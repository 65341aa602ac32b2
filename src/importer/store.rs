// src/importer/store.rs

use crate::domain::{InventoryRecord, LeadRecord, NormalizedRecord};
use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identity assigned by the store when a document is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// Where normalized records end up. The owner id is passed through untouched.
pub trait RecordStore {
    fn create_lead(
        &self,
        lead: &LeadRecord,
        owner_id: Option<&str>,
    ) -> Result<StoredRecord, ServerError>;

    fn create_inventory_item(
        &self,
        item: &InventoryRecord,
        owner_id: Option<&str>,
    ) -> Result<StoredRecord, ServerError>;

    fn create(
        &self,
        record: &NormalizedRecord,
        owner_id: Option<&str>,
    ) -> Result<StoredRecord, ServerError> {
        match record {
            NormalizedRecord::Lead(lead) => self.create_lead(lead, owner_id),
            NormalizedRecord::Inventory(item) => self.create_inventory_item(item, owner_id),
        }
    }
}
