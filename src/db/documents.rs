// src/db/documents.rs
use crate::db::connection::Database;
use crate::db::ids::generate_document_id_default;
use crate::domain::{InventoryRecord, LeadRecord};
use crate::errors::ServerError;
use crate::importer::{RecordStore, StoredRecord};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use serde_json::{Map, Value};

/// The two document collections. Each is a table of JSON documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Leads,
    Inventory,
}

impl Collection {
    fn table(self) -> &'static str {
        match self {
            Collection::Leads => "leads",
            Collection::Inventory => "inventory",
        }
    }
}

/// Stores `doc` as a new document and returns its assigned identity.
pub fn insert_document<T: Serialize>(
    conn: &Connection,
    collection: Collection,
    doc: &T,
    owner_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<StoredRecord, ServerError> {
    let id = generate_document_id_default();
    let data = serde_json::to_string(doc)?;

    let sql = format!(
        "INSERT INTO {} (id, owner_id, created_at, data) VALUES (?1, ?2, ?3, ?4)",
        collection.table()
    );
    conn.execute(&sql, params![&id, owner_id, now, &data])?;

    Ok(StoredRecord {
        id,
        created_at: now,
    })
}

/// All documents in a collection, oldest first, flattened as `{id, ...data, createdAt, ownerId}`.
pub fn list_documents(conn: &Connection, collection: Collection) -> Result<Vec<Value>, ServerError> {
    let sql = format!(
        "SELECT id, owner_id, created_at, data FROM {} ORDER BY created_at, rowid",
        collection.table()
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, DateTime<Utc>>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (id, owner_id, created_at, data) = r?;

        let mut doc = Map::new();
        doc.insert("id".into(), Value::String(id));
        if let Value::Object(fields) = serde_json::from_str(&data)? {
            doc.extend(fields);
        }
        doc.insert("createdAt".into(), Value::String(created_at.to_rfc3339()));
        if let Some(owner) = owner_id {
            doc.insert("ownerId".into(), Value::String(owner));
        }
        out.push(Value::Object(doc));
    }
    Ok(out)
}

impl RecordStore for Database {
    fn create_lead(
        &self,
        lead: &LeadRecord,
        owner_id: Option<&str>,
    ) -> Result<StoredRecord, ServerError> {
        self.with_conn(|conn| insert_document(conn, Collection::Leads, lead, owner_id, Utc::now()))
    }

    fn create_inventory_item(
        &self,
        item: &InventoryRecord,
        owner_id: Option<&str>,
    ) -> Result<StoredRecord, ServerError> {
        self.with_conn(|conn| {
            insert_document(conn, Collection::Inventory, item, owner_id, Utc::now())
        })
    }
}
