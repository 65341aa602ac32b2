// src/importer/pipeline.rs

use crate::errors::ServerError;
use crate::importer::aliases::{Field, RecordKind};
use crate::importer::cell::RawRow;
use crate::importer::classify::{build_record, SkipReason};
use crate::importer::resolve::{resolve_row, ResolvedRow};
use crate::importer::store::{RecordStore, StoredRecord};
use crate::spreadsheets::{decode_table, SheetFormat};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Row number assumed for the first data row when the decoder recorded no sheet position
/// (row 1 holds the headers).
const FIRST_DATA_ROW: usize = 2;

/// Defaults shown by the parse preview for lead rows before classification runs.
const PREVIEW_LEAD_STATUS: &str = "New";
const PREVIEW_LEAD_SOURCE: &str = "Imported";

/// What happened to one data row.
#[derive(Debug)]
pub enum RowOutcome {
    Created { row: usize, stored: StoredRecord },
    Skipped { row: usize, reason: SkipReason },
    Failed { row: usize, label: String, error: ServerError },
}

/// A row the store refused, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedRow {
    pub row: usize,
    pub label: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub outcomes: Vec<RowOutcome>,
}

impl ImportReport {
    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Created { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Skipped { .. }))
            .count()
    }

    pub fn failures(&self) -> Vec<FailedRow> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                RowOutcome::Failed { row, label, error } => Some(FailedRow {
                    row: *row,
                    label: label.clone(),
                    error: error.to_string(),
                }),
                _ => None,
            })
            .collect()
    }
}

/// Normalizes and stores decoded rows one at a time, in order.
///
/// Rows without an identifying field are skipped silently. A store failure is recorded
/// against its row and the import carries on with the next one.
pub fn import_rows<S>(
    store: &S,
    rows: &[RawRow],
    default_kind: RecordKind,
    owner_id: Option<&str>,
) -> ImportReport
where
    S: RecordStore + ?Sized,
{
    let mut report = ImportReport::default();

    for (idx, raw) in rows.iter().enumerate() {
        let row = raw.sheet_row().unwrap_or(idx + FIRST_DATA_ROW);
        let resolved = resolve_row(raw, default_kind);

        let record = match build_record(&resolved, default_kind) {
            Ok(record) => record,
            Err(reason) => {
                debug!(row, %reason, "skipping row");
                report.outcomes.push(RowOutcome::Skipped { row, reason });
                continue;
            }
        };

        match store.create(&record, owner_id) {
            Ok(stored) => report.outcomes.push(RowOutcome::Created { row, stored }),
            Err(error) => {
                warn!(row, label = record.label(), %error, "failed to store imported row");
                report.outcomes.push(RowOutcome::Failed {
                    row,
                    label: record.label().to_string(),
                    error,
                });
            }
        }
    }

    info!(
        kind = %default_kind,
        rows = rows.len(),
        created = report.created(),
        skipped = report.skipped(),
        failed = report.outcomes.len() - report.created() - report.skipped(),
        "import finished"
    );
    report
}

/// Decodes a file and imports its first sheet. A decode failure aborts before any
/// record is created.
pub fn import_file<S>(
    store: &S,
    bytes: &[u8],
    format: SheetFormat,
    default_kind: RecordKind,
    owner_id: Option<&str>,
) -> Result<ImportReport, ServerError>
where
    S: RecordStore + ?Sized,
{
    let rows = decode_table(bytes, format)?;
    Ok(import_rows(store, &rows, default_kind, owner_id))
}

/// Header resolution only, with the bare lead defaults filled in. Nothing is stored.
pub fn preview_rows(rows: &[RawRow], kind: RecordKind) -> Vec<ResolvedRow> {
    rows.iter()
        .map(|raw| {
            let mut resolved = resolve_row(raw, kind);
            if kind == RecordKind::Leads {
                resolved.set_default(Field::Status, PREVIEW_LEAD_STATUS);
                resolved.set_default(Field::Source, PREVIEW_LEAD_SOURCE);
            }
            resolved
        })
        .collect()
}
