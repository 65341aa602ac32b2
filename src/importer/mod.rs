pub mod aliases;
pub mod cell;
pub mod classify;
pub mod pipeline;
pub mod resolve;
pub mod store;

pub use aliases::{Field, RecordKind};
pub use cell::{CellValue, RawRow};
pub use classify::{build_record, classify, SkipReason};
pub use pipeline::{import_file, import_rows, preview_rows, FailedRow, ImportReport, RowOutcome};
pub use resolve::{resolve_row, ResolvedRow};
pub use store::{RecordStore, StoredRecord};
