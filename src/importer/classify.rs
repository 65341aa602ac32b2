// src/importer/classify.rs

use crate::domain::{
    InventoryRecord, InventoryStatus, LeadRecord, NormalizedRecord, PipelineStage,
    DEFAULT_LEAD_SOURCE, DEFAULT_PROPERTY_TYPE, LEAD_TYPE_TAG,
};
use crate::importer::aliases::{Field, RecordKind};
use crate::importer::resolve::ResolvedRow;
use std::fmt;

/// Words in a `type` cell that mark the row as a property rather than a lead.
const PROPERTY_TYPE_HINTS: [&str; 5] = ["apartment", "land", "commercial", "house", "villa"];

/// Why a row produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Lead row without a name (or title) value.
    MissingLeadName,
    /// Inventory row without a title (or name) value.
    MissingTitle,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingLeadName => write!(f, "no name column for lead"),
            SkipReason::MissingTitle => write!(f, "no title column for inventory"),
        }
    }
}

/// Picks the collection for a row. A `type` cell overrides the declared default:
/// anything mentioning "lead" is a lead, known property kinds are inventory.
pub fn classify(resolved: &ResolvedRow, default_kind: RecordKind) -> RecordKind {
    let Some(type_hint) = resolved.text(Field::Type) else {
        return default_kind;
    };
    let type_hint = type_hint.to_lowercase();

    if type_hint.contains("lead") {
        RecordKind::Leads
    } else if PROPERTY_TYPE_HINTS.iter().any(|t| type_hint.contains(t)) {
        RecordKind::Inventory
    } else {
        default_kind
    }
}

/// Classifies a resolved row and builds its normalized record.
///
/// Pure function of its inputs: running it twice on the same row yields equal records.
pub fn build_record(
    resolved: &ResolvedRow,
    default_kind: RecordKind,
) -> Result<NormalizedRecord, SkipReason> {
    match classify(resolved, default_kind) {
        RecordKind::Leads => build_lead(resolved).map(NormalizedRecord::Lead),
        RecordKind::Inventory => build_inventory(resolved).map(NormalizedRecord::Inventory),
    }
}

/// Resolved text for `primary`, falling back to `secondary`.
fn text_or(resolved: &ResolvedRow, primary: Field, secondary: Field) -> Option<String> {
    resolved
        .text(primary)
        .or_else(|| resolved.text(secondary))
}

fn amount_or(resolved: &ResolvedRow, primary: Field, secondary: Field) -> Option<f64> {
    resolved
        .amount(primary)
        .or_else(|| resolved.amount(secondary))
}

fn build_lead(resolved: &ResolvedRow) -> Result<LeadRecord, SkipReason> {
    // A row reclassified from an inventory import carries title/location/price instead.
    let name = text_or(resolved, Field::Name, Field::Title).ok_or(SkipReason::MissingLeadName)?;

    let (status, source) = disambiguate_status_source(
        resolved.text(Field::Status),
        resolved.text(Field::Source),
    );

    Ok(LeadRecord {
        name,
        phone: text_or(resolved, Field::Phone, Field::Location),
        email: resolved.text(Field::Email),
        budget: amount_or(resolved, Field::Budget, Field::Price),
        status,
        source,
        record_type: LEAD_TYPE_TAG.to_string(),
        property_interest: resolved.text(Field::PropertyInterest),
    })
}

/// Splits a hybrid "source/status" column into a pipeline stage and a lead source.
///
/// Status is checked first. A status that isn't a stage is really a source value, so the
/// stage resets to `New` and the source keeps that text. Otherwise, a source that is itself
/// a stage resets to the default source. At most one of the two corrections applies.
pub fn disambiguate_status_source(
    status: Option<String>,
    source: Option<String>,
) -> (PipelineStage, String) {
    let source = source.unwrap_or_else(|| DEFAULT_LEAD_SOURCE.to_string());

    let stage = match status {
        None => Some(PipelineStage::New),
        Some(raw) => PipelineStage::from_label(&raw),
    };

    match stage {
        None => (PipelineStage::New, source),
        Some(stage) if PipelineStage::from_label(&source).is_some() => {
            (stage, DEFAULT_LEAD_SOURCE.to_string())
        }
        Some(stage) => (stage, source),
    }
}

fn build_inventory(resolved: &ResolvedRow) -> Result<InventoryRecord, SkipReason> {
    let title = text_or(resolved, Field::Title, Field::Name).ok_or(SkipReason::MissingTitle)?;

    Ok(InventoryRecord {
        title,
        location: text_or(resolved, Field::Location, Field::Phone),
        price: amount_or(resolved, Field::Price, Field::Budget),
        property_type: resolved
            .text(Field::Type)
            .unwrap_or_else(|| DEFAULT_PROPERTY_TYPE.to_string()),
        status: resolved
            .text(Field::Status)
            .map(|s| InventoryStatus::from_label_or_default(&s))
            .unwrap_or_default(),
        sqft: resolved.amount(Field::Sqft),
    })
}
