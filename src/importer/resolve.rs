// src/importer/resolve.rs

use crate::importer::aliases::{Field, FieldAliases, RecordKind};
use crate::importer::cell::{CellValue, RawRow};

/// Canonical field values picked out of one raw row, in alias-table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRow {
    fields: Vec<(Field, CellValue)>,
}

impl ResolvedRow {
    pub fn get(&self, field: Field) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    /// Text of a resolved field.
    pub fn text(&self, field: Field) -> Option<String> {
        self.get(field).map(CellValue::as_text)
    }

    /// Coerced number of a resolved field.
    pub fn amount(&self, field: Field) -> Option<f64> {
        self.get(field).map(CellValue::as_amount)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &CellValue)> {
        self.fields.iter().map(|(f, v)| (*f, v))
    }

    /// Fills a field that no header supplied. Used by the parse preview defaults.
    pub fn set_default(&mut self, field: Field, value: &str) {
        if !self.contains(field) {
            self.fields.push((field, CellValue::from(value)));
        }
    }
}

/// Lower-case, trim, and treat underscores as spaces: `" Full_Name "` → `"full name"`.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace('_', " ")
}

/// A normalized header matches an alias when it equals it or contains it.
fn header_matches(normalized: &str, aliases: &[&str]) -> bool {
    aliases
        .iter()
        .any(|alias| normalized == *alias || normalized.contains(alias))
}

/// Resolves every field of `kind` against the row's headers.
///
/// Each field independently takes the first non-blank column (in row order) whose header
/// matches one of its aliases. One column may therefore feed several fields.
pub fn resolve_row(row: &RawRow, kind: RecordKind) -> ResolvedRow {
    resolve_with(row, kind.aliases())
}

pub fn resolve_with(row: &RawRow, table: &[FieldAliases]) -> ResolvedRow {
    let headers: Vec<(String, &CellValue)> = row
        .iter()
        .filter(|(_, value)| !value.is_blank())
        .map(|(header, value)| (normalize_header(header), value))
        .collect();

    let mut resolved = ResolvedRow::default();
    for entry in table {
        let found = headers
            .iter()
            .find(|(normalized, _)| header_matches(normalized, entry.aliases));

        if let Some((_, value)) = found {
            resolved.fields.push((entry.field, (*value).clone()));
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells.iter().copied().collect()
    }

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("  Full_Name "), "full name");
        assert_eq!(normalize_header("CONTACT/Location"), "contact/location");
    }

    #[test]
    fn mixed_case_and_underscores_resolve_like_canonical_alias() {
        for header in ["Full_Name", "full name", "  FULL NAME", "Full_name "] {
            let resolved = resolve_row(&row(&[(header, "Jane Doe")]), RecordKind::Leads);
            assert_eq!(
                resolved.text(Field::Name).as_deref(),
                Some("Jane Doe"),
                "header {header:?}"
            );
        }
    }

    #[test]
    fn substring_match_counts() {
        let resolved = resolve_row(
            &row(&[("Mobile No.", "99887"), ("Lead Source (FB/Google)", "FB Ads")]),
            RecordKind::Leads,
        );
        assert_eq!(resolved.text(Field::Phone).as_deref(), Some("99887"));
        assert_eq!(resolved.text(Field::Source).as_deref(), Some("FB Ads"));
    }

    #[test]
    fn first_matching_header_in_row_order_wins() {
        let resolved = resolve_row(
            &row(&[("Contact", "111"), ("Phone", "222")]),
            RecordKind::Leads,
        );
        assert_eq!(resolved.text(Field::Phone).as_deref(), Some("111"));
    }

    #[test]
    fn hybrid_column_feeds_both_fields() {
        let resolved = resolve_row(&row(&[("Source/Status", "Contacted")]), RecordKind::Leads);
        assert_eq!(resolved.text(Field::Status).as_deref(), Some("Contacted"));
        assert_eq!(resolved.text(Field::Source).as_deref(), Some("Contacted"));
    }

    #[test]
    fn blank_cells_do_not_claim_a_field() {
        let resolved = resolve_row(
            &row(&[("Phone", ""), ("Mobile", "555")]),
            RecordKind::Leads,
        );
        assert_eq!(resolved.text(Field::Phone).as_deref(), Some("555"));
    }

    #[test]
    fn unmatched_fields_are_absent() {
        let resolved = resolve_row(&row(&[("Notes", "call after 6")]), RecordKind::Inventory);
        assert!(resolved.is_empty());

        let empty = resolve_row(&RawRow::new(), RecordKind::Leads);
        assert!(empty.is_empty());
    }

    #[test]
    fn fields_follow_table_order() {
        let resolved = resolve_row(
            &row(&[("Price", "1"), ("Address", "Main St"), ("Title", "Unit 4")]),
            RecordKind::Inventory,
        );
        let fields: Vec<Field> = resolved.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::Title, Field::Location, Field::Price]);
    }
}
