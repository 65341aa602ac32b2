// src/spreadsheets/decode.rs

use crate::errors::ServerError;
use crate::importer::cell::{CellValue, RawRow};
use crate::spreadsheets::format::SheetFormat;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes the first sheet of a workbook or a CSV file into header-keyed rows.
///
/// The first row holds the headers. Columns with a blank header are dropped, and so are
/// rows where every cell is blank. Each row keeps its 1-based row number in the sheet.
pub fn decode_table(bytes: &[u8], format: SheetFormat) -> Result<Vec<RawRow>, ServerError> {
    match format {
        SheetFormat::Csv => decode_csv(bytes),
        SheetFormat::Workbook => decode_workbook(bytes),
    }
}

fn decode_workbook(bytes: &[u8]) -> Result<Vec<RawRow>, ServerError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ServerError::Decode(format!("not a valid spreadsheet: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ServerError::Decode("workbook has no sheets".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ServerError::Decode(format!("failed to read sheet '{sheet_name}': {e}")))?;

    // The range starts at the first used cell, not at A1.
    let header_row = range.start().map_or(0, |(row, _)| row as usize) + 1;

    let mut rows = range.rows();
    let Some(header_cells) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<Option<String>> = header_cells.iter().map(header_text).collect();

    Ok(collect_rows(
        &headers,
        rows.enumerate().map(|(offset, cells)| {
            (
                header_row + 1 + offset,
                cells.iter().map(cell_value).collect::<Vec<_>>(),
            )
        }),
    ))
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<RawRow>, ServerError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(bytes);

    // Byte records + lossy UTF-8 so legacy Windows exports still import.
    let headers: Vec<Option<String>> = reader
        .byte_headers()
        .map_err(|e| ServerError::Decode(format!("malformed CSV header: {e}")))?
        .iter()
        .map(|h| {
            let h = String::from_utf8_lossy(h).trim().to_string();
            (!h.is_empty()).then_some(h)
        })
        .collect();

    let mut records = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|e| ServerError::Decode(format!("malformed CSV: {e}")))?;
        // Physical line, so skipped empty lines and multi-line cells still count.
        let line = record
            .position()
            .map_or(idx + 2, |pos| pos.line() as usize);
        records.push((
            line,
            record
                .iter()
                .map(|field| CellValue::from(String::from_utf8_lossy(field).into_owned()))
                .collect::<Vec<_>>(),
        ));
    }

    Ok(collect_rows(&headers, records.into_iter()))
}

fn collect_rows<I>(headers: &[Option<String>], records: I) -> Vec<RawRow>
where
    I: Iterator<Item = (usize, Vec<CellValue>)>,
{
    records
        .map(|(sheet_row, cells)| {
            headers
                .iter()
                .zip(cells)
                .filter_map(|(header, value)| header.as_ref().map(|h| (h.clone(), value)))
                .collect::<RawRow>()
                .at_sheet_row(sheet_row)
        })
        .filter(|row| !row.is_blank())
        .collect()
}

fn header_text(cell: &Data) -> Option<String> {
    let text = cell_value(cell).as_text();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Int(i) => CellValue::from(*i as f64),
        Data::Float(f) => CellValue::from(*f),
        Data::DateTime(dt) => CellValue::from(dt.as_f64()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.as_str()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}
