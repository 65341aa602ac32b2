// src/spreadsheets/format.rs

use crate::errors::ServerError;
use mime::Mime;
use std::path::Path;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// How an uploaded or fetched file should be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    /// Any binary workbook calamine understands (.xlsx, .xlsm, .xls, .ods).
    Workbook,
}

impl SheetFormat {
    pub fn from_extension(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(SheetFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SheetFormat::Workbook),
            _ => None,
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime: Mime = content_type.parse().ok()?;
        match (mime.type_().as_str(), mime.subtype().as_str()) {
            ("text", "csv") | ("text", "plain") => Some(SheetFormat::Csv),
            ("application", "vnd.ms-excel")
            | ("application", "vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            | ("application", "vnd.oasis.opendocument.spreadsheet") => {
                Some(SheetFormat::Workbook)
            }
            _ => None,
        }
    }

    /// Recognizes binary workbooks by their container magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            Some(SheetFormat::Workbook)
        } else {
            None
        }
    }

    /// Content wins over naming: magic bytes first, then filename, then Content-Type.
    /// A file claimed to be a workbook without workbook magic is rejected.
    pub fn detect(
        bytes: &[u8],
        filename: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<Self, ServerError> {
        if let Some(format) = Self::sniff(bytes) {
            return Ok(format);
        }

        let hinted = filename
            .and_then(Self::from_extension)
            .or_else(|| content_type.and_then(Self::from_content_type));

        match hinted {
            Some(SheetFormat::Workbook) => Err(ServerError::Decode(
                "not a valid spreadsheet: workbook signature missing".into(),
            )),
            _ if looks_binary(bytes) => Err(ServerError::Decode(
                "not a valid spreadsheet: unrecognized binary file".into(),
            )),
            _ => Ok(SheetFormat::Csv),
        }
    }
}

fn looks_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(1024).any(|b| *b == 0)
}
