use crate::db::documents::{list_documents, Collection};
use crate::db::Database;
use crate::errors::ServerError;
use crate::importer::{import_file, preview_rows, ImportReport, RecordKind};
use crate::remote::SheetFetcher;
use crate::responses::{json_response, ResultResp};
use crate::spreadsheets::{decode_table, SheetFormat};
use astra::Request;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::io::Read;
use tracing::info;

/// Uploads larger than this are rejected before decoding.
const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Everything a request handler needs, shared by all workers.
pub struct AppState {
    pub db: Database,
    pub fetcher: SheetFetcher,
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => json_response(200, &json!({ "message": "Prop-Pulse Backend Active" })),

        ("POST", "/api/import/parse") => parse_import(req),
        ("POST", "/api/import") => import_upload(req, state),
        ("POST", "/api/import/url") => import_from_url(req, state),

        ("GET", "/api/leads") => list_collection(state, Collection::Leads),
        ("GET", "/api/inventory") => list_collection(state, Collection::Inventory),

        _ => Err(ServerError::NotFound),
    }
}

/// POST /api/import/parse?type=leads. Decodes and resolves headers, stores nothing.
fn parse_import(req: Request) -> ResultResp {
    let params = parse_query(&req);
    let kind = import_kind(params.get("type").map(String::as_str))?;
    let hints = UploadHints::from_request(&req, &params);
    let bytes = read_upload(req)?;

    let rows = decode_table(&bytes, hints.detect(&bytes)?)?;
    let data: Vec<Value> = preview_rows(&rows, kind)
        .iter()
        .map(|resolved| -> Result<Value, ServerError> {
            let mut obj = Map::new();
            for (field, value) in resolved.iter() {
                obj.insert(field.key().to_string(), serde_json::to_value(value)?);
            }
            Ok(Value::Object(obj))
        })
        .collect::<Result<_, _>>()?;

    json_response(200, &json!({ "count": data.len(), "data": data }))
}

/// POST /api/import?type=leads&userId=..&filename=.. with the raw file as body.
fn import_upload(req: Request, state: &AppState) -> ResultResp {
    let params = parse_query(&req);
    let kind = import_kind(params.get("type").map(String::as_str))?;
    let owner_id = params.get("userId").cloned();
    let hints = UploadHints::from_request(&req, &params);
    let bytes = read_upload(req)?;

    let report = import_file(&state.db, &bytes, hints.detect(&bytes)?, kind, owner_id.as_deref())?;
    info!(kind = %kind, created = report.created(), "file import complete");

    import_response(&report, "Successfully imported {count} items")
}

#[derive(Debug, Deserialize)]
struct UrlImportRequest {
    url: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

/// POST /api/import/url with `{"url": .., "type": .., "userId": ..}`.
fn import_from_url(mut req: Request, state: &AppState) -> ResultResp {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_UPLOAD_BYTES)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("failed to read body: {e}")))?;

    let payload: UrlImportRequest = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("invalid JSON body: {e}")))?;

    let url = payload
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("URL is required".into()))?;
    let kind = import_kind(payload.kind.as_deref())?;
    SheetFetcher::parse_url(&url).map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let sheet = state.fetcher.fetch(&url)?;
    let format = SheetFormat::detect(
        &sheet.bytes,
        sheet.filename.as_deref(),
        sheet.content_type.as_deref(),
    )?;

    let report = import_file(&state.db, &sheet.bytes, format, kind, payload.user_id.as_deref())?;
    info!(kind = %kind, created = report.created(), "url import complete");

    import_response(&report, "Successfully synced {count} items from Sheet")
}

fn list_collection(state: &AppState, collection: Collection) -> ResultResp {
    let docs = state
        .db
        .with_conn(|conn| list_documents(conn, collection))?;
    json_response(200, &docs)
}

fn import_response(report: &ImportReport, message_template: &str) -> ResultResp {
    let count = report.created();
    json_response(
        200,
        &json!({
            "message": message_template.replace("{count}", &count.to_string()),
            "count": count,
            "skipped": report.skipped(),
            "failed": report.failures(),
        }),
    )
}

/// A missing type means leads; anything unknown is rejected.
fn import_kind(raw: Option<&str>) -> Result<RecordKind, ServerError> {
    match raw {
        None => Ok(RecordKind::default()),
        Some(s) if s.trim().is_empty() => Ok(RecordKind::default()),
        Some(s) => s.parse(),
    }
}

/// Filename and Content-Type, captured before the body is consumed.
struct UploadHints {
    filename: Option<String>,
    content_type: Option<String>,
}

impl UploadHints {
    fn from_request(req: &Request, params: &HashMap<String, String>) -> Self {
        Self {
            filename: params.get("filename").cloned(),
            content_type: req
                .headers()
                .get("Content-Type")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        }
    }

    fn detect(&self, bytes: &[u8]) -> Result<SheetFormat, ServerError> {
        SheetFormat::detect(bytes, self.filename.as_deref(), self.content_type.as_deref())
    }
}

fn read_upload(mut req: Request) -> Result<Vec<u8>, ServerError> {
    let mut bytes = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_UPLOAD_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| ServerError::BadRequest(format!("failed to read upload: {e}")))?;

    if bytes.is_empty() {
        return Err(ServerError::BadRequest("No file uploaded".into()));
    }
    if bytes.len() as u64 > MAX_UPLOAD_BYTES {
        return Err(ServerError::BadRequest("file too large".into()));
    }
    Ok(bytes)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
