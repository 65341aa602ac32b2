use crate::errors::ServerError;
use crate::responses::{error_to_response, ResultResp};
use crate::router::handle;
use crate::tests::utils::init_test_state;
use astra::{Body, Response};
use http::{Method, Request};
use serde_json::Value;
use std::io::Read;

const LEADS_CSV: &str = "Full Name,Contact/Location,Budget/Price,Source/Status\n\
Jane Doe,555-1234,450000,\n\
,555-0000,1000,FB Ads\n\
Ravi Kumar,98450,\"2,500,000\",Negotiation\n";

fn post(uri: &str, content_type: &str, body: impl Into<Body>) -> astra::Request {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", content_type)
        .body(body.into())
        .unwrap()
}

fn expect_err(result: ResultResp) -> ServerError {
    match result {
        Ok(resp) => panic!("expected an error, got status {}", resp.status()),
        Err(err) => err,
    }
}

fn json_body(resp: Response) -> Value {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    serde_json::from_str(&body).unwrap()
}

#[test]
fn csv_upload_creates_leads_and_reports_skips() {
    let state = init_test_state();
    let req = post("/api/import?type=leads&userId=u1", "text/csv", LEADS_CSV);

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = json_body(resp);
    assert_eq!(body["message"], "Successfully imported 2 items");
    assert_eq!(body["count"], 2);
    assert_eq!(body["skipped"], 1);
    assert_eq!(body["failed"], Value::Array(vec![]));

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/leads")
        .body(Body::empty())
        .unwrap();
    let leads = json_body(handle(req, &state).expect("Handler failed"));
    let leads = leads.as_array().unwrap();

    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0]["name"], "Jane Doe");
    assert_eq!(leads[0]["phone"], "555-1234");
    assert_eq!(leads[0]["budget"], 450000.0);
    assert_eq!(leads[0]["status"], "New");
    assert_eq!(leads[0]["source"], "Google Sheets");
    assert_eq!(leads[0]["type"], "Lead");
    assert_eq!(leads[0]["ownerId"], "u1");
    assert_eq!(leads[0]["id"].as_str().map(str::len), Some(20));

    assert_eq!(leads[1]["name"], "Ravi Kumar");
    assert_eq!(leads[1]["status"], "Negotiation");
    assert_eq!(leads[1]["budget"], 2500000.0);
}

#[test]
fn type_hint_routes_rows_to_inventory() {
    let state = init_test_state();
    let csv = "Property Name,Price,Type\nOcean View Unit 4,620000,\nPlot 9,150000,Land\n";

    let resp = handle(post("/api/import?type=inventory", "text/csv", csv), &state)
        .expect("Handler failed");
    assert_eq!(json_body(resp)["count"], 2);

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/inventory")
        .body(Body::empty())
        .unwrap();
    let items = json_body(handle(req, &state).expect("Handler failed"));
    let items = items.as_array().unwrap();

    assert_eq!(items[0]["title"], "Ocean View Unit 4");
    assert_eq!(items[0]["type"], "Property");
    assert_eq!(items[0]["status"], "Available");
    assert_eq!(items[1]["type"], "Land");
    assert!(items[0].get("ownerId").is_none());
}

#[test]
fn parse_preview_resolves_without_storing() {
    let state = init_test_state();
    let req = post("/api/import/parse?type=leads", "text/csv", LEADS_CSV);

    let body = json_body(handle(req, &state).expect("Handler failed"));
    assert_eq!(body["count"], 3);

    let first = &body["data"][0];
    assert_eq!(first["name"], "Jane Doe");
    assert_eq!(first["phone"], "555-1234");
    assert_eq!(first["status"], "New");
    assert_eq!(first["source"], "Imported");

    let second = &body["data"][1];
    assert!(second.get("name").is_none());
    assert_eq!(second["status"], "FB Ads");

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/leads")
        .body(Body::empty())
        .unwrap();
    let leads = json_body(handle(req, &state).expect("Handler failed"));
    assert_eq!(leads, Value::Array(vec![]));
}

#[test]
fn unknown_import_type_is_bad_request() {
    let state = init_test_state();
    let req = post("/api/import?type=contacts", "text/csv", LEADS_CSV);

    let err = expect_err(handle(req, &state));
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(error_to_response(err).status(), 400);
}

#[test]
fn empty_upload_is_rejected() {
    let state = init_test_state();
    let req = post("/api/import", "text/csv", Body::empty());

    let err = expect_err(handle(req, &state));
    let resp = error_to_response(err);
    assert_eq!(resp.status(), 400);
    assert_eq!(json_body(resp)["error"], "Bad Request: No file uploaded");
}

#[test]
fn fake_workbook_is_unprocessable() {
    let state = init_test_state();
    let req = post(
        "/api/import?filename=leads.xlsx",
        "application/octet-stream",
        "Name,Phone\nJane,555\n",
    );

    let err = expect_err(handle(req, &state));
    assert!(matches!(err, ServerError::Decode(_)));
    assert_eq!(error_to_response(err).status(), 422);
}

#[test]
fn url_import_requires_url() {
    let state = init_test_state();
    let req = post(
        "/api/import/url",
        "application/json",
        r#"{"type":"leads","userId":"u1"}"#,
    );

    let err = expect_err(handle(req, &state));
    assert!(matches!(&err, ServerError::BadRequest(msg) if msg == "URL is required"));
}

#[test]
fn url_import_rejects_non_http_schemes() {
    let state = init_test_state();
    let req = post(
        "/api/import/url",
        "application/json",
        r#"{"url":"file:///etc/passwd","type":"leads"}"#,
    );

    let err = expect_err(handle(req, &state));
    assert_eq!(error_to_response(err).status(), 400);
}

#[test]
fn unreachable_url_is_bad_gateway() {
    let state = init_test_state();
    let req = post(
        "/api/import/url",
        "application/json",
        r#"{"url":"http://127.0.0.1:1/leads.csv","type":"leads"}"#,
    );

    let err = expect_err(handle(req, &state));
    assert!(matches!(err, ServerError::Fetch(_)));
    assert_eq!(error_to_response(err).status(), 502);
}

#[test]
fn malformed_url_request_body_is_bad_request() {
    let state = init_test_state();
    let req = post("/api/import/url", "application/json", "{not json");

    let err = expect_err(handle(req, &state));
    assert!(matches!(err, ServerError::BadRequest(_)));
}
