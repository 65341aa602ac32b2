use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::init_test_state;
use astra::Body;
use http::{Method, Request};
use std::io::Read;

fn get(uri: &str) -> astra::Request {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn root_reports_liveness() {
    let state = init_test_state();
    let resp = handle(get("/"), &state).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    assert!(body.contains("Prop-Pulse Backend Active"));
}

#[test]
fn empty_collections_list_as_empty_arrays() {
    let state = init_test_state();

    for uri in ["/api/leads", "/api/inventory"] {
        let resp = handle(get(uri), &state).expect("Handler failed");
        let mut body = String::new();
        resp.into_body().reader().read_to_string(&mut body).unwrap();
        assert_eq!(body, "[]", "{uri} should start empty");
    }
}

#[test]
fn unknown_route_is_not_found() {
    let state = init_test_state();
    assert!(matches!(
        handle(get("/api/contacts"), &state),
        Err(ServerError::NotFound)
    ));
}
