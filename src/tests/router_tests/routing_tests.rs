// src/tests/router_tests/routing_tests.rs
use crate::errors::ServerError;
use crate::model::LoadPolicy;
use crate::router::handle;
use crate::tests::utils::{json_body, linear_model, state_with_model, state_with_policy, TempModel};
use astra::Body;
use http::{Method, Request};

fn request(method: Method, uri: &str) -> astra::Request {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn unknown_path_is_not_found() {
    let state = state_with_model("routing_404", &linear_model());

    let err = handle(request(Method::POST, "/predict"), &state).unwrap_err();

    assert!(matches!(err, ServerError::NotFound));
    assert_eq!(err.status(), 404);
}

#[test]
fn get_on_root_is_not_allowed() {
    let state = state_with_model("routing_405", &linear_model());

    let err = handle(request(Method::GET, "/"), &state).unwrap_err();

    assert!(matches!(err, ServerError::MethodNotAllowed));
    assert_eq!(err.status(), 405);
}

#[test]
fn health_reports_model_presence() {
    let state = state_with_model("health", &linear_model());

    let resp = handle(request(Method::GET, "/health"), &state).unwrap();

    assert_eq!(resp.status(), 200);
    let body = json_body(resp);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_present"], true);
    assert_eq!(body["model_path"], state.models.path().display().to_string());
}

#[test]
fn health_does_not_need_the_model() {
    let model = TempModel::new("health_absent");
    let state = state_with_policy(model.path(), LoadPolicy::EveryRequest);

    let resp = handle(request(Method::GET, "/health"), &state).unwrap();

    assert_eq!(resp.status(), 200);
    let body = json_body(resp);
    assert_eq!(body["model_present"], false);
    assert_eq!(body["model_path"], model.path().display().to_string());
}
