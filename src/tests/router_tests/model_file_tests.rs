// src/tests/router_tests/model_file_tests.rs
use crate::errors::ServerError;
use crate::model::{LoadPolicy, ModelError};
use crate::router::handle;
use crate::tests::utils::{
    json_body, linear_model, post_json, state_with_policy, tree_model, TempModel, SAMPLE_BODY,
    SAMPLE_LINEAR_PRICE,
};
use std::fs;
use std::time::{Duration, SystemTime};

#[test]
fn missing_model_file_is_reported() {
    let model = TempModel::new("absent");
    let state = state_with_policy(model.path(), LoadPolicy::EveryRequest);

    let err = handle(post_json(SAMPLE_BODY), &state).unwrap_err();

    assert_eq!(err.status(), 500);
    assert!(matches!(err, ServerError::Model(ModelError::NotFound(_))));
    assert!(err.to_string().starts_with("Model file not found."));
}

#[test]
fn corrupt_model_file_is_a_server_error() {
    let model = TempModel::new("corrupt");
    fs::write(model.path(), b"\x80\x04\x95\x00 definitely not a model").unwrap();
    let state = state_with_policy(model.path(), LoadPolicy::EveryRequest);

    let err = handle(post_json(SAMPLE_BODY), &state).unwrap_err();

    assert_eq!(err.status(), 500);
    assert!(matches!(err, ServerError::Model(ModelError::Decode(_))));
}

#[test]
fn model_fitted_on_other_features_fails() {
    let model = TempModel::new("mismatch");
    fs::write(
        model.path(),
        br#"{"kind": "linear", "feature_names": ["grade"], "coefficients": [[1.0]], "intercept": [0.0]}"#,
    )
    .unwrap();
    let state = state_with_policy(model.path(), LoadPolicy::EveryRequest);

    let err = handle(post_json(SAMPLE_BODY), &state).unwrap_err();

    assert!(matches!(
        err,
        ServerError::Model(ModelError::FeatureMismatch { .. })
    ));
}

#[test]
fn every_request_policy_sees_replaced_file() {
    let model = TempModel::with_artifact("reload", &linear_model());
    let state = state_with_policy(model.path(), LoadPolicy::EveryRequest);

    let first = json_body(handle(post_json(SAMPLE_BODY), &state).unwrap());
    model.write(&tree_model());
    let second = json_body(handle(post_json(SAMPLE_BODY), &state).unwrap());

    assert_eq!(first["predicted_price"].as_f64(), Some(SAMPLE_LINEAR_PRICE));
    assert_eq!(second["predicted_price"].as_f64(), Some(150_000.0));
    assert!(!state.models.is_cached());
}

#[test]
fn cached_policy_reuses_model_while_mtime_unchanged() {
    let pinned = SystemTime::now() - Duration::from_secs(3600);
    let model = TempModel::with_artifact("cached_same", &linear_model());
    model.set_modified(pinned);
    let state = state_with_policy(model.path(), LoadPolicy::Cached);

    let first = json_body(handle(post_json(SAMPLE_BODY), &state).unwrap());
    model.write(&tree_model());
    model.set_modified(pinned);
    let second = json_body(handle(post_json(SAMPLE_BODY), &state).unwrap());

    assert_eq!(first["predicted_price"].as_f64(), Some(SAMPLE_LINEAR_PRICE));
    assert_eq!(second["predicted_price"].as_f64(), Some(SAMPLE_LINEAR_PRICE));
}

#[test]
fn cached_policy_reloads_when_mtime_changes() {
    let model = TempModel::with_artifact("cached", &linear_model());
    let state = state_with_policy(model.path(), LoadPolicy::Cached);

    let first = json_body(handle(post_json(SAMPLE_BODY), &state).unwrap());
    assert!(state.models.is_cached());

    model.write(&tree_model());
    model.set_modified(SystemTime::now() + Duration::from_secs(60));
    let second = json_body(handle(post_json(SAMPLE_BODY), &state).unwrap());

    assert_eq!(first["predicted_price"].as_f64(), Some(SAMPLE_LINEAR_PRICE));
    assert_eq!(second["predicted_price"].as_f64(), Some(150_000.0));
}

#[test]
fn cached_policy_forgets_deleted_file() {
    let model = TempModel::with_artifact("cached_gone", &linear_model());
    let state = state_with_policy(model.path(), LoadPolicy::Cached);

    assert!(handle(post_json(SAMPLE_BODY), &state).is_ok());
    fs::remove_file(model.path()).unwrap();
    let err = handle(post_json(SAMPLE_BODY), &state).unwrap_err();

    assert!(matches!(err, ServerError::Model(ModelError::NotFound(_))));
    assert!(!state.models.is_cached());
}
