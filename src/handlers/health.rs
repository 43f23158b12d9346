// src/handlers/health.rs
use serde::Serialize;

use crate::errors::ResultResp;
use crate::responses::json_response;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    model_path: String,
    model_present: bool,
}

/// `GET /health`: liveness plus whether the model file is where we expect it.
/// Does not load the model.
pub fn health(state: &AppState) -> ResultResp {
    json_response(
        200,
        &HealthBody {
            status: "ok",
            model_path: state.models.path().display().to_string(),
            model_present: state.models.model_present(),
        },
    )
}
