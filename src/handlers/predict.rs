// src/handlers/predict.rs
use std::io::Read;

use astra::Request;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::FeatureRecord;
use crate::errors::{ResultResp, ServerError};
use crate::model;
use crate::responses::json_response;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct PredictionBody {
    predicted_price: f64,
}

/// `POST /`: validate the seven features, load the model, predict one price.
pub fn predict(req: Request, state: &AppState) -> ResultResp {
    if !declares_json(&req) {
        return Err(ServerError::not_json());
    }

    let body = read_body(req, state.config.max_body_bytes)?;
    let args = parse_json(&body)?;

    let record = FeatureRecord::from_json(&args)?;
    debug!(?record, "features accepted");

    let model = state.models.load()?;
    let predicted_price = model::predict_price(&*model, &record)?;
    debug!(predicted_price, "prediction complete");

    json_response(200, &PredictionBody { predicted_price })
}

/// A missing Content-Type is tolerated; a non-JSON one is not.
fn declares_json(req: &Request) -> bool {
    let Some(value) = req.headers().get("Content-Type") else {
        return true;
    };
    let Some(media) = value
        .to_str()
        .ok()
        .and_then(|v| v.parse::<mime::Mime>().ok())
    else {
        return false;
    };
    media.essence_str() == mime::APPLICATION_JSON.essence_str()
        || media.suffix() == Some(mime::JSON)
}

fn read_body(req: Request, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut body = req.into_body();
    let mut buf = Vec::new();
    body.reader()
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::InternalError(format!("failed to read request body: {e}")))?;

    if buf.len() > limit {
        return Err(ServerError::PayloadTooLarge(limit));
    }
    Ok(buf)
}

/// Decode the body, treating empty values (`{}`, `[]`, `""`, `0`, `false`, `null`) as no body.
fn parse_json(body: &[u8]) -> Result<Value, ServerError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ServerError::not_json())?;

    let empty = match &value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    };
    if empty {
        return Err(ServerError::not_json());
    }
    Ok(value)
}
