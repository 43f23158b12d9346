use crate::errors::ServerError;
use crate::responses::json_response;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Convert a ServerError into a JSON `{"error": ...}` response
pub fn error_to_response(err: ServerError) -> Response {
    let body = ErrorBody {
        error: err.to_string(),
    };

    json_response(err.status(), &body).unwrap_or_else(|_| {
        ResponseBuilder::new()
            .status(500)
            .body(Body::from("{\"error\": \"Internal Server Error\"}"))
            .unwrap_or_else(|_| Response::new(Body::empty()))
    })
}
