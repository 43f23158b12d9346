// errors.rs
use crate::domain::FeatureError;
use crate::model::ModelError;
use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, request decoding, etc.) or downstream layers (features, model).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    BadRequest(String),
    #[error("Request body exceeds {0} bytes.")]
    PayloadTooLarge(usize),
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("{0}")]
    InternalError(String),
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn not_json() -> Self {
        ServerError::BadRequest("Request body must be JSON.".into())
    }

    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::BadRequest(_) => 400,
            ServerError::PayloadTooLarge(_) => 413,
            // Missing keys are a client mistake; bad values are not caught before the model path.
            ServerError::Feature(FeatureError::Missing(_)) => 400,
            ServerError::Feature(_) => 500,
            ServerError::Model(_) => 500,
            ServerError::InternalError(_) => 500,
        }
    }
}
