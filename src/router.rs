use crate::errors::{ResultResp, ServerError};
use crate::handlers;
use crate::state::AppState;
use astra::Request;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    match (method.as_str(), path.as_str()) {
        ("POST", "/") => handlers::predict(req, state),
        ("GET", "/health") => handlers::health(state),
        (_, "/") | (_, "/health") => Err(ServerError::MethodNotAllowed),
        _ => Err(ServerError::NotFound),
    }
}
