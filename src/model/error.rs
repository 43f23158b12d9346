use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(
        "Model file not found. Ensure '{}' is in the same directory as the server binary.",
        file_name(.0)
    )]
    NotFound(PathBuf),
    #[error("failed to read model file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to decode model artifact: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    Invalid(String),
    #[error("feature names do not match those the model was fitted with: expected {expected:?}, got {got:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },
    #[error("row {row} has {got} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("model returned no predictions")]
    EmptyPrediction,
    #[error("model produced a non-finite prediction: {0}")]
    NonFinite(f64),
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl ModelError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ModelError::Invalid(msg.into())
    }
}
