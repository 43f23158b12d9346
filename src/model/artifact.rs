use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{FeatureFrame, LinearModel, ModelError, Regressor, TreeEnsemble};

/// A decoded model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    /// Decode and validate an artifact from raw file bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Read the file at `path` and decode it.
    pub fn read(path: &Path) -> Result<Self, ModelError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ModelError::NotFound(path.to_path_buf()),
            _ => ModelError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::from_slice(&bytes)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ModelArtifact::Linear(m) => m.validate(),
            ModelArtifact::TreeEnsemble(m) => m.validate(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::TreeEnsemble(_) => "tree_ensemble",
        }
    }
}

impl Regressor for ModelArtifact {
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>, ModelError> {
        match self {
            ModelArtifact::Linear(m) => m.predict(frame),
            ModelArtifact::TreeEnsemble(m) => m.predict(frame),
        }
    }
}
