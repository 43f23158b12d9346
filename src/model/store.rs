use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use tracing::debug;

use super::{ModelArtifact, ModelError};

/// When the model file is (re)read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Read and decode the file for every prediction.
    #[default]
    EveryRequest,
    /// Keep the decoded model until the file's modification time changes.
    Cached,
}

struct CachedModel {
    modified: SystemTime,
    artifact: Arc<ModelArtifact>,
}

/// Hands out the model stored at a fixed path.
pub struct ModelStore {
    path: PathBuf,
    policy: LoadPolicy,
    cache: RwLock<Option<CachedModel>>,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>, policy: LoadPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    pub fn model_present(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<Arc<ModelArtifact>, ModelError> {
        match self.policy {
            LoadPolicy::EveryRequest => {
                let artifact = ModelArtifact::read(&self.path)?;
                debug!(path = %self.path.display(), kind = artifact.kind(), "model loaded");
                Ok(Arc::new(artifact))
            }
            LoadPolicy::Cached => self.load_cached(),
        }
    }

    fn load_cached(&self) -> Result<Arc<ModelArtifact>, ModelError> {
        let modified = match self.modified() {
            Ok(m) => m,
            Err(e) => {
                self.invalidate();
                return Err(e);
            }
        };

        if let Ok(guard) = self.cache.read() {
            if let Some(cached) = guard.as_ref().filter(|c| c.modified == modified) {
                return Ok(Arc::clone(&cached.artifact));
            }
        }

        let artifact = Arc::new(ModelArtifact::read(&self.path)?);
        debug!(path = %self.path.display(), kind = artifact.kind(), "model cached");

        let mut guard = self
            .cache
            .write()
            .map_err(|_| ModelError::invalid("model cache lock poisoned"))?;
        *guard = Some(CachedModel {
            modified,
            artifact: Arc::clone(&artifact),
        });
        Ok(artifact)
    }

    fn modified(&self) -> Result<SystemTime, ModelError> {
        let meta = fs::metadata(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ModelError::NotFound(self.path.clone()),
            _ => ModelError::Io {
                path: self.path.clone(),
                source: e,
            },
        })?;
        meta.modified().map_err(|e| ModelError::Io {
            path: self.path.clone(),
            source: e,
        })
    }

    fn invalidate(&self) {
        if let Ok(mut guard) = self.cache.write() {
            *guard = None;
        }
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        self.cache.read().map(|g| g.is_some()).unwrap_or(false)
    }
}
