use crate::config::ServerConfig;
use crate::model::ModelStore;

/// Shared, read-only view of the server handed to every request.
pub struct AppState {
    pub config: ServerConfig,
    pub models: ModelStore,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let models = ModelStore::new(config.model_path.clone(), config.load_policy);
        Self { config, models }
    }
}
