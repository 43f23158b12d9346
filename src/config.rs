// config.rs
use std::env;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::model::LoadPolicy;

pub const DEFAULT_MODEL_FILE: &str = "house_predictor.json";

/// Command line / environment options.
#[derive(Debug, Clone, Parser)]
#[command(name = "house_price_api", version, about = "House price prediction API")]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, env = "HOUSE_API_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(long, env = "HOUSE_API_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Model artifact. Relative paths are resolved against the directory
    /// holding the server executable.
    #[arg(long, env = "HOUSE_API_MODEL", default_value = DEFAULT_MODEL_FILE)]
    pub model: PathBuf,

    #[arg(long, env = "HOUSE_API_WORKERS", default_value_t = 8)]
    pub workers: usize,

    #[arg(long, env = "HOUSE_API_MAX_BODY_BYTES", default_value_t = 64 * 1024)]
    pub max_body_bytes: usize,

    /// Keep the decoded model in memory until the file changes.
    #[arg(long, env = "HOUSE_API_CACHE_MODEL")]
    pub cache_model: bool,

    /// Verbose logging.
    #[arg(long, env = "HOUSE_API_DEBUG", default_value_t = true, action = ArgAction::Set)]
    pub debug: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot locate the server executable: {0}")]
    ExecutableDir(#[source] io::Error),
    #[error("worker count must be at least 1")]
    NoWorkers,
}

/// Everything the server needs, built once at start-up and passed down.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub model_path: PathBuf,
    pub load_policy: LoadPolicy,
    pub workers: usize,
    pub max_body_bytes: usize,
    pub debug: bool,
}

impl ServerConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if cli.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }

        let model_path = if cli.model.is_absolute() {
            cli.model
        } else {
            resolve_model_path(&install_dir()?, &cli.model)
        };

        Ok(Self {
            addr: SocketAddr::new(cli.host, cli.port),
            model_path,
            load_policy: if cli.cache_model {
                LoadPolicy::Cached
            } else {
                LoadPolicy::EveryRequest
            },
            workers: cli.workers,
            max_body_bytes: cli.max_body_bytes,
            debug: cli.debug,
        })
    }

    /// Config for a model at an explicit path, with defaults elsewhere.
    #[cfg(test)]
    pub fn with_model(model_path: impl Into<PathBuf>) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            model_path: model_path.into(),
            load_policy: LoadPolicy::EveryRequest,
            workers: 8,
            max_body_bytes: 64 * 1024,
            debug: true,
        }
    }
}

/// Directory containing the running executable.
pub fn install_dir() -> Result<PathBuf, ConfigError> {
    let exe = env::current_exe().map_err(ConfigError::ExecutableDir)?;
    let exe = exe.canonicalize().unwrap_or(exe);
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

pub fn resolve_model_path(base: &Path, model: &Path) -> PathBuf {
    if model.is_absolute() {
        model.to_path_buf()
    } else {
        base.join(model)
    }
}
