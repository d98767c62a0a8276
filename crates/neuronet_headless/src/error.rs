use std::path::PathBuf;

use neuronet::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error("invalid argument: {0}")]
    Args(String),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: malformed config: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode summary: {0}")]
    Encode(#[from] serde_json::Error),
}

impl HeadlessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HeadlessError::Io {
            path: path.into(),
            source,
        }
    }
}
