use std::path::PathBuf;
use thiserror::Error;
use verdant_core::error::VerdantError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] VerdantError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    JsonFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl CliError {
    /// Machine-readable kind for errors raised by the scoring engine.
    pub fn core_kind(&self) -> Option<&'static str> {
        match self {
            CliError::Core(e) => Some(e.kind()),
            _ => None,
        }
    }
}
