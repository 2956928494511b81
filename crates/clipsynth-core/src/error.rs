use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipSynthError {
    #[error("Invalid video URL: {url}")]
    InvalidUrl { url: String },

    #[error("Metadata fetch failed for {url}: {reason}")]
    MetadataFailed { url: String, reason: String },

    #[error("Import failed for {name}: {reason}")]
    ImportFailed { name: String, reason: String },

    #[error("Probe failed for {path}: {reason}")]
    ProbeFailed { path: PathBuf, reason: String },

    #[error("Invalid model response: {reason}")]
    ModelResponse { reason: String },

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClipSynthError>;
