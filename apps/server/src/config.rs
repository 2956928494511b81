use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clipsynth_core::Provider;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024 * 1024; // 2 GiB

/// Server configuration, environment-driven (`.env` supported).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// When unset, transcripts and highlights use the deterministic
    /// local strategies instead of a generative model.
    pub provider: Option<Provider>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("CLIPSYNTH_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid CLIPSYNTH_PORT: {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let uploads_dir = std::env::var("CLIPSYNTH_UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOADS_DIR));

        let max_upload_bytes = match std::env::var("CLIPSYNTH_MAX_UPLOAD_BYTES") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid CLIPSYNTH_MAX_UPLOAD_BYTES: {raw:?}"))?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let provider = match std::env::var("CLIPSYNTH_PROVIDER") {
            Ok(raw) => match Provider::parse(&raw) {
                Some(provider) => Some(provider),
                None => bail!("unknown CLIPSYNTH_PROVIDER: {raw:?}"),
            },
            Err(_) => None,
        };

        Ok(Self {
            port,
            uploads_dir,
            max_upload_bytes,
            provider,
        })
    }
}
