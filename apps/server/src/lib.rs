//! ClipSynth HTTP API
//!
//! Thin axum service over `clipsynth-core`: file upload and YouTube import
//! endpoints returning normalized `VideoDetails`, plus on-demand highlight
//! detection over a posted transcript.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::router;
pub use state::AppState;
