use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{ClipSynthError, Result},
    transcript,
    types::{VideoDetails, VideoSource},
};

/// Progress callback: invoked zero or more times with values in 0..=100.
/// Importers promise non-decreasing values ending at 100 before resolution,
/// but consumers tolerate skipped or repeated values.
pub type ProgressFn = Box<dyn Fn(u8) + Send + Sync>;

/// What the user handed us: a local file or a YouTube URL.
#[derive(Debug, Clone)]
pub enum ImportSource {
    File { path: PathBuf, name: String },
    Youtube { url: String },
}

impl ImportSource {
    /// Display name used in error messages.
    pub fn name(&self) -> &str {
        match self {
            ImportSource::File { name, .. } => name,
            ImportSource::Youtube { url } => url,
        }
    }
}

/// Normalizes a video source into a `VideoDetails` record. Fails with a
/// descriptive error when the input is invalid or an upstream call errors.
#[async_trait]
pub trait Importer: Send + Sync {
    async fn import(&self, source: &ImportSource, on_progress: ProgressFn) -> Result<VideoDetails>;
}

/// Deterministic importer: simulates transfer progress and fabricates a
/// sample transcript without touching the network or the filesystem.
/// Sources whose name contains `video-error` fail with a simulated error.
pub struct MockImporter {
    /// Delay between progress ticks. Zero in tests.
    pub tick: Duration,
}

impl MockImporter {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }
}

impl Default for MockImporter {
    fn default() -> Self {
        Self::new(Duration::from_millis(80))
    }
}

#[async_trait]
impl Importer for MockImporter {
    async fn import(&self, source: &ImportSource, on_progress: ProgressFn) -> Result<VideoDetails> {
        for pct in (10..=100).step_by(10) {
            if !self.tick.is_zero() {
                tokio::time::sleep(self.tick).await;
            }
            on_progress(pct);
        }

        let name = source.name().to_string();
        if name.contains("video-error") {
            return Err(ClipSynthError::ImportFailed {
                name,
                reason: "simulated server error".to_string(),
            });
        }

        let duration = 90.0;
        let video_source = match source {
            ImportSource::File { .. } => VideoSource::Upload {
                video_url: Some(format!("/uploads/{}", name)),
            },
            ImportSource::Youtube { .. } => VideoSource::Youtube,
        };

        Ok(VideoDetails {
            id: Uuid::new_v4().to_string(),
            name,
            duration,
            thumbnail_url: "/uploads/mock-thumbnail.jpg".to_string(),
            transcript: transcript::sample_transcript(duration),
            source: video_source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn file_source(name: &str) -> ImportSource {
        ImportSource::File {
            path: PathBuf::from(name),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn mock_import_succeeds_with_full_progress() {
        let importer = MockImporter::new(Duration::ZERO);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let details = importer
            .import(
                &file_source("demo.mp4"),
                Box::new(move |p| sink.lock().unwrap().push(p)),
            )
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(details.source.kind(), "upload");
        assert!(!details.transcript.is_empty());
    }

    #[tokio::test]
    async fn mock_import_fails_for_error_marker() {
        let importer = MockImporter::new(Duration::ZERO);
        let err = importer
            .import(&file_source("video-error.mp4"), Box::new(|_| {}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("simulated server error"));
    }

    #[tokio::test]
    async fn mock_youtube_import_has_no_video_url() {
        let importer = MockImporter::new(Duration::ZERO);
        let details = importer
            .import(
                &ImportSource::Youtube {
                    url: "https://www.youtube.com/watch?v=abc123DEF45".to_string(),
                },
                Box::new(|_| {}),
            )
            .await
            .unwrap();
        assert_eq!(details.source, VideoSource::Youtube);
    }
}
