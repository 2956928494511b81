use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{
    fs,
    io::{AsyncReadExt, AsyncWriteExt},
    process::Command,
};
use uuid::Uuid;

use crate::{
    error::{ClipSynthError, Result},
    importer::{ImportSource, Importer, ProgressFn},
    transcript::TranscriptGenerator,
    types::{VideoDetails, VideoSource},
};

const COPY_CHUNK: usize = 512 * 1024;
const PLACEHOLDER_THUMBNAIL: &str = "https://placehold.co/640x360?text=clipsynth";

/// Probe media duration in seconds using ffprobe
pub async fn probe_duration(path: &Path) -> Result<f64> {
    let output = Command::new("ffprobe")
        .arg("-v")
        .arg("error")
        .arg("-show_entries")
        .arg("format=duration")
        .arg("-of")
        .arg("default=noprint_wrappers=1:nokey=1")
        .arg(path)
        .output()
        .await?;

    if !output.status.success() {
        return Err(ClipSynthError::ProbeFailed {
            path: path.to_path_buf(),
            reason: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let duration: f64 = stdout.trim().parse().map_err(|_| ClipSynthError::ProbeFailed {
        path: path.to_path_buf(),
        reason: format!("unparseable duration: {:?}", stdout.trim()),
    })?;

    if duration <= 0.0 {
        return Err(ClipSynthError::ProbeFailed {
            path: path.to_path_buf(),
            reason: "media has zero duration".to_string(),
        });
    }
    Ok(duration)
}

/// Grab a single frame near the start of the video as a thumbnail
pub async fn capture_thumbnail(video_path: &Path, thumbnail_path: &Path) -> Result<()> {
    let output = Command::new("ffmpeg")
        .arg("-y")
        .arg("-ss")
        .arg("1")
        .arg("-i")
        .arg(video_path)
        .arg("-frames:v")
        .arg("1")
        .arg("-vf")
        .arg("scale=640:-1")
        .arg(thumbnail_path)
        .output()
        .await?;

    if !output.status.success() {
        return Err(ClipSynthError::ProbeFailed {
            path: video_path.to_path_buf(),
            reason: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }
    Ok(())
}

/// Imports a local video file: stores it under a generated unique filename
/// in the uploads directory, probes it, and generates a transcript. Stored
/// files are served back under the public base path (`/uploads`).
pub struct FileImporter {
    uploads_dir: PathBuf,
    public_base: String,
    transcriber: TranscriptGenerator,
}

impl FileImporter {
    pub fn new(
        uploads_dir: impl Into<PathBuf>,
        public_base: impl Into<String>,
        transcriber: TranscriptGenerator,
    ) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
            public_base: public_base.into(),
            transcriber,
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Generated unique filename preserving the original extension.
    pub fn stored_path_for(&self, original_name: &str) -> PathBuf {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        self.uploads_dir.join(format!("{}.{}", Uuid::new_v4(), ext))
    }

    /// Copy the source into the uploads directory in chunks, reporting
    /// byte-accurate transfer progress in percent.
    async fn store_with_progress(
        &self,
        source_path: &Path,
        original_name: &str,
        on_progress: &ProgressFn,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.uploads_dir).await?;
        let stored = self.stored_path_for(original_name);

        let total = fs::metadata(source_path).await?.len();
        let mut reader = fs::File::open(source_path).await?;
        let mut writer = fs::File::create(&stored).await?;

        let mut copied: u64 = 0;
        let mut buf = vec![0u8; COPY_CHUNK];
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            writer.write_all(&buf[..n]).await?;
            copied += n as u64;
            if total > 0 {
                on_progress((copied * 100 / total).min(100) as u8);
            }
        }
        writer.flush().await?;
        on_progress(100);

        Ok(stored)
    }

    /// Build the `VideoDetails` record for a file already sitting in the
    /// uploads directory (the server writes multipart bodies there
    /// directly, then calls this).
    pub async fn describe_stored(&self, stored: &Path, original_name: &str) -> Result<VideoDetails> {
        let duration = probe_duration(stored).await?;

        let stem = stored
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("video")
            .to_string();
        let thumbnail_path = self.uploads_dir.join(format!("{}.jpg", stem));
        let thumbnail_url = match capture_thumbnail(stored, &thumbnail_path).await {
            Ok(()) => format!("{}/{}.jpg", self.public_base, stem),
            Err(err) => {
                tracing::warn!(%err, "thumbnail capture failed, using placeholder");
                PLACEHOLDER_THUMBNAIL.to_string()
            }
        };

        let transcript = self.transcriber.generate(original_name, duration).await;

        let filename = stored
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&stem)
            .to_string();

        Ok(VideoDetails {
            id: stem,
            name: original_name.to_string(),
            duration,
            thumbnail_url,
            transcript,
            source: VideoSource::Upload {
                video_url: Some(format!("{}/{}", self.public_base, filename)),
            },
        })
    }
}

#[async_trait]
impl Importer for FileImporter {
    async fn import(&self, source: &ImportSource, on_progress: ProgressFn) -> Result<VideoDetails> {
        let ImportSource::File { path, name } = source else {
            return Err(ClipSynthError::ImportFailed {
                name: source.name().to_string(),
                reason: "URL sources are handled by the YouTube importer".to_string(),
            });
        };

        let stored = self.store_with_progress(path, name, &on_progress).await?;
        self.describe_stored(&stored, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_paths_are_unique_and_keep_the_extension() {
        let importer = FileImporter::new("uploads", "/uploads", TranscriptGenerator::local());
        let a = importer.stored_path_for("movie.mp4");
        let b = importer.stored_path_for("movie.mp4");
        assert_ne!(a, b);
        assert_eq!(a.extension().unwrap(), "mp4");
        assert_eq!(importer.stored_path_for("no_extension").extension().unwrap(), "bin");
    }

    #[tokio::test]
    async fn storing_reports_monotonic_progress_ending_at_100() {
        use std::sync::{Arc, Mutex};

        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("input.mp4");
        fs::write(&source, vec![7u8; 2 * COPY_CHUNK + 123]).await.unwrap();

        let importer = FileImporter::new(
            dir.path().join("uploads"),
            "/uploads",
            TranscriptGenerator::local(),
        );

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressFn = Box::new(move |p| sink.lock().unwrap().push(p));

        let stored = importer
            .store_with_progress(&source, "input.mp4", &callback)
            .await
            .unwrap();

        assert!(stored.exists());
        assert_eq!(
            fs::metadata(&stored).await.unwrap().len(),
            (2 * COPY_CHUNK + 123) as u64
        );

        let seen = seen.lock().unwrap();
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }
}
