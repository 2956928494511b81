use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use url::Url;
use uuid::Uuid;

use crate::{
    error::{ClipSynthError, Result},
    importer::{ImportSource, Importer, ProgressFn},
    transcript::TranscriptGenerator,
    types::{VideoDetails, VideoSource},
};

const METADATA_TIMEOUT: Duration = Duration::from_secs(60);

/// Validate a YouTube URL and extract its video id. Rejects anything that
/// is not an http(s) URL on a known YouTube host with a recognizable id.
pub fn parse_video_id(raw: &str) -> Result<String> {
    let invalid = || ClipSynthError::InvalidUrl {
        url: raw.to_string(),
    };

    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }

    let host = url.host_str().ok_or_else(invalid)?.to_lowercase();
    let id = match host.as_str() {
        "youtu.be" => url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string),
        "youtube.com" | "www.youtube.com" | "m.youtube.com" => match url.path() {
            "/watch" => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            path if path.starts_with("/shorts/") || path.starts_with("/embed/") => path
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            _ => None,
        },
        _ => None,
    };

    match id {
        Some(id) if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') => {
            Ok(id)
        }
        _ => Err(invalid()),
    }
}

/// Metadata as reported by `yt-dlp --dump-json`.
#[derive(Debug, Clone)]
pub struct YoutubeMetadata {
    pub title: String,
    pub duration: f64,
    pub thumbnail_url: String,
}

/// Fetch video metadata with yt-dlp. Fails for private or unavailable
/// videos and when the tool takes longer than the metadata timeout.
pub async fn fetch_metadata(url: &str) -> Result<YoutubeMetadata> {
    let video_id = parse_video_id(url)?;

    let run = Command::new("yt-dlp")
        .arg("--dump-json")
        .arg("--no-download")
        .arg("--no-playlist")
        .arg(url)
        .output();

    let output = tokio::time::timeout(METADATA_TIMEOUT, run)
        .await
        .map_err(|_| ClipSynthError::MetadataFailed {
            url: url.to_string(),
            reason: format!("metadata fetch timed out after {}s", METADATA_TIMEOUT.as_secs()),
        })??;

    if !output.status.success() {
        return Err(ClipSynthError::MetadataFailed {
            url: url.to_string(),
            reason: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let info: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let duration = info["duration"].as_f64().unwrap_or(0.0);
    if duration <= 0.0 {
        return Err(ClipSynthError::MetadataFailed {
            url: url.to_string(),
            reason: "video has no reported duration".to_string(),
        });
    }

    let title = info["title"].as_str().unwrap_or("Untitled video").to_string();
    let thumbnail_url = info["thumbnail"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id));

    Ok(YoutubeMetadata {
        title,
        duration,
        thumbnail_url,
    })
}

/// Imports a YouTube URL: validate, fetch metadata, generate a transcript.
pub struct YoutubeImporter {
    transcriber: TranscriptGenerator,
}

impl YoutubeImporter {
    pub fn new(transcriber: TranscriptGenerator) -> Self {
        Self { transcriber }
    }
}

#[async_trait]
impl Importer for YoutubeImporter {
    async fn import(&self, source: &ImportSource, on_progress: ProgressFn) -> Result<VideoDetails> {
        let ImportSource::Youtube { url } = source else {
            return Err(ClipSynthError::ImportFailed {
                name: source.name().to_string(),
                reason: "file sources are handled by the file importer".to_string(),
            });
        };

        // Invalid input never reaches the metadata step.
        parse_video_id(url)?;
        on_progress(25);

        let metadata = fetch_metadata(url).await?;
        on_progress(100);

        let transcript = self
            .transcriber
            .generate(&metadata.title, metadata.duration)
            .await;

        Ok(VideoDetails {
            id: Uuid::new_v4().to_string(),
            name: metadata.title,
            duration: metadata.duration,
            thumbnail_url: metadata.thumbnail_url,
            transcript,
            source: VideoSource::Youtube,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_standard_watch_urls() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            parse_video_id("https://youtube.com/watch?list=PL1&v=abc-DEF_123").unwrap(),
            "abc-DEF_123"
        );
    }

    #[test]
    fn accepts_short_and_embed_forms() {
        assert_eq!(
            parse_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/shorts/abc123").unwrap(),
            "abc123"
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/embed/abc123").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_video_id("").is_err());
        assert!(parse_video_id("not a url").is_err());
        assert!(parse_video_id("ftp://youtube.com/watch?v=abc").is_err());
        assert!(parse_video_id("https://example.com/watch?v=abc").is_err());
        assert!(parse_video_id("https://www.youtube.com/watch").is_err());
        assert!(parse_video_id("https://www.youtube.com/playlist?list=PL1").is_err());
        assert!(parse_video_id("https://youtu.be/").is_err());
    }
}
