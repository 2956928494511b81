use serde::{Deserialize, Serialize};

/// A single timed transcript unit. Insertion order is chronological order;
/// ordering and non-overlap are not enforced anywhere in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub id: String,
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// Where a video came from. Serializes into the wire shape the frontend
/// expects: a `source` discriminator plus an optional `videoUrl` that is
/// only present for uploads with a playable file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum VideoSource {
    Upload {
        #[serde(rename = "videoUrl", skip_serializing_if = "Option::is_none")]
        video_url: Option<String>,
    },
    Youtube,
}

impl VideoSource {
    pub fn kind(&self) -> &'static str {
        match self {
            VideoSource::Upload { .. } => "upload",
            VideoSource::Youtube => "youtube",
        }
    }
}

/// The normalized record produced by a successful import. Created once,
/// immutable thereafter, owned by the session that requested it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub id: String,
    pub name: String,
    pub duration: f64,
    pub thumbnail_url: String,
    pub transcript: Vec<TranscriptSegment>,
    #[serde(flatten)]
    pub source: VideoSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str) -> TranscriptSegment {
        TranscriptSegment {
            id: id.to_string(),
            text: "hello".to_string(),
            start: 0.0,
            end: 2.5,
        }
    }

    #[test]
    fn upload_details_wire_format() {
        let details = VideoDetails {
            id: "vid-1".to_string(),
            name: "demo.mp4".to_string(),
            duration: 42.0,
            thumbnail_url: "/uploads/vid-1.jpg".to_string(),
            transcript: vec![segment("seg-1")],
            source: VideoSource::Upload {
                video_url: Some("/uploads/vid-1.mp4".to_string()),
            },
        };

        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["source"], "upload");
        assert_eq!(value["videoUrl"], "/uploads/vid-1.mp4");
        assert_eq!(value["thumbnailUrl"], "/uploads/vid-1.jpg");
        assert_eq!(value["transcript"][0]["id"], "seg-1");
    }

    #[test]
    fn youtube_details_omit_video_url() {
        let details = VideoDetails {
            id: "vid-2".to_string(),
            name: "Some talk".to_string(),
            duration: 600.0,
            thumbnail_url: "https://i.ytimg.com/vi/abc/hqdefault.jpg".to_string(),
            transcript: vec![],
            source: VideoSource::Youtube,
        };

        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["source"], "youtube");
        assert!(value.get("videoUrl").is_none());
    }

    #[test]
    fn details_roundtrip() {
        let details = VideoDetails {
            id: "vid-3".to_string(),
            name: "clip".to_string(),
            duration: 12.0,
            thumbnail_url: "thumb".to_string(),
            transcript: vec![segment("a"), segment("b")],
            source: VideoSource::Upload { video_url: None },
        };

        let json = serde_json::to_string(&details).unwrap();
        let back: VideoDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(back, details);
    }
}
