use crate::{
    error::Result,
    llm::{self, Provider},
    types::TranscriptSegment,
};

static TRANSCRIPT_PROMPT: &str = r#"You are a video transcription assistant. Given a video's title and duration
in seconds, write a plausible spoken transcript for it.

You MUST output ONLY a valid JSON array (no markdown, no explanation) of
segment objects with this exact structure:
[
  {"id": "seg-1", "text": "spoken sentence", "start": 0.0, "end": 6.5}
]

Rules:
- 8-20 segments covering the whole duration
- Segments are sequential, start >= 0, end > start
- ids are unique strings
- Natural spoken language, one or two sentences per segment"#;

/// Turns an imported video into a transcript. Generation never fails:
/// provider, parse, and validation failures all degrade to a single
/// placeholder segment spanning the video.
pub struct TranscriptGenerator {
    provider: Option<Provider>,
    client: reqwest::Client,
}

impl TranscriptGenerator {
    pub fn new(provider: Option<Provider>, client: reqwest::Client) -> Self {
        Self { provider, client }
    }

    /// Deterministic generator, used when no provider is configured.
    pub fn local() -> Self {
        Self::new(None, reqwest::Client::new())
    }

    pub async fn generate(&self, name: &str, duration: f64) -> Vec<TranscriptSegment> {
        let Some(provider) = &self.provider else {
            return sample_transcript(duration);
        };

        match self.generate_with_model(provider, name, duration).await {
            Ok(segments) => segments,
            Err(err) => {
                tracing::warn!(provider = provider.name(), %err, "transcript generation failed");
                placeholder_transcript(name, duration)
            }
        }
    }

    async fn generate_with_model(
        &self,
        provider: &Provider,
        name: &str,
        duration: f64,
    ) -> Result<Vec<TranscriptSegment>> {
        let user_prompt = format!("Title: {}\nDuration: {:.1} seconds", name, duration);
        let raw = llm::chat(&self.client, provider, TRANSCRIPT_PROMPT, &user_prompt).await?;
        let segments: Vec<TranscriptSegment> = serde_json::from_str(llm::strip_code_fence(&raw))?;

        // The model's output is untrusted: keep only well-formed segments.
        let segments = validate_segments(segments);
        if segments.is_empty() {
            return Err(crate::ClipSynthError::ModelResponse {
                reason: "no well-formed segments in model output".to_string(),
            });
        }
        Ok(segments)
    }
}

/// Drop segments with empty ids or text, negative starts, or non-positive
/// spans. Ordering and overlap are deliberately not checked.
pub fn validate_segments(segments: Vec<TranscriptSegment>) -> Vec<TranscriptSegment> {
    segments
        .into_iter()
        .filter(|seg| {
            !seg.id.trim().is_empty()
                && !seg.text.trim().is_empty()
                && seg.start >= 0.0
                && seg.end > seg.start
        })
        .collect()
}

/// The degraded-result fallback: one segment spanning the whole video.
pub fn placeholder_transcript(name: &str, duration: f64) -> Vec<TranscriptSegment> {
    vec![TranscriptSegment {
        id: "seg-1".to_string(),
        text: format!("Transcript unavailable for {}.", name),
        start: 0.0,
        end: duration.max(1.0),
    }]
}

/// Deterministic sample transcript used by the local (mock) pipeline.
pub fn sample_transcript(duration: f64) -> Vec<TranscriptSegment> {
    let lines = [
        "Hey everyone, welcome back to the channel.",
        "Today I'm showing you something that is honestly a game-changer.",
        "First, let's look at how most people approach this.",
        "The usual way works, but it leaves a lot on the table.",
        "Here's the trick that changes everything.",
        "Once you see it, you can't unsee it.",
        "Let's walk through a real example together.",
        "And that's the whole workflow, start to finish.",
        "If this helped, you know what to do.",
    ];

    let duration = duration.max(lines.len() as f64);
    let span = duration / lines.len() as f64;
    lines
        .iter()
        .enumerate()
        .map(|(i, text)| TranscriptSegment {
            id: format!("seg-{}", i + 1),
            text: (*text).to_string(),
            start: span * i as f64,
            end: span * (i + 1) as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str, text: &str, start: f64, end: f64) -> TranscriptSegment {
        TranscriptSegment {
            id: id.to_string(),
            text: text.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn placeholder_is_a_single_valid_segment() {
        let segments = placeholder_transcript("demo.mp4", 0.0);
        assert_eq!(segments.len(), 1);
        assert!(segments[0].end > segments[0].start);
        assert!(segments[0].text.contains("demo.mp4"));
    }

    #[test]
    fn validation_drops_malformed_segments() {
        let segments = validate_segments(vec![
            segment("a", "fine", 0.0, 1.0),
            segment("", "no id", 1.0, 2.0),
            segment("b", "   ", 2.0, 3.0),
            segment("c", "negative start", -1.0, 3.0),
            segment("d", "zero span", 3.0, 3.0),
            segment("e", "inverted", 5.0, 4.0),
        ]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].id, "a");
    }

    #[test]
    fn sample_transcript_is_sequential_and_covers_duration() {
        let segments = sample_transcript(90.0);
        assert!(segments.len() >= 3);
        assert!((segments.last().unwrap().end - 90.0).abs() < 1e-9);
        for pair in segments.windows(2) {
            assert!(pair[0].end <= pair[1].start + 1e-9);
        }
        // The sample keeps at least one hook keyword for the heuristic.
        assert!(segments.iter().any(|s| s.text.contains("game-changer")));
    }

    #[tokio::test]
    async fn local_generator_is_deterministic() {
        let generator = TranscriptGenerator::local();
        let a = generator.generate("demo.mp4", 60.0).await;
        let b = generator.generate("demo.mp4", 60.0).await;
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}
