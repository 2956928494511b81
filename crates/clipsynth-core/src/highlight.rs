use std::collections::HashSet;

use async_trait::async_trait;

use crate::{
    error::Result,
    llm::{self, Provider},
    types::TranscriptSegment,
};

/// Fixed vocabulary of "hook" phrases likely to retain viewer attention.
pub const HOOK_KEYWORDS: &[&str] = &[
    "game-changer",
    "secret",
    "amazing",
    "incredible",
    "mistake",
    "nobody tells you",
    "the truth",
    "shocking",
    "hack",
    "warning",
    "you won't believe",
];

static HIGHLIGHTS_PROMPT: &str = r#"You are a short-form video editor. Given a transcript as a JSON array of
segments {"id", "text", "start", "end"}, pick the segments most likely to
hook a viewer in the first seconds of a clip.

You MUST output ONLY a valid JSON array of segment id strings (no markdown,
no explanation), for example: ["seg-2", "seg-7"]

Rules:
- Only use ids that appear in the input
- Pick 1-5 segments
- Prefer bold claims, surprising facts, and emotional peaks"#;

/// Keyword heuristic: case-insensitive substring match against the hook
/// vocabulary. With no match, fall back to the second segment when at
/// least 3 segments exist, else return nothing.
pub fn find_highlights(segments: &[TranscriptSegment]) -> Vec<String> {
    let matched: Vec<String> = segments
        .iter()
        .filter(|seg| {
            let text = seg.text.to_lowercase();
            HOOK_KEYWORDS.iter().any(|kw| text.contains(kw))
        })
        .map(|seg| seg.id.clone())
        .collect();

    if !matched.is_empty() {
        return matched;
    }
    if segments.len() >= 3 {
        return vec![segments[1].id.clone()];
    }
    Vec::new()
}

/// Keep only candidate ids that exist in the transcript, in transcript
/// order, without duplicates. Guards against id fabrication by a model.
pub fn filter_known_ids(candidates: &[String], segments: &[TranscriptSegment]) -> Vec<String> {
    let wanted: HashSet<&str> = candidates.iter().map(String::as_str).collect();
    segments
        .iter()
        .filter(|seg| wanted.contains(seg.id.as_str()))
        .map(|seg| seg.id.clone())
        .collect()
}

fn parse_id_array(raw: &str) -> Result<Vec<String>> {
    let ids: Vec<String> = serde_json::from_str(llm::strip_code_fence(raw))?;
    Ok(ids)
}

/// Finds hook-worthy segment ids. Pure function of its input; strategy
/// failure degrades to "no highlights found" rather than an error.
#[async_trait]
pub trait HighlightStrategy: Send + Sync {
    async fn find_highlights(&self, segments: &[TranscriptSegment]) -> Vec<String>;
}

/// The deterministic keyword matcher.
pub struct KeywordHighlighter;

#[async_trait]
impl HighlightStrategy for KeywordHighlighter {
    async fn find_highlights(&self, segments: &[TranscriptSegment]) -> Vec<String> {
        find_highlights(segments)
    }
}

/// Delegates to a generative model constrained to emit a JSON array of
/// segment ids; the output is post-filtered against the transcript's id
/// set before anyone trusts it.
pub struct ModelHighlighter {
    provider: Provider,
    client: reqwest::Client,
}

impl ModelHighlighter {
    pub fn new(provider: Provider, client: reqwest::Client) -> Self {
        Self { provider, client }
    }

    async fn ask_model(&self, segments: &[TranscriptSegment]) -> Result<Vec<String>> {
        let user_prompt = serde_json::to_string(segments)?;
        let raw = llm::chat(&self.client, &self.provider, HIGHLIGHTS_PROMPT, &user_prompt).await?;
        parse_id_array(&raw)
    }
}

#[async_trait]
impl HighlightStrategy for ModelHighlighter {
    async fn find_highlights(&self, segments: &[TranscriptSegment]) -> Vec<String> {
        match self.ask_model(segments).await {
            Ok(candidates) => filter_known_ids(&candidates, segments),
            Err(err) => {
                tracing::warn!(provider = self.provider.name(), %err, "highlight analysis failed");
                Vec::new()
            }
        }
    }
}
