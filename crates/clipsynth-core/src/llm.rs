use crate::error::{ClipSynthError, Result};

/// Generative backend used for model-backed transcripts and highlights.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    Grok,
    Openai,
    Gemini,
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    pub model: &'static str,
    pub env_var: &'static str,
}

impl Provider {
    pub fn config(&self) -> ProviderConfig {
        match self {
            Provider::Grok => ProviderConfig {
                api_url: "https://api.x.ai/v1/chat/completions",
                model: "grok-4-fast",
                env_var: "XAI_API_KEY",
            },
            Provider::Openai => ProviderConfig {
                api_url: "https://api.openai.com/v1/chat/completions",
                model: "gpt-5.1",
                env_var: "OPENAI_API_KEY",
            },
            Provider::Gemini => ProviderConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
                model: "gemini-3-pro",
                env_var: "GEMINI_API_KEY",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Grok => "Grok",
            Provider::Openai => "OpenAI",
            Provider::Gemini => "Gemini",
        }
    }

    /// Parse a provider name as used in configuration (`CLIPSYNTH_PROVIDER`).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "grok" => Some(Provider::Grok),
            "openai" => Some(Provider::Openai),
            "gemini" => Some(Provider::Gemini),
            _ => None,
        }
    }

    /// Validate that the API key is set for this provider
    pub fn validate_api_key(&self) -> Result<String> {
        let config = self.config();
        std::env::var(config.env_var).map_err(|_| ClipSynthError::MissingApiKey {
            env_var: config.env_var.to_string(),
        })
    }
}

/// Run a single chat completion and return the raw assistant text.
pub async fn chat(
    client: &reqwest::Client,
    provider: &Provider,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<String> {
    let config = provider.config();
    let api_key = provider.validate_api_key()?;

    let response = client
        .post(config.api_url)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&serde_json::json!({
            "model": config.model,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt,
                },
                {
                    "role": "user",
                    "content": user_prompt,
                },
            ],
            "temperature": 0.3,
        }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;

    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| ClipSynthError::ModelResponse {
            reason: format!("unexpected response structure: {:?}", response),
        })?;

    Ok(content.to_string())
}

/// Strip a markdown code fence if the model wrapped its JSON in one.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_provider_names() {
        assert_eq!(Provider::parse("grok"), Some(Provider::Grok));
        assert_eq!(Provider::parse(" OpenAI "), Some(Provider::Openai));
        assert_eq!(Provider::parse("gemini"), Some(Provider::Gemini));
        assert_eq!(Provider::parse("claude"), None);
        assert_eq!(Provider::parse(""), None);
    }

    #[test]
    fn strip_code_fence_variants() {
        assert_eq!(strip_code_fence("[\"a\"]"), "[\"a\"]");
        assert_eq!(strip_code_fence("```json\n[\"a\"]\n```"), "[\"a\"]");
        assert_eq!(strip_code_fence("```\n[\"a\"]\n```"), "[\"a\"]");
        assert_eq!(strip_code_fence("  [1, 2]  "), "[1, 2]");
    }
}
