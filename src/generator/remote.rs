//! Blocking client for the external text-generation API (Gemini-style
//! `generateContent` endpoint). Compiled to an always-failing stub without
//! the `network` feature, in which case every request takes the fallback
//! sentence.

use anyhow::Result;

use crate::config::Config;
use crate::generator::{DifficultyTier, ParagraphGenerator};

pub struct RemoteGenerator {
    endpoint: String,
    model: String,
    api_key: String,
    timeout_secs: u64,
}

impl RemoteGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.generator_endpoint.clone(),
            model: config.generator_model.clone(),
            api_key: config.generator_api_key.clone(),
            timeout_secs: config.generator_timeout_secs,
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

#[cfg(feature = "network")]
impl ParagraphGenerator for RemoteGenerator {
    fn generate(&mut self, tier: DifficultyTier) -> Result<String> {
        use anyhow::{Context, bail};

        if self.api_key.is_empty() {
            bail!("no API key configured for the text-generation service");
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": tier.prompt() }] }]
        });

        let response = client
            .post(self.request_url())
            .json(&body)
            .send()
            .context("text-generation request failed")?;

        if !response.status().is_success() {
            bail!("text-generation service returned {}", response.status());
        }

        let payload: serde_json::Value = response
            .json()
            .context("text-generation response was not valid JSON")?;

        extract_paragraph(&payload)
    }
}

#[cfg(not(feature = "network"))]
impl ParagraphGenerator for RemoteGenerator {
    fn generate(&mut self, _tier: DifficultyTier) -> Result<String> {
        anyhow::bail!("network feature disabled")
    }
}

/// Pull the generated text out of a `generateContent` response body.
fn extract_paragraph(payload: &serde_json::Value) -> Result<String> {
    let text = payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("no text candidate in generation response"))?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_shape() {
        let mut config = Config::default();
        config.generator_endpoint = "https://api.example.com/models/".to_string();
        config.generator_model = "gen-1".to_string();
        config.generator_api_key = "k123".to_string();
        let generator = RemoteGenerator::new(&config);
        assert_eq!(
            generator.request_url(),
            "https://api.example.com/models/gen-1:generateContent?key=k123"
        );
    }

    #[test]
    fn test_extract_paragraph_from_well_formed_response() {
        let payload = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "  A calm morning.  " }] }
            }]
        });
        assert_eq!(extract_paragraph(&payload).unwrap(), "A calm morning.");
    }

    #[test]
    fn test_extract_paragraph_rejects_malformed_response() {
        let payload = serde_json::json!({ "error": { "message": "quota exceeded" } });
        assert!(extract_paragraph(&payload).is_err());
    }
}
