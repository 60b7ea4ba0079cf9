use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the external text-generation API.
    #[serde(default = "default_generator_endpoint")]
    pub generator_endpoint: String,
    #[serde(default = "default_generator_model")]
    pub generator_model: String,
    /// API key for the text-generation service. Empty means unconfigured;
    /// generation then always falls back to the built-in sentence.
    #[serde(default)]
    pub generator_api_key: String,
    #[serde(default = "default_generator_timeout_secs")]
    pub generator_timeout_secs: u64,
    /// Default speaking rate (words per minute) for synthesized audio.
    #[serde(default = "default_speech_rate")]
    pub speech_rate: u32,
    /// Learner id used when a call supplies no identity. All anonymous
    /// learners share this one profile and attempt history.
    #[serde(default = "default_guest_learner_id")]
    pub guest_learner_id: String,
}

fn default_generator_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}
fn default_generator_model() -> String {
    "gemini-1.5-pro-latest".to_string()
}
fn default_generator_timeout_secs() -> u64 {
    10
}
fn default_speech_rate() -> u32 {
    150
}
fn default_guest_learner_id() -> String {
    "guest".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator_endpoint: default_generator_endpoint(),
            generator_model: default_generator_model(),
            generator_api_key: String::new(),
            generator_timeout_secs: default_generator_timeout_secs(),
            speech_rate: default_speech_rate(),
            guest_learner_id: default_guest_learner_id(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("readrill")
            .join("config.toml")
    }

    /// Clamp out-of-range values from hand-edited config files.
    pub fn validate(&mut self) {
        if self.speech_rate == 0 {
            self.speech_rate = default_speech_rate();
        }
        self.speech_rate = self.speech_rate.clamp(50, 400);
        if self.generator_timeout_secs == 0 {
            self.generator_timeout_secs = default_generator_timeout_secs();
        }
        if self.guest_learner_id.is_empty() {
            self.guest_learner_id = default_guest_learner_id();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.speech_rate, 150);
        assert_eq!(config.generator_timeout_secs, 10);
        assert_eq!(config.guest_learner_id, "guest");
        assert!(config.generator_api_key.is_empty());
    }

    #[test]
    fn test_config_serde_defaults_from_partial_file() {
        let toml_str = r#"
generator_model = "gemini-1.5-flash"
speech_rate = 120
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generator_model, "gemini-1.5-flash");
        assert_eq!(config.speech_rate, 120);
        // Missing fields fall back to defaults
        assert_eq!(config.generator_timeout_secs, 10);
        assert!(config.generator_endpoint.contains("generativelanguage"));
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.speech_rate = 0;
        config.generator_timeout_secs = 0;
        config.guest_learner_id = String::new();
        config.validate();
        assert_eq!(config.speech_rate, 150);
        assert_eq!(config.generator_timeout_secs, 10);
        assert_eq!(config.guest_learner_id, "guest");

        config.speech_rate = 9999;
        config.validate();
        assert_eq!(config.speech_rate, 400);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.generator_endpoint, deserialized.generator_endpoint);
        assert_eq!(config.speech_rate, deserialized.speech_rate);
        assert_eq!(config.guest_learner_id, deserialized.guest_learner_id);
    }
}
