use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the transcription pipeline.
///
/// The pipeline never reads process environment or config files on its own;
/// callers construct a `Config` explicitly (the CLI uses the `load`/`from_env`
/// helpers below before handing it over).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Audio extraction settings
    pub audio: AudioConfig,

    /// Recognition service settings
    pub whisper: WhisperConfig,

    /// Output formatting settings
    pub format: FormatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Target sample rate for extracted audio
    pub sample_rate: u32,

    /// Audio codec passed to ffmpeg
    pub codec: String,

    /// Directory for intermediate audio files
    pub temp_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperConfig {
    /// Transcription API endpoint
    pub endpoint: String,

    /// API key for the recognition service
    pub api_key: Option<String>,

    /// Model identifier sent with each request
    pub model: String,

    /// Language hint ("auto" lets the service detect)
    pub language: Option<String>,

    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Words per subtitle line
    pub words_per_line: usize,

    /// Assumed duration of one sentence when no timing data exists, seconds
    pub fallback_sentence_seconds: f64,

    /// Maximum summary length in characters
    pub summary_max_length: usize,

    /// Include an extractive summary in the complete artifact
    pub include_summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio: AudioConfig {
                sample_rate: 16000, // optimal for Whisper
                codec: "pcm_s16le".to_string(),
                temp_dir: std::env::temp_dir(),
            },
            whisper: WhisperConfig {
                endpoint: "https://api.openai.com/v1/audio/transcriptions".to_string(),
                api_key: None,
                model: "whisper-1".to_string(),
                language: None,
                temperature: 0.0,
                timeout_seconds: 300,
            },
            format: FormatConfig {
                words_per_line: 10,
                fallback_sentence_seconds: 10.0,
                summary_max_length: 300,
                include_summary: true,
            },
        }
    }
}

impl Config {
    /// Load configuration from the first parseable file in the usual spots,
    /// falling back to environment variables.
    pub fn load() -> Result<Self> {
        let config_paths = [
            "transcriber.toml",
            "config/transcriber.toml",
            "/etc/transcriber/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Build a configuration from environment variables on top of defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(api_key) = std::env::var("TRANSCRIBER_API_KEY") {
            config.whisper.api_key = Some(api_key);
        } else if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.whisper.api_key = Some(api_key);
        }

        if let Ok(endpoint) = std::env::var("TRANSCRIBER_ENDPOINT") {
            config.whisper.endpoint = endpoint;
        }

        if let Ok(model) = std::env::var("TRANSCRIBER_MODEL") {
            config.whisper.model = model;
        }

        if let Ok(language) = std::env::var("TRANSCRIBER_LANGUAGE") {
            config.whisper.language = Some(language);
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate == 0 {
            return Err(anyhow!("sample_rate must be greater than 0"));
        }

        if self.whisper.model.is_empty() {
            return Err(anyhow!("whisper model must not be empty"));
        }

        if self.whisper.timeout_seconds == 0 {
            return Err(anyhow!("timeout_seconds must be greater than 0"));
        }

        if self.format.words_per_line == 0 {
            return Err(anyhow!("words_per_line must be greater than 0"));
        }

        if self.format.fallback_sentence_seconds <= 0.0 {
            return Err(anyhow!("fallback_sentence_seconds must be positive"));
        }

        Ok(())
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.whisper.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.whisper.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.whisper.model = model.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.config.whisper.language = Some(language.into());
        self
    }

    pub fn with_temp_dir(mut self, dir: PathBuf) -> Self {
        self.config.audio.temp_dir = dir;
        self
    }

    pub fn with_words_per_line(mut self, words: usize) -> Self {
        self.config.format.words_per_line = words;
        self
    }

    pub fn with_summary_max_length(mut self, max_length: usize) -> Self {
        self.config.format.summary_max_length = max_length;
        self
    }

    pub fn include_summary(mut self, include: bool) -> Self {
        self.config.format.include_summary = include;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.format.words_per_line, 10);
        assert_eq!(config.format.summary_max_length, 300);
        assert!(config.format.include_summary);
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_model("whisper-large")
            .with_words_per_line(7)
            .include_summary(false)
            .build();

        assert_eq!(config.whisper.model, "whisper-large");
        assert_eq!(config.format.words_per_line, 7);
        assert!(!config.format.include_summary);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut bad = Config::default();
        bad.format.words_per_line = 0;
        assert!(bad.validate().is_err());
    }
}
