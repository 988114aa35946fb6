use crate::error::ConfigError;
use crate::types::{TranscriptionOptions, TARGET_SAMPLE_RATE};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub transcription: TranscriptionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Directory holding downloaded model blobs. Explicit configuration,
    /// never derived from the executable's location.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            cache_dir: default_cache_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranscriptionConfig {
    #[serde(default = "default_engine")]
    pub engine: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Priming text for the model; the built-in Chinese punctuation
    /// prompt applies when unset.
    #[serde(default)]
    pub initial_prompt: Option<String>,

    #[serde(default = "default_chunk_seconds")]
    pub chunk_seconds: u32,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            language: default_language(),
            initial_prompt: None,
            chunk_seconds: default_chunk_seconds(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_name() -> String {
    "medium".to_string()
}

fn default_cache_dir() -> String {
    ".voxscribe_models".to_string()
}

fn default_engine() -> String {
    "whisper".to_string()
}

fn default_language() -> String {
    "zh".to_string()
}

fn default_chunk_seconds() -> u32 {
    30
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Resolve the `[transcription]` section into driver options,
    /// rejecting a zero chunk length outright.
    pub fn transcription_options(&self) -> Result<TranscriptionOptions, ConfigError> {
        if self.transcription.chunk_seconds == 0 {
            return Err(ConfigError::InvalidChunkSeconds);
        }
        Ok(TranscriptionOptions {
            language: Some(self.transcription.language.clone()),
            initial_prompt: self.transcription.initial_prompt.clone(),
            chunk_size: self.transcription.chunk_seconds as usize * TARGET_SAMPLE_RATE as usize,
        })
    }
}
