pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AsrError, AudioError, ConfigError, ModelError, PipelineError};
pub use types::{
    AudioBuffer, TranscribeRequest, TranscriptionOptions, DEFAULT_INITIAL_PROMPT,
    TARGET_SAMPLE_RATE,
};
