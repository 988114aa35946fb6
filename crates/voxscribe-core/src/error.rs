use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("chunk_seconds must be positive")]
    InvalidChunkSeconds,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open audio file: {0}")]
    Open(String),

    #[error("failed to decode audio: {0}")]
    Decode(String),

    #[error("resampling failed: {0}")]
    Resample(String),
}

#[derive(Debug, Error)]
pub enum AsrError {
    #[error("ASR initialization failed: {0}")]
    InitializationFailed(String),

    #[error("ASR processing failed: {0}")]
    ProcessingFailed(String),

    #[error("ASR engine not found: {0}")]
    EngineNotFound(String),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("model download failed: {0}")]
    DownloadFailed(String),

    #[error("model cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level failure taxonomy for one transcription run. Every variant
/// aborts the run; no partial transcript survives any of them.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("audio file not found: {0}")]
    AudioNotFound(PathBuf),

    #[error("chunk size must be positive")]
    InvalidChunkSize,

    #[error("audio decoding failed: {0}")]
    Decode(#[from] AudioError),

    #[error("transcription failed: {0}")]
    Transcription(#[from] AsrError),

    #[error("failed to write transcript: {0}")]
    OutputWrite(#[from] std::io::Error),
}
