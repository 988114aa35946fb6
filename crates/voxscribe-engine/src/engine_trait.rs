use async_trait::async_trait;
use voxscribe_core::{AsrError, TranscribeRequest};

/// A speech-recognition capability: samples in, text out.
///
/// The capability is treated as single-instance and not reentrant;
/// callers await each call before issuing the next, and blocking
/// implementations must run inference off the async executor (e.g. via
/// `tokio::task::spawn_blocking`).
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Returns the engine's plugin name (e.g. `"whisper"`, `"null"`).
    fn name(&self) -> &str;

    /// One-time initialisation with engine-specific TOML configuration
    /// (model path, language defaults, ...).
    async fn initialize(&mut self, config: toml::Value) -> Result<(), AsrError>;

    /// Transcribe one chunk of mono 16kHz samples to text.
    async fn transcribe(
        &self,
        samples: Vec<f32>,
        request: &TranscribeRequest,
    ) -> Result<String, AsrError>;
}
