use crate::engine_trait::SpeechEngine;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use voxscribe_core::{AsrError, TranscribeRequest};

/// Placeholder engine that reports what it was fed. Useful for wiring
/// tests and dry runs without a model blob.
pub struct NullEngine {
    call_count: AtomicUsize,
}

impl NullEngine {
    pub fn new() -> Self {
        Self {
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Default for NullEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEngine for NullEngine {
    fn name(&self) -> &str {
        "null"
    }

    async fn initialize(&mut self, _config: toml::Value) -> Result<(), AsrError> {
        Ok(())
    }

    async fn transcribe(
        &self,
        samples: Vec<f32>,
        _request: &TranscribeRequest,
    ) -> Result<String, AsrError> {
        let count = self.call_count.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!("NullEngine call #{count}, {} samples", samples.len());
        Ok(format!("[null] {} samples", samples.len()))
    }
}
