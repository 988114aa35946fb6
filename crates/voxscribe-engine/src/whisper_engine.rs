use crate::engine_trait::SpeechEngine;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use voxscribe_core::{AsrError, TranscribeRequest};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// whisper.cpp-backed engine. The loaded context is process-wide state;
/// inference runs on a blocking thread and calls are serialized, since
/// the model is not safe to invoke concurrently.
pub struct WhisperEngine {
    context: Mutex<Option<Arc<WhisperContext>>>,
    inference_lock: tokio::sync::Mutex<()>,
}

impl WhisperEngine {
    pub fn new() -> Self {
        Self {
            context: Mutex::new(None),
            inference_lock: tokio::sync::Mutex::new(()),
        }
    }
}

impl Default for WhisperEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEngine for WhisperEngine {
    fn name(&self) -> &str {
        "whisper"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), AsrError> {
        let model_path = config
            .get("model_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AsrError::InitializationFailed("missing 'model_path' in whisper config".to_string())
            })?;

        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .map_err(|e| AsrError::InitializationFailed(e.to_string()))?;
        *self.context.lock().unwrap() = Some(Arc::new(ctx));

        tracing::info!(model_path = %model_path, "whisper model loaded");
        Ok(())
    }

    async fn transcribe(
        &self,
        samples: Vec<f32>,
        request: &TranscribeRequest,
    ) -> Result<String, AsrError> {
        let ctx = self
            .context
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AsrError::ProcessingFailed("engine not initialized".to_string()))?;

        // One inference at a time; the context is not reentrant.
        let _guard = self.inference_lock.lock().await;

        let request = request.clone();
        let text = tokio::task::spawn_blocking(move || -> Result<String, AsrError> {
            let mut state = ctx
                .create_state()
                .map_err(|e| AsrError::ProcessingFailed(e.to_string()))?;

            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
            params.set_language(request.language.as_deref());
            params.set_initial_prompt(&request.initial_prompt);
            params.set_print_special(false);
            params.set_print_progress(false);
            params.set_print_realtime(false);
            params.set_print_timestamps(false);

            state
                .full(params, &samples)
                .map_err(|e| AsrError::ProcessingFailed(e.to_string()))?;

            let num_segments = state
                .full_n_segments()
                .map_err(|e| AsrError::ProcessingFailed(e.to_string()))?;
            let mut text = String::new();
            for i in 0..num_segments {
                let segment = state
                    .full_get_segment_text(i)
                    .map_err(|e| AsrError::ProcessingFailed(e.to_string()))?;
                text.push_str(&segment);
            }
            Ok(text)
        })
        .await
        .map_err(|e| AsrError::ProcessingFailed(format!("inference task failed: {e}")))??;

        Ok(text)
    }
}
