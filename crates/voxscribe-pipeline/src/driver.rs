//! Chunked transcription driver: decode, partition, transcribe
//! sequentially, report progress, concatenate.

use crate::chunk;
use std::path::Path;
use std::sync::Arc;
use voxscribe_core::{AudioBuffer, PipelineError, TranscriptionOptions};
use voxscribe_engine::SpeechEngine;

/// Fire-and-forget progress notification, called with a fraction in
/// (0, 1] after each chunk completes.
pub type ProgressFn = Box<dyn Fn(f64) + Send + Sync>;

pub struct TranscriptionDriver {
    engine: Arc<dyn SpeechEngine>,
    options: TranscriptionOptions,
}

impl TranscriptionDriver {
    pub fn new(engine: Arc<dyn SpeechEngine>, options: TranscriptionOptions) -> Self {
        Self { engine, options }
    }

    /// Transcribe an audio file end to end. The path must exist before
    /// any decoding is attempted; every failure aborts the whole run
    /// with no partial transcript.
    pub async fn transcribe_file(
        &self,
        audio_path: &Path,
        progress: Option<&ProgressFn>,
    ) -> Result<String, PipelineError> {
        if !audio_path.exists() {
            return Err(PipelineError::AudioNotFound(audio_path.to_path_buf()));
        }

        tracing::info!(path = ?audio_path, "loading audio file");
        let buffer = voxscribe_audio::decode_for_transcription(audio_path)?;
        self.transcribe_buffer(&buffer, progress).await
    }

    /// Transcribe an already-decoded buffer. Chunks are processed
    /// strictly in index order, one at a time; chunk N+1 is requested
    /// only after chunk N resolves.
    pub async fn transcribe_buffer(
        &self,
        buffer: &AudioBuffer,
        progress: Option<&ProgressFn>,
    ) -> Result<String, PipelineError> {
        if self.options.chunk_size == 0 {
            return Err(PipelineError::InvalidChunkSize);
        }

        let ranges = chunk::partition(buffer.len(), self.options.chunk_size);
        let total = ranges.len();
        let request = self.options.request();
        tracing::info!(
            chunks = total,
            chunk_size = self.options.chunk_size,
            duration_secs = buffer.duration_secs(),
            "starting transcription"
        );

        let mut pieces: Vec<String> = Vec::with_capacity(total);
        for (index, range) in ranges.into_iter().enumerate() {
            let samples = buffer.samples[range].to_vec();
            let text = self
                .engine
                .transcribe(samples, &request)
                .await
                .map_err(|e| {
                    tracing::error!(chunk = index + 1, total, "transcription failed: {e}");
                    e
                })?;
            pieces.push(text);

            if let Some(callback) = progress {
                let fraction = (index + 1) as f64 / total as f64;
                // The callback is a notification only; a panicking
                // observer must not abort the transcription.
                let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    callback(fraction)
                }));
                if outcome.is_err() {
                    tracing::warn!(chunk = index + 1, "progress callback panicked");
                }
            }
        }

        Ok(pieces.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use voxscribe_core::{AsrError, TranscribeRequest, DEFAULT_INITIAL_PROMPT};

    /// Scripted engine: returns queued texts in order, optionally
    /// failing on the nth call (1-indexed). Records what it saw.
    struct ScriptedEngine {
        texts: Mutex<Vec<String>>,
        fail_on_call: Option<usize>,
        calls: AtomicUsize,
        seen_sizes: Mutex<Vec<usize>>,
        seen_requests: Mutex<Vec<TranscribeRequest>>,
    }

    impl ScriptedEngine {
        fn new(texts: &[&str]) -> Self {
            Self {
                texts: Mutex::new(texts.iter().rev().map(|s| s.to_string()).collect()),
                fail_on_call: None,
                calls: AtomicUsize::new(0),
                seen_sizes: Mutex::new(Vec::new()),
                seen_requests: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(texts: &[&str], call: usize) -> Self {
            let mut engine = Self::new(texts);
            engine.fail_on_call = Some(call);
            engine
        }
    }

    #[async_trait]
    impl SpeechEngine for ScriptedEngine {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn initialize(&mut self, _config: toml::Value) -> Result<(), AsrError> {
            Ok(())
        }

        async fn transcribe(
            &self,
            samples: Vec<f32>,
            request: &TranscribeRequest,
        ) -> Result<String, AsrError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on_call == Some(call) {
                return Err(AsrError::ProcessingFailed(format!(
                    "scripted failure on call {call}"
                )));
            }
            self.seen_sizes.lock().unwrap().push(samples.len());
            self.seen_requests.lock().unwrap().push(request.clone());
            Ok(self
                .texts
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| "?".to_string()))
        }
    }

    fn driver_with(engine: Arc<ScriptedEngine>, chunk_size: usize) -> TranscriptionDriver {
        TranscriptionDriver::new(
            engine,
            TranscriptionOptions {
                chunk_size,
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_two_chunk_buffer_concatenates_in_order() {
        // 45 seconds at 16kHz, 30-second chunks
        let engine = Arc::new(ScriptedEngine::new(&["A", "B"]));
        let driver = driver_with(Arc::clone(&engine), 480_000);
        let buffer = AudioBuffer::new(vec![0.0; 720_000], 16_000);

        let transcript = driver.transcribe_buffer(&buffer, None).await.unwrap();
        assert_eq!(transcript, "AB");
        assert_eq!(*engine.seen_sizes.lock().unwrap(), vec![480_000, 240_000]);
    }

    #[tokio::test]
    async fn test_empty_buffer_yields_empty_transcript_and_no_callbacks() {
        let engine = Arc::new(ScriptedEngine::new(&[]));
        let driver = driver_with(Arc::clone(&engine), 480_000);
        let buffer = AudioBuffer::new(Vec::new(), 16_000);

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_cb = Arc::clone(&calls);
        let progress: ProgressFn = Box::new(move |_| {
            calls_in_cb.fetch_add(1, Ordering::SeqCst);
        });

        let transcript = driver
            .transcribe_buffer(&buffer, Some(&progress))
            .await
            .unwrap();
        assert_eq!(transcript, "");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_progress_fractions_increase_and_end_at_one() {
        let engine = Arc::new(ScriptedEngine::new(&["a", "b", "c", "d"]));
        let driver = driver_with(engine, 250);
        let buffer = AudioBuffer::new(vec![0.0; 1_000], 16_000);

        let seen = Arc::new(Mutex::new(Vec::<f64>::new()));
        let seen_in_cb = Arc::clone(&seen);
        let progress: ProgressFn = Box::new(move |fraction| {
            seen_in_cb.lock().unwrap().push(fraction);
        });

        driver
            .transcribe_buffer(&buffer, Some(&progress))
            .await
            .unwrap();

        let fractions = seen.lock().unwrap().clone();
        assert_eq!(fractions.len(), 4);
        for pair in fractions.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(fractions.iter().all(|f| *f > 0.0 && *f <= 1.0));
        assert_eq!(*fractions.last().unwrap(), 1.0);
    }

    #[tokio::test]
    async fn test_failure_mid_stream_aborts_without_partial_output() {
        let engine = Arc::new(ScriptedEngine::failing_on(&["A", "B", "C"], 2));
        let driver = driver_with(Arc::clone(&engine), 100);
        let buffer = AudioBuffer::new(vec![0.0; 300], 16_000);

        let seen = Arc::new(Mutex::new(Vec::<f64>::new()));
        let seen_in_cb = Arc::clone(&seen);
        let progress: ProgressFn = Box::new(move |fraction| {
            seen_in_cb.lock().unwrap().push(fraction);
        });

        let result = driver.transcribe_buffer(&buffer, Some(&progress)).await;
        match result {
            Err(PipelineError::Transcription(_)) => {}
            other => panic!("expected Transcription error, got {other:?}"),
        }
        // Only chunk 1 completed; no fraction past it was reported and
        // chunk 3 was never requested.
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_chunk_size_rejected() {
        let engine = Arc::new(ScriptedEngine::new(&[]));
        let driver = driver_with(engine, 0);
        let buffer = AudioBuffer::new(vec![0.0; 100], 16_000);

        let result = driver.transcribe_buffer(&buffer, None).await;
        match result {
            Err(PipelineError::InvalidChunkSize) => {}
            other => panic!("expected InvalidChunkSize, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_file_fails_not_found() {
        let engine = Arc::new(ScriptedEngine::new(&[]));
        let driver = driver_with(engine, 480_000);

        let result = driver
            .transcribe_file(Path::new("/nonexistent/audio.wav"), None)
            .await;
        match result {
            Err(PipelineError::AudioNotFound(path)) => {
                assert_eq!(path, Path::new("/nonexistent/audio.wav"));
            }
            other => panic!("expected AudioNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_default_prompt_reaches_engine() {
        let engine = Arc::new(ScriptedEngine::new(&["x"]));
        let driver = driver_with(Arc::clone(&engine), 100);
        let buffer = AudioBuffer::new(vec![0.0; 50], 16_000);

        driver.transcribe_buffer(&buffer, None).await.unwrap();

        let requests = engine.seen_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].initial_prompt, DEFAULT_INITIAL_PROMPT);
    }

    #[tokio::test]
    async fn test_explicit_language_and_prompt_reach_engine() {
        let engine = Arc::new(ScriptedEngine::new(&["x"]));
        let driver = TranscriptionDriver::new(
            Arc::clone(&engine) as Arc<dyn SpeechEngine>,
            TranscriptionOptions {
                language: Some("zh".to_string()),
                initial_prompt: Some("自定义提示。".to_string()),
                chunk_size: 100,
            },
        );
        let buffer = AudioBuffer::new(vec![0.0; 50], 16_000);

        driver.transcribe_buffer(&buffer, None).await.unwrap();

        let requests = engine.seen_requests.lock().unwrap();
        assert_eq!(requests[0].language.as_deref(), Some("zh"));
        assert_eq!(requests[0].initial_prompt, "自定义提示。");
    }

    #[tokio::test]
    async fn test_panicking_callback_does_not_abort_transcription() {
        let engine = Arc::new(ScriptedEngine::new(&["A", "B"]));
        let driver = driver_with(engine, 100);
        let buffer = AudioBuffer::new(vec![0.0; 200], 16_000);

        let progress: ProgressFn = Box::new(|_| panic!("observer bug"));
        let transcript = driver
            .transcribe_buffer(&buffer, Some(&progress))
            .await
            .unwrap();
        assert_eq!(transcript, "AB");
    }
}
