/// Sample rate every engine consumes; decoded audio is resampled to this.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Priming text used when no initial prompt is configured. Biases the
/// model toward formal Chinese output with proper punctuation.
pub const DEFAULT_INITIAL_PROMPT: &str =
    "这是一段正式的中文语音转写，请使用规范的中文标点符号，包括逗号、句号、问号等。";

/// One decoded audio file: mono f32 samples in [-1.0, 1.0] at a known
/// sample rate. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the duration of this buffer in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Caller-facing knobs for one transcription run.
#[derive(Debug, Clone)]
pub struct TranscriptionOptions {
    /// Target language hint passed to the engine (e.g. "zh").
    pub language: Option<String>,
    /// Priming text; [`DEFAULT_INITIAL_PROMPT`] fills in when absent.
    pub initial_prompt: Option<String>,
    /// Samples per chunk. Must be positive.
    pub chunk_size: usize,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            language: None,
            initial_prompt: None,
            // 30 seconds of audio at 16kHz
            chunk_size: 30 * TARGET_SAMPLE_RATE as usize,
        }
    }
}

impl TranscriptionOptions {
    /// Builds the per-chunk request an engine sees, resolving the prompt
    /// default.
    pub fn request(&self) -> TranscribeRequest {
        TranscribeRequest {
            language: self.language.clone(),
            initial_prompt: self
                .initial_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_INITIAL_PROMPT.to_string()),
        }
    }
}

/// What an engine receives alongside the samples of one chunk.
#[derive(Debug, Clone)]
pub struct TranscribeRequest {
    pub language: Option<String>,
    pub initial_prompt: String,
}
