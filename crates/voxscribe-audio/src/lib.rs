pub mod loader;
pub mod resample;

pub use loader::load_wav;
pub use resample::Resampler;

use std::path::Path;
use voxscribe_core::{AudioBuffer, AudioError, TARGET_SAMPLE_RATE};

/// Decode an audio file into the form every engine expects: mono f32
/// samples at [`TARGET_SAMPLE_RATE`].
pub fn decode_for_transcription(path: impl AsRef<Path>) -> Result<AudioBuffer, AudioError> {
    let buffer = load_wav(path)?;
    Resampler::new(TARGET_SAMPLE_RATE).resample(&buffer)
}
