//! WAV file loading.

use hound::WavReader;
use std::path::Path;
use voxscribe_core::{AudioBuffer, AudioError};

/// Load a WAV file into a mono [`AudioBuffer`] at its native sample rate.
///
/// Integer formats are normalized to f32 in [-1.0, 1.0]; interleaved
/// multi-channel audio is downmixed by averaging.
pub fn load_wav(path: impl AsRef<Path>) -> Result<AudioBuffer, AudioError> {
    let path = path.as_ref();
    let reader = WavReader::open(path).map_err(|e| AudioError::Open(e.to_string()))?;

    let spec = reader.spec();
    let channels = spec.channels as usize;
    let sample_rate = spec.sample_rate;

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AudioError::Decode(e.to_string()))?,
        hound::SampleFormat::Int => {
            let max_val = (1u32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| AudioError::Decode(e.to_string()))?
        }
    };

    let mono = downmix_to_mono(&samples, channels);
    tracing::debug!(
        path = ?path,
        sample_rate,
        channels,
        samples = mono.len(),
        "loaded WAV file"
    );
    Ok(AudioBuffer::new(mono, sample_rate))
}

/// Average interleaved channels into a single mono channel.
fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
