//! Sample-rate conversion to the engine's target rate.

use rubato::{FftFixedInOut, Resampler as RubatoResampler};
use voxscribe_core::{AudioBuffer, AudioError};

/// Converts mono audio to a fixed target sample rate.
pub struct Resampler {
    target_sample_rate: u32,
}

impl Resampler {
    pub fn new(target_sample_rate: u32) -> Self {
        Self { target_sample_rate }
    }

    /// Resample a mono buffer to the target rate. Pass-through when the
    /// rates already match.
    pub fn resample(&self, buffer: &AudioBuffer) -> Result<AudioBuffer, AudioError> {
        if buffer.sample_rate == self.target_sample_rate {
            return Ok(buffer.clone());
        }
        if buffer.is_empty() {
            return Ok(AudioBuffer::new(Vec::new(), self.target_sample_rate));
        }

        let mut resampler = FftFixedInOut::<f32>::new(
            buffer.sample_rate as usize,
            self.target_sample_rate as usize,
            1024,
            1,
        )
        .map_err(|e| AudioError::Resample(e.to_string()))?;

        let ratio = self.target_sample_rate as f64 / buffer.sample_rate as f64;
        let mut output = Vec::with_capacity((buffer.len() as f64 * ratio) as usize + 1024);

        let mut pos = 0;
        while pos < buffer.len() {
            let needed = resampler.input_frames_next();
            let end = (pos + needed).min(buffer.len());
            let consumed = end - pos;

            let mut frame = buffer.samples[pos..end].to_vec();
            if frame.len() < needed {
                frame.resize(needed, 0.0);
            }

            let processed = resampler
                .process(&[frame], None)
                .map_err(|e| AudioError::Resample(e.to_string()))?;

            if consumed < needed {
                // Last partial frame was zero-padded; keep only the
                // proportional amount of output.
                let take = (processed[0].len() as f64 * consumed as f64 / needed as f64).round()
                    as usize;
                output.extend_from_slice(&processed[0][..take.min(processed[0].len())]);
            } else {
                output.extend_from_slice(&processed[0]);
            }
            pos = end;
        }

        tracing::debug!(
            from = buffer.sample_rate,
            to = self.target_sample_rate,
            in_samples = buffer.len(),
            out_samples = output.len(),
            "resampled audio"
        );
        Ok(AudioBuffer::new(output, self.target_sample_rate))
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new(voxscribe_core::TARGET_SAMPLE_RATE)
    }
}
