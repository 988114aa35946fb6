//! Transcript file placement and writing.

use std::path::{Path, PathBuf};
use voxscribe_core::PipelineError;

/// Derive the transcript path from the input path: the input's
/// extension is replaced by `_transcript.txt`, beside the input.
pub fn transcript_path(audio_path: &Path) -> PathBuf {
    let stem = audio_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}_transcript.txt");
    match audio_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

/// Write the finished transcript as UTF-8 text. Callers only invoke this
/// after the whole transcription succeeded, so a failed run never leaves
/// a partial file behind.
pub fn write_transcript(path: &Path, transcript: &str) -> Result<(), PipelineError> {
    std::fs::write(path, transcript)?;
    tracing::info!(path = ?path, bytes = transcript.len(), "transcript written");
    Ok(())
}
