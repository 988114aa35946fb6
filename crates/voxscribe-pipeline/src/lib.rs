pub mod chunk;
pub mod driver;
pub mod output;

pub use chunk::partition;
pub use driver::{ProgressFn, TranscriptionDriver};
pub use output::{transcript_path, write_transcript};
