pub mod cache;
pub mod catalog;

pub use cache::ModelCache;
pub use catalog::{lookup, ModelInfo, MODELS};
