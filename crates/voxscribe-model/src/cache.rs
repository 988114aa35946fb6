//! Local model cache with remote fetch on miss.

use crate::catalog;
use std::io::Write;
use std::path::{Path, PathBuf};
use voxscribe_core::ModelError;

/// Resolves a model name to a local blob path, downloading it into the
/// cache directory on first use. A present cache file short-circuits any
/// network access.
pub struct ModelCache {
    models_dir: PathBuf,
}

impl ModelCache {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Path the named model's blob would occupy in the cache.
    pub fn model_path(&self, name: &str) -> Result<PathBuf, ModelError> {
        let info =
            catalog::lookup(name).ok_or_else(|| ModelError::UnknownModel(name.to_string()))?;
        Ok(self.models_dir.join(info.filename))
    }

    /// Returns the local path of the named model, fetching the blob first
    /// if the cache misses.
    pub async fn ensure(&self, name: &str) -> Result<PathBuf, ModelError> {
        let info =
            catalog::lookup(name).ok_or_else(|| ModelError::UnknownModel(name.to_string()))?;
        let path = self.models_dir.join(info.filename);
        let partial = self.models_dir.join(format!("{}.partial", info.filename));

        if path.exists() {
            tracing::info!(model = name, path = ?path, "using cached model");
            // A leftover partial file from an interrupted run is stale
            if partial.exists() {
                let _ = std::fs::remove_file(&partial);
            }
            return Ok(path);
        }

        std::fs::create_dir_all(&self.models_dir)?;
        tracing::info!(
            model = name,
            url = info.url,
            size_mb = info.size_mb,
            "downloading model to local cache"
        );

        let mut response = reqwest::get(info.url)
            .await
            .map_err(|e| ModelError::DownloadFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ModelError::DownloadFailed(format!(
                "HTTP {} fetching {}",
                response.status(),
                info.url
            )));
        }

        let mut file = std::fs::File::create(&partial)?;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ModelError::DownloadFailed(e.to_string()))?
        {
            file.write_all(&chunk)?;
        }
        file.flush()?;
        drop(file);

        std::fs::rename(&partial, &path)?;
        tracing::info!(model = name, path = ?path, "model saved to cache");
        Ok(path)
    }
}
