//! Api file retrieval with a local file cache

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::versiondb::error::FetchError;
use crate::versiondb::version::VersionTag;

/// Body served by the remote source for a release that does not exist (yet).
const NOT_FOUND_MARKER: &str = "404: Not Found";

/// Source of api files, one per release
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ApiSource: Send + Sync {
    /// Returns the raw content of the api file for `version`.
    ///
    /// Fails with [`FetchError::EndOfSeries`] when the release does not exist.
    async fn fetch(&self, version: VersionTag) -> Result<Vec<u8>, FetchError>;
}

/// Reads api files from a cache directory, downloading and persisting the
/// missing ones from `<source_url>/api/`.
pub struct CachedSource {
    client: reqwest::Client,
    cache_dir: PathBuf,
    source_url: String,
}

impl CachedSource {
    pub fn new(cache_dir: impl Into<PathBuf>, source_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client: reqwest::Client::builder().user_agent("gosince").build()?,
            cache_dir: cache_dir.into(),
            source_url: source_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(&config.cache_path, &config.source_url)
    }

    pub fn local_path(&self, version: VersionTag) -> PathBuf {
        self.cache_dir.join(version.file_name())
    }

    pub fn remote_url(&self, version: VersionTag) -> String {
        format!("{}/api/{}", self.source_url, version.file_name())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if String::from_utf8_lossy(&body).trim() == NOT_FOUND_MARKER {
            debug!("{} reported as not found", url);
            return Err(FetchError::EndOfSeries);
        }

        if !status.is_success() {
            warn!("Source returned status {}: {}", status, url);
            return Err(FetchError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl ApiSource for CachedSource {
    async fn fetch(&self, version: VersionTag) -> Result<Vec<u8>, FetchError> {
        let path = self.local_path(version);
        match tokio::fs::read(&path).await {
            Ok(data) => return Ok(data),
            Err(e) => debug!("Failed to read {:?}: {}", path, e),
        }

        let url = self.remote_url(version);
        let data = self.download(&url).await?;
        info!("Downloaded {} ({} bytes)", url, data.len());

        write_file(&path, &data).await?;
        Ok(data)
    }
}

/// Writes the file, creating its parent directories if needed.
async fn write_file(path: &Path, data: &[u8]) -> Result<(), FetchError> {
    let io_error = |source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, data).await.map_err(io_error)
}
