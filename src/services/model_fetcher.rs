use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use crate::errors::{FetchError, FetchResult};

/// Downloads model weight files into a local directory, one at a time.
pub struct ModelFetcher {
    client: reqwest::Client,
    dir: PathBuf,
}

impl ModelFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Download every URL in order. Stops at the first failure; files that
    /// were already downloaded stay in place.
    pub async fn download_all(&self, urls: &[String]) -> FetchResult<usize> {
        fs::create_dir_all(&self.dir).await?;

        tracing::info!("Starting model downloads into {}", self.dir.display());
        for url in urls {
            self.download(url).await?;
        }

        tracing::info!("All {} models downloaded successfully", urls.len());
        Ok(urls.len())
    }

    /// Download one URL to `<dir>/<last path segment>`. A partially written
    /// file is removed on failure.
    pub async fn download(&self, url: &str) -> FetchResult<PathBuf> {
        let file_name = file_name_for(url)?;
        let path = self.dir.join(file_name);

        match self.fetch_to(url, &path).await {
            Ok(bytes) => {
                tracing::info!("Downloaded {} ({} bytes)", file_name, bytes);
                Ok(path)
            }
            Err(e) => {
                if let Err(remove_err) = fs::remove_file(&path).await {
                    tracing::debug!("No partial file to remove at {}: {}", path.display(), remove_err);
                }
                tracing::error!("Error downloading {}: {}", url, e);
                Err(e)
            }
        }
    }

    async fn fetch_to(&self, url: &str, path: &Path) -> FetchResult<u64> {
        let http_error = |source| FetchError::Http { url: url.to_string(), source };

        let mut response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file = File::create(path).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(http_error)? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

/// Last path segment of a URL, ignoring any query string or fragment.
pub fn file_name_for(url: &str) -> FetchResult<&str> {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FetchError::InvalidUrl(url.to_string()))
}
