use crate::error::{BootstrapError, Result};
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

pub struct Downloader {
    http_client: Client,
    bearer_token: Option<String>,
}

impl Downloader {
    /// Downloader that sends no credentials with asset requests
    pub fn new() -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("gh-bootstrap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            bearer_token: None,
        })
    }

    /// Attach `Authorization: Bearer <token>` to asset requests (private repositories)
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Stream `url` to `<dest_dir>/<asset_name>` and return that path.
    pub async fn download(&self, url: &str, dest_dir: &Path, asset_name: &str) -> Result<PathBuf> {
        tracing::info!("Downloading asset: {}", asset_name);

        let failed = |status: String| BootstrapError::DownloadFailed {
            url: url.to_string(),
            status,
        };

        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|e| failed(format!("failed to create {}: {e}", dest_dir.display())))?;

        let mut request = self.http_client.get(url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| failed(format!("failed to send download request: {e}")))?;

        if response.status() != StatusCode::OK {
            return Err(failed(response.status().to_string()));
        }

        let dest_path = dest_dir.join(asset_name);
        let mut file = tokio::fs::File::create(&dest_path)
            .await
            .map_err(|e| failed(format!("failed to create {}: {e}", dest_path.display())))?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| failed(format!("failed to read chunk: {e}")))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| failed(format!("failed to write {}: {e}", dest_path.display())))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| failed(format!("failed to write {}: {e}", dest_path.display())))?;

        tracing::info!("Saved {} bytes to {}", written, dest_path.display());
        Ok(dest_path)
    }
}
