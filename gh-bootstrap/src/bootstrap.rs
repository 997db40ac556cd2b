use std::path::PathBuf;

use crate::config::Settings;
use crate::download::Downloader;
use crate::error::Result;
use crate::extract;
use crate::github::{self, GitHubClient, ReleaseClient};
use crate::path::{self, PathRegistrar, PathRegistration};

/// Runs resolve, download, extract and PATH registration in order
pub struct Bootstrapper<C> {
    settings: Settings,
    release_client: C,
    downloader: Downloader,
    registrar: PathRegistrar,
}

impl Bootstrapper<GitHubClient> {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let release_client = GitHubClient::new(&settings.token, settings.api_url.as_deref())?;
        let mut downloader = Downloader::new()?;
        if settings.authenticated_download {
            tracing::warn!("Sending the GitHub token with the asset download request");
            downloader = downloader.with_bearer_token(settings.token.clone());
        }

        Ok(Self::with_parts(
            settings,
            release_client,
            downloader,
            PathRegistrar::for_host(),
        ))
    }
}

impl<C: ReleaseClient> Bootstrapper<C> {
    pub fn with_parts(
        settings: Settings,
        release_client: C,
        downloader: Downloader,
        registrar: PathRegistrar,
    ) -> Self {
        Self {
            settings,
            release_client,
            downloader,
            registrar,
        }
    }

    pub async fn run(&self) -> Result<PathRegistration> {
        let settings = &self.settings;

        tracing::info!(
            "Bootstrapping {} from {}/{} (tag: {})",
            settings.asset_name,
            settings.coords.owner,
            settings.coords.repo,
            settings.coords.tag
        );

        let asset_url =
            github::resolve_asset_url(&self.release_client, &settings.coords, &settings.asset_name)
                .await?;

        let archive_path: PathBuf = self
            .downloader
            .download(&asset_url, &settings.bin_dir, &settings.asset_name)
            .await?;

        let summary =
            extract::extract_tar_gz_into(&archive_path, &settings.bin_dir, settings.entry_policy)?;
        tracing::info!(
            "Unpacked {} ({} files, {} directories, {} skipped)",
            archive_path.display(),
            summary.files,
            summary.directories,
            summary.skipped
        );

        let registration = self.registrar.register(&settings.bin_dir)?;
        match &settings.path_file {
            Some(path_file) => path::append_to_path_file(path_file, &registration)?,
            None => {
                tracing::warn!("No path file configured; printing the folder instead");
                println!("{}", registration.folder.display());
            }
        }

        tracing::info!("{} is now available on PATH", settings.asset_name);
        Ok(registration)
    }
}
