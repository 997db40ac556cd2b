use crate::error::{BootstrapError, Result};
use anyhow::Context;
use octocrab::Octocrab;
use serde::Deserialize;
use std::future::Future;

/// Owner, repository and tag identifying one published release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCoordinates {
    pub owner: String,
    pub repo: String,
    pub tag: String,
}

/// A GitHub release. Only the fields needed to locate an asset.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    /// First asset whose name is exactly `name`, in API order
    pub fn find_asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }

    fn asset_names(&self) -> String {
        if self.assets.is_empty() {
            return "No assets available".to_string();
        }
        self.assets
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Source of release metadata.
pub trait ReleaseClient {
    fn release_by_tag(
        &self,
        coords: &ReleaseCoordinates,
    ) -> impl Future<Output = anyhow::Result<Release>>;
}

pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    pub fn new(token: &str, api_url: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(api_url) = api_url {
            builder = builder
                .base_uri(api_url)
                .with_context(|| format!("Invalid GitHub API URL: {api_url}"))?;
        }
        Ok(Self {
            octocrab: builder.build()?,
        })
    }
}

impl ReleaseClient for GitHubClient {
    async fn release_by_tag(&self, coords: &ReleaseCoordinates) -> anyhow::Result<Release> {
        let route = format!(
            "/repos/{}/{}/releases/tags/{}",
            coords.owner, coords.repo, coords.tag
        );
        self.octocrab
            .get(route, None::<&()>)
            .await
            .map_err(|e| match e {
                // Display of this variant is only "GitHub"; surface the API message
                octocrab::Error::GitHub { source, .. } => {
                    anyhow::anyhow!("GitHub: {}", source.message)
                }
                other => anyhow::Error::new(other),
            })
    }
}

/// Look up the release for `coords` and return the download URL of `asset_name`.
pub async fn resolve_asset_url<C: ReleaseClient>(
    client: &C,
    coords: &ReleaseCoordinates,
    asset_name: &str,
) -> Result<String> {
    tracing::info!(
        "Fetching release '{}' for {}/{}",
        coords.tag,
        coords.owner,
        coords.repo
    );

    let release = client.release_by_tag(coords).await.map_err(|e| {
        tracing::error!("Failed to fetch release {}: {}", coords.tag, e);
        BootstrapError::ReleaseNotFound {
            owner: coords.owner.clone(),
            repo: coords.repo.clone(),
            tag: coords.tag.clone(),
            reason: format!("{e:#}"),
        }
    })?;

    match release.find_asset(asset_name) {
        Some(asset) => {
            tracing::debug!("Resolved {} to {}", asset.name, asset.browser_download_url);
            Ok(asset.browser_download_url.clone())
        }
        None => Err(BootstrapError::AssetNotFound {
            asset: asset_name.to_string(),
            tag: coords.tag.clone(),
            available: release.asset_names(),
        }),
    }
}
