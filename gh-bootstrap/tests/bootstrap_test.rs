//! End-to-end runs of the bootstrap steps with a fixture release and a local download server.

mod common;

use gh_bootstrap::bootstrap::Bootstrapper;
use gh_bootstrap::config::Settings;
use gh_bootstrap::download::Downloader;
use gh_bootstrap::error::{BootstrapError, Stage};
use gh_bootstrap::extract::UnsupportedEntryPolicy;
use gh_bootstrap::github::{Release, ReleaseAsset, ReleaseClient, ReleaseCoordinates};
use gh_bootstrap::path::PathRegistrar;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ASSET: &str = "terrahelp_0.7.5_linux_amd64.tar.gz";

struct FixtureClient {
    download_url: String,
}

impl ReleaseClient for FixtureClient {
    async fn release_by_tag(&self, coords: &ReleaseCoordinates) -> anyhow::Result<Release> {
        if coords.tag != "v0.7.5" {
            anyhow::bail!("GitHub: Not Found");
        }
        Ok(Release {
            tag_name: coords.tag.clone(),
            assets: vec![
                ReleaseAsset {
                    name: "checksums.txt".to_string(),
                    browser_download_url: "http://127.0.0.1:1/checksums.txt".to_string(),
                },
                ReleaseAsset {
                    name: ASSET.to_string(),
                    browser_download_url: self.download_url.clone(),
                },
            ],
        })
    }
}

fn settings(root: &Path, tag: &str) -> Settings {
    Settings {
        coords: ReleaseCoordinates {
            owner: "opencredo".to_string(),
            repo: "terrahelp".to_string(),
            tag: tag.to_string(),
        },
        asset_name: ASSET.to_string(),
        bin_dir: root.join("bin"),
        path_file: Some(root.join("github_path")),
        token: "token".to_string(),
        api_url: None,
        entry_policy: UnsupportedEntryPolicy::Skip,
        authenticated_download: false,
    }
}

fn bootstrapper(settings: Settings, url: &str, os: &str) -> Bootstrapper<FixtureClient> {
    Bootstrapper::with_parts(
        settings,
        FixtureClient {
            download_url: url.to_string(),
        },
        Downloader::new().unwrap(),
        PathRegistrar::new(os),
    )
}

#[tokio::test]
async fn test_terrahelp_end_to_end() {
    let archive = common::tar_gz(&[("terrahelp", 0o755, b"#!/bin/sh\necho terrahelp\n")]);
    let server = common::serve("200 OK", archive).await;
    let temp_dir = TempDir::new().unwrap();

    let registration = bootstrapper(settings(temp_dir.path(), "v0.7.5"), &server.url, "linux")
        .run()
        .await
        .unwrap();

    let bin_dir = temp_dir.path().join("bin");
    assert_eq!(
        fs::read(bin_dir.join("terrahelp")).unwrap(),
        b"#!/bin/sh\necho terrahelp\n"
    );
    // The downloaded archive stays next to the extracted tree
    assert!(bin_dir.join(ASSET).exists());

    assert_eq!(registration.folder, bin_dir);
    let path_file = fs::read_to_string(temp_dir.path().join("github_path")).unwrap();
    assert_eq!(path_file, format!("{}\n", bin_dir.display()));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(bin_dir.join("terrahelp"))
            .unwrap()
            .permissions()
            .mode();
        assert!(mode & 0o111 != 0);
    }
}

#[tokio::test]
async fn test_missing_release_never_downloads() {
    let server = common::serve("200 OK", common::tar_gz(&[])).await;
    let temp_dir = TempDir::new().unwrap();

    let err = bootstrapper(settings(temp_dir.path(), "v9.9.9"), &server.url, "linux")
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BootstrapError::ReleaseNotFound { .. }));
    assert_eq!(err.stage(), Stage::Resolve);
    assert_eq!(server.request_count(), 0);
    assert!(!temp_dir.path().join("bin").exists());
}

#[tokio::test]
async fn test_missing_asset_never_downloads() {
    let server = common::serve("200 OK", common::tar_gz(&[])).await;
    let temp_dir = TempDir::new().unwrap();
    let mut settings = settings(temp_dir.path(), "v0.7.5");
    settings.asset_name = "terrahelp_0.7.5_plan9_mips.tar.gz".to_string();

    let err = bootstrapper(settings, &server.url, "linux")
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BootstrapError::AssetNotFound { .. }));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_failed_download_stops_before_extraction() {
    let server = common::serve("500 Internal Server Error", Vec::new()).await;
    let temp_dir = TempDir::new().unwrap();

    let err = bootstrapper(settings(temp_dir.path(), "v0.7.5"), &server.url, "linux")
        .run()
        .await
        .unwrap_err();

    assert_eq!(
        err.diagnostic(),
        format!(
            "Error downloading release asset: failed to download asset from {}: 500 Internal Server Error",
            server.url
        )
    );
    assert!(!temp_dir.path().join("github_path").exists());
}

#[tokio::test]
async fn test_corrupt_archive_is_unpack_error() {
    let server = common::serve("200 OK", b"not a tarball".to_vec()).await;
    let temp_dir = TempDir::new().unwrap();

    let err = bootstrapper(settings(temp_dir.path(), "v0.7.5"), &server.url, "linux")
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BootstrapError::ArchiveRead { .. }));
    assert_eq!(err.stage(), Stage::Unpack);
    assert!(!temp_dir.path().join("github_path").exists());
}

#[tokio::test]
async fn test_windows_host_fails_path_registration() {
    let archive = common::tar_gz(&[("terrahelp", 0o755, b"binary")]);
    let server = common::serve("200 OK", archive).await;
    let temp_dir = TempDir::new().unwrap();

    let err = bootstrapper(settings(temp_dir.path(), "v0.7.5"), &server.url, "windows")
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BootstrapError::UnsupportedPlatform { .. }));
    assert_eq!(
        err.diagnostic(),
        "Error setting PATH: setting PATH is not supported on windows"
    );
    assert!(!temp_dir.path().join("github_path").exists());
}
