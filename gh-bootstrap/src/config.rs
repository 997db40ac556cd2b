use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::asset::AssetSpec;
use crate::cli::{expand_home, Args};
use crate::error::{BootstrapError, Result};
use crate::extract::UnsupportedEntryPolicy;
use crate::github::ReleaseCoordinates;

pub const DEFAULT_OWNER: &str = "opencredo";
pub const DEFAULT_REPO: &str = "terrahelp";
pub const DEFAULT_TAG: &str = "v0.7.5";
pub const DEFAULT_BINARY: &str = "terrahelp";
pub const DEFAULT_BIN_DIR: &str = "bin";

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReleaseConfig {
    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default = "default_repo")]
    pub repo: String,

    #[serde(default = "default_tag")]
    pub tag: String,

    #[serde(default = "default_binary")]
    pub binary: String,

    pub asset: Option<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            tag: default_tag(),
            binary: default_binary(),
            asset: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct InstallConfig {
    #[serde(default = "default_bin_dir")]
    pub bin_dir: String,

    pub path_file: Option<PathBuf>,

    #[serde(default)]
    pub strict_entries: bool,

    #[serde(default)]
    pub authenticated_download: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            bin_dir: default_bin_dir(),
            path_file: None,
            strict_entries: false,
            authenticated_download: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct GithubConfig {
    pub api_url: Option<String>,
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

fn default_repo() -> String {
    DEFAULT_REPO.to_string()
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

fn default_binary() -> String {
    DEFAULT_BINARY.to_string()
}

fn default_bin_dir() -> String {
    DEFAULT_BIN_DIR.to_string()
}

/// Everything one bootstrap run needs, after merging flags, environment and config file
#[derive(Debug, Clone)]
pub struct Settings {
    pub coords: ReleaseCoordinates,
    pub asset_name: String,
    pub bin_dir: PathBuf,
    pub path_file: Option<PathBuf>,
    pub token: String,
    pub api_url: Option<String>,
    pub entry_policy: UnsupportedEntryPolicy,
    pub authenticated_download: bool,
}

impl Config {
    /// Load configuration from file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_error = |message: String| BootstrapError::Config {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        toml::from_str(&content).map_err(|e| config_error(e.to_string()))
    }

    /// Merge with command line arguments; flags and environment win over the file
    pub fn resolve(self, args: &Args) -> Result<Settings> {
        let token = args
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(BootstrapError::MissingCredential)?;

        let (owner, repo, repo_tag) = match args.parse_repo()? {
            Some((owner, repo, tag)) => (owner, repo, tag),
            None => (self.release.owner, self.release.repo, None),
        };
        let tag = repo_tag
            .or_else(|| args.tag.clone())
            .unwrap_or(self.release.tag);

        let asset_name = match args.asset.clone().or(self.release.asset) {
            Some(asset) => asset,
            None => {
                let binary = args.binary.as_deref().unwrap_or(&self.release.binary);
                let mut spec = AssetSpec::for_host(binary, &tag);
                if let Some(os) = &args.os {
                    spec.os = os.clone();
                }
                if let Some(arch) = &args.arch {
                    spec.arch = arch.clone();
                }
                spec.file_name()
            }
        };

        let bin_dir = expand_home(args.bin_dir.as_deref().unwrap_or(&self.install.bin_dir));

        let entry_policy = if args.strict_entries || self.install.strict_entries {
            UnsupportedEntryPolicy::Fail
        } else {
            UnsupportedEntryPolicy::Skip
        };

        Ok(Settings {
            coords: ReleaseCoordinates { owner, repo, tag },
            asset_name,
            bin_dir,
            path_file: args.path_file.clone().or(self.install.path_file),
            token,
            api_url: args.api_url.clone().or(self.github.api_url),
            entry_policy,
            authenticated_download: args.authenticated_download
                || self.install.authenticated_download,
        })
    }
}
