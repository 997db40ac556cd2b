use clap::Parser;
use std::path::PathBuf;

use crate::error::{BootstrapError, Result};

#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "gh-bootstrap",
    version,
    about = "Download a pinned GitHub release binary and put it on the CI PATH",
    long_about = None
)]
pub struct Args {
    /// Repository to bootstrap from
    /// Format: owner/repo[@tag]
    /// Example: opencredo/terrahelp@v0.7.5
    #[clap(value_name = "OWNER/REPO[@TAG]")]
    pub repo: Option<String>,

    /// Release tag (exact match, e.g. v0.7.5)
    #[clap(short, long)]
    pub tag: Option<String>,

    /// Binary name used to build the asset name
    #[clap(short, long)]
    pub binary: Option<String>,

    /// Exact asset file name, overriding <binary>_<version>_<os>_<arch>.tar.gz
    #[clap(long)]
    pub asset: Option<String>,

    /// Operating system part of the asset name (e.g. linux, darwin)
    #[clap(long)]
    pub os: Option<String>,

    /// Architecture part of the asset name (e.g. amd64, arm64)
    #[clap(long)]
    pub arch: Option<String>,

    /// Folder the archive is downloaded to and extracted in
    #[clap(short = 'd', long)]
    pub bin_dir: Option<String>,

    /// File later CI steps read PATH entries from
    #[clap(long, env = "GITHUB_PATH")]
    pub path_file: Option<PathBuf>,

    /// GitHub token used for the releases API
    #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL (GitHub Enterprise)
    #[clap(long, env = "GH_BOOTSTRAP_API_URL")]
    pub api_url: Option<String>,

    /// Fail on archive entries that are not directories or regular files
    #[clap(long)]
    pub strict_entries: bool,

    /// Send the token with the asset download request as well
    #[clap(long)]
    pub authenticated_download: bool,

    /// Configuration file path
    #[clap(long, default_value = ".config/gh-bootstrap.toml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[clap(long)]
    pub verbose: bool,
}

impl Args {
    /// Split the positional `owner/repo[@tag]` argument, if given
    pub fn parse_repo(&self) -> Result<Option<(String, String, Option<String>)>> {
        let Some(repo_str) = &self.repo else {
            return Ok(None);
        };

        let (repo_part, tag_part) = match repo_str.rfind('@') {
            Some(idx) => (&repo_str[..idx], Some(repo_str[idx + 1..].to_string())),
            None => (repo_str.as_str(), None),
        };

        let parts: Vec<&str> = repo_part.split('/').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(BootstrapError::InvalidRepo {
                input: repo_str.clone(),
            });
        }
        if tag_part.as_deref() == Some("") {
            return Err(BootstrapError::InvalidRepo {
                input: repo_str.clone(),
            });
        }

        // `--tag` applies when no tag is given with @
        let tag = tag_part.or_else(|| self.tag.clone());

        Ok(Some((parts[0].to_string(), parts[1].to_string(), tag)))
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
        {
            let rest = path.strip_prefix('~').unwrap_or(path);
            let rest = rest.strip_prefix('/').unwrap_or(rest);
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
