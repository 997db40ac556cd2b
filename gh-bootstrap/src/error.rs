use thiserror::Error;

/// Pipeline step an error belongs to, used for the one-line diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Credentials,
    Configuration,
    Resolve,
    Download,
    Unpack,
    RegisterPath,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Credentials => "reading credentials",
            Stage::Configuration => "loading configuration",
            Stage::Resolve => "getting asset URL",
            Stage::Download => "downloading release asset",
            Stage::Unpack => "unpacking release asset",
            Stage::RegisterPath => "setting PATH",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("GITHUB_TOKEN not set")]
    MissingCredential,

    #[error("Configuration error at {path}: {message}")]
    Config { path: String, message: String },

    #[error("Invalid repository format '{input}'. Expected format: owner/repo[@tag] (e.g., opencredo/terrahelp@v0.7.5)")]
    InvalidRepo { input: String },

    #[error("Release not found: {tag} in {owner}/{repo}: {reason}")]
    ReleaseNotFound {
        owner: String,
        repo: String,
        tag: String,
        reason: String,
    },

    #[error("asset '{asset}' not found in release '{tag}'. Available assets: {available}")]
    AssetNotFound {
        asset: String,
        tag: String,
        available: String,
    },

    #[error("failed to download asset from {url}: {status}")]
    DownloadFailed { url: String, status: String },

    #[error("failed to read archive {archive}: {reason}")]
    ArchiveRead { archive: String, reason: String },

    #[error("failed to extract {path}: {reason}")]
    Extraction { path: String, reason: String },

    #[error("setting PATH is not supported on {os}")]
    UnsupportedPlatform { os: String },

    #[error("failed to register {path}: {reason}")]
    PathFile { path: String, reason: String },
}

impl BootstrapError {
    pub fn stage(&self) -> Stage {
        match self {
            BootstrapError::MissingCredential => Stage::Credentials,
            BootstrapError::Config { .. } | BootstrapError::InvalidRepo { .. } => {
                Stage::Configuration
            }
            BootstrapError::ReleaseNotFound { .. } | BootstrapError::AssetNotFound { .. } => {
                Stage::Resolve
            }
            BootstrapError::DownloadFailed { .. } => Stage::Download,
            BootstrapError::ArchiveRead { .. } | BootstrapError::Extraction { .. } => Stage::Unpack,
            BootstrapError::UnsupportedPlatform { .. } | BootstrapError::PathFile { .. } => {
                Stage::RegisterPath
            }
        }
    }

    /// The `Error <stage>: <detail>` line printed before exiting.
    pub fn diagnostic(&self) -> String {
        format!("Error {}: {}", self.stage(), self)
    }
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
