use crate::error::{BootstrapError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A folder that later CI steps should find executables in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRegistration {
    pub folder: PathBuf,
}

pub struct PathRegistrar {
    os: String,
}

impl PathRegistrar {
    pub fn new(os: impl Into<String>) -> Self {
        Self { os: os.into() }
    }

    pub fn for_host() -> Self {
        Self::new(std::env::consts::OS)
    }

    /// Resolve `folder` to an absolute path for registration.
    ///
    /// The process environment is left untouched; callers hand the result to
    /// whatever channel the CI host reads (see [`append_to_path_file`]).
    pub fn register(&self, folder: &Path) -> Result<PathRegistration> {
        if self.os == "windows" {
            return Err(BootstrapError::UnsupportedPlatform {
                os: self.os.clone(),
            });
        }

        let folder = std::path::absolute(folder).map_err(|e| BootstrapError::PathFile {
            path: folder.display().to_string(),
            reason: format!("failed to resolve absolute path: {e}"),
        })?;

        Ok(PathRegistration { folder })
    }
}

/// Append the registered folder as one line of a path file such as `$GITHUB_PATH`.
pub fn append_to_path_file(path_file: &Path, registration: &PathRegistration) -> Result<()> {
    let write_error = |e: std::io::Error| BootstrapError::PathFile {
        path: path_file.display().to_string(),
        reason: format!("failed to append to path file: {e}"),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path_file)
        .map_err(write_error)?;
    writeln!(file, "{}", registration.folder.display()).map_err(write_error)?;

    tracing::info!(
        "Added {} to {}",
        registration.folder.display(),
        path_file.display()
    );
    Ok(())
}
