use crate::error::{BootstrapError, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tar::EntryType;

/// What to do with archive entries that are neither directories nor regular files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedEntryPolicy {
    #[default]
    Skip,
    Fail,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub directories: usize,
    pub files: usize,
    pub skipped: usize,
}

/// Extract a `.tar.gz` next to itself, into the archive's parent directory.
pub fn extract_tar_gz(archive_path: &Path) -> Result<ExtractSummary> {
    let dest_dir = archive_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    extract_tar_gz_into(archive_path, &dest_dir, UnsupportedEntryPolicy::Skip)
}

/// Extract a `.tar.gz` into `dest_dir`, keeping the paths recorded in the archive.
pub fn extract_tar_gz_into(
    archive_path: &Path,
    dest_dir: &Path,
    policy: UnsupportedEntryPolicy,
) -> Result<ExtractSummary> {
    let read_error = |reason: String| BootstrapError::ArchiveRead {
        archive: archive_path.display().to_string(),
        reason,
    };

    let file = fs::File::open(archive_path)
        .map_err(|e| read_error(format!("failed to open file: {e}")))?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    let mut summary = ExtractSummary::default();
    let entries = archive
        .entries()
        .map_err(|e| read_error(format!("failed to read tar header: {e}")))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| read_error(format!("failed to read tar header: {e}")))?;
        let name = entry
            .path()
            .map_err(|e| read_error(format!("invalid entry path: {e}")))?
            .into_owned();
        let dest_path = entry_destination(dest_dir, &name)?;

        match entry.header().entry_type() {
            // pax and GNU metadata records, not filesystem objects
            EntryType::XGlobalHeader
            | EntryType::XHeader
            | EntryType::GNULongName
            | EntryType::GNULongLink => {
                tracing::debug!("Ignoring archive metadata entry {}", name.display());
            }
            EntryType::Directory => {
                fs::create_dir_all(&dest_path)
                    .map_err(|e| extraction_error(&dest_path, "failed to create directory", e))?;
                summary.directories += 1;
            }
            EntryType::Regular | EntryType::Continuous => {
                if let Some(parent) = dest_path.parent() {
                    fs::create_dir_all(parent).map_err(|e| {
                        extraction_error(parent, "failed to create parent directory", e)
                    })?;
                }
                // Replaces read-only files left by an earlier extraction
                let _ = fs::remove_file(&dest_path);
                let mut out = fs::File::create(&dest_path)
                    .map_err(|e| extraction_error(&dest_path, "failed to create file", e))?;
                io::copy(&mut entry, &mut out)
                    .map_err(|e| extraction_error(&dest_path, "failed to copy file contents", e))?;

                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    if let Ok(mode) = entry.header().mode() {
                        fs::set_permissions(&dest_path, fs::Permissions::from_mode(mode & 0o777))
                            .map_err(|e| {
                                extraction_error(&dest_path, "failed to set permissions", e)
                            })?;
                    }
                }

                tracing::debug!("Extracted {}", dest_path.display());
                summary.files += 1;
            }
            other => match policy {
                UnsupportedEntryPolicy::Skip => {
                    tracing::warn!(
                        "Skipping unsupported archive entry {} ({:?})",
                        name.display(),
                        other
                    );
                    summary.skipped += 1;
                }
                UnsupportedEntryPolicy::Fail => {
                    return Err(BootstrapError::Extraction {
                        path: dest_path.display().to_string(),
                        reason: format!("unsupported entry type {other:?}"),
                    });
                }
            },
        }
    }

    Ok(summary)
}

fn extraction_error(path: &Path, what: &str, err: io::Error) -> BootstrapError {
    BootstrapError::Extraction {
        path: path.display().to_string(),
        reason: format!("{what}: {err}"),
    }
}

/// Join an archive path onto `dest_dir`, refusing anything that would land outside it.
fn entry_destination(dest_dir: &Path, name: &Path) -> Result<PathBuf> {
    let mut dest = dest_dir.to_path_buf();
    for component in name.components() {
        match component {
            Component::Normal(part) => dest.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(BootstrapError::Extraction {
                    path: name.display().to_string(),
                    reason: "entry path escapes the destination directory".to_string(),
                });
            }
        }
    }
    Ok(dest)
}
