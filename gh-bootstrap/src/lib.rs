//! # gh-bootstrap
//!
//! Puts a pinned GitHub release binary on the PATH of a CI job.
//!
//! ## Overview
//!
//! `gh-bootstrap` resolves a release asset by exact tag and file name,
//! downloads it into a local folder, unpacks the `.tar.gz` in place and
//! registers that folder for the following CI steps (GitHub Actions reads
//! `$GITHUB_PATH`). Each step runs once; the first failure ends the run with
//! exit status 1 and a single `Error <stage>: <detail>` line.
//!
//! ## Usage
//!
//! ```bash
//! # terrahelp v0.7.5 into ./bin (the defaults)
//! GITHUB_TOKEN=... gh-bootstrap
//!
//! # Any goreleaser-style release
//! GITHUB_TOKEN=... gh-bootstrap owner/repo@v1.2.3 --binary tool --bin-dir tools
//! ```
//!
//! ## Configuration
//!
//! Defaults can be set in `.config/gh-bootstrap.toml`; flags and environment
//! variables take precedence.

/// Naming of release archives for a platform
pub mod asset;

/// Composition of the bootstrap steps
pub mod bootstrap;

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration file handling and settings resolution
pub mod config;

/// Streaming asset downloads
pub mod download;

/// Error types and the stage each one belongs to
pub mod error;

/// gzip-compressed tar extraction
pub mod extract;

/// GitHub release lookup and asset resolution
pub mod github;

/// Registration of the binary folder for later CI steps
pub mod path;
