/// Naming of release archives in the `<binary>_<version>_<os>_<arch>.tar.gz`
/// convention goreleaser publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    pub binary: String,
    pub version: String,
    pub os: String,
    pub arch: String,
}

impl AssetSpec {
    pub fn new(binary: &str, tag: &str, os: &str, arch: &str) -> Self {
        Self {
            binary: binary.to_string(),
            version: version_from_tag(tag).to_string(),
            os: os.to_string(),
            arch: arch.to_string(),
        }
    }

    /// Spec for the platform this process runs on
    pub fn for_host(binary: &str, tag: &str) -> Self {
        Self::new(
            binary,
            tag,
            host_os(std::env::consts::OS),
            host_arch(std::env::consts::ARCH),
        )
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}_{}.tar.gz",
            self.binary, self.version, self.os, self.arch
        )
    }
}

/// Strip the leading `v` from a tag such as `v0.7.5`.
pub fn version_from_tag(tag: &str) -> &str {
    tag.strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag)
}

/// Map a Rust OS name to the identifier used in release asset names.
pub fn host_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// Map a Rust architecture name to the identifier used in release asset names.
pub fn host_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "powerpc64" => "ppc64",
        "s390x" => "s390x",
        other => other,
    }
}
