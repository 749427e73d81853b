use std::fmt;

/// Host operating system and CPU architecture identifiers.
///
/// Both Rust's `std::env::consts` spellings (`macos`, `aarch64`, ...) and the
/// Node.js spellings (`darwin`, `arm64`, `win32`, ...) are understood by the
/// resolver, so keys may be built from either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformKey {
    pub os: String,
    pub arch: String,
}

impl PlatformKey {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Detect the current platform
    pub fn detect() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Whether the OS identifier names Windows.
    pub fn is_windows(&self) -> bool {
        matches!(self.os.as_str(), "windows" | "win32")
    }

    pub(crate) fn is_arm64(&self) -> bool {
        matches!(self.arch.as_str(), "aarch64" | "arm64")
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}
