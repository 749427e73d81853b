use std::fmt;

use super::PlatformKey;

/// Local and remote file names of the scanner binary for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySpec {
    /// File name under `<root>/bin/`
    pub local_file_name: &'static str,
    /// Asset name on the release page
    pub remote_asset_name: &'static str,
}

impl BinarySpec {
    const fn same(name: &'static str) -> Self {
        Self {
            local_file_name: name,
            remote_asset_name: name,
        }
    }
}

/// No prebuilt binary is published for this OS/architecture pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedPlatform {
    pub os: String,
    pub arch: String,
}

impl fmt::Display for UnsupportedPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported platform: {}-{}", self.os, self.arch)
    }
}

impl std::error::Error for UnsupportedPlatform {}

/// Resolve the binary names for a platform.
///
/// Windows ignores the architecture. macOS and Linux only distinguish 64-bit
/// ARM from everything else, which gets the x64 build.
pub fn resolve(key: &PlatformKey) -> Result<BinarySpec, UnsupportedPlatform> {
    match key.os.as_str() {
        "windows" | "win32" => Ok(BinarySpec {
            local_file_name: "rip.exe",
            remote_asset_name: "rip-windows-x64.exe",
        }),
        "macos" | "darwin" if key.is_arm64() => Ok(BinarySpec::same("rip-macos-arm64")),
        "macos" | "darwin" => Ok(BinarySpec::same("rip-macos-x64")),
        "linux" if key.is_arm64() => Ok(BinarySpec::same("rip-linux-arm64")),
        "linux" => Ok(BinarySpec::same("rip-linux-x64")),
        _ => Err(UnsupportedPlatform {
            os: key.os.clone(),
            arch: key.arch.clone(),
        }),
    }
}

/// Local binary name for the launcher. Never fails: unknown platforms get a
/// plain `rip` so that an attempt to start it is still made.
pub fn launcher_binary_name(key: &PlatformKey) -> &'static str {
    resolve(key).map(|spec| spec.local_file_name).unwrap_or("rip")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(os: &str, arch: &str) -> PlatformKey {
        PlatformKey::new(os, arch)
    }

    #[test]
    fn test_resolve_macos_arm64() {
        let spec = resolve(&key("darwin", "arm64")).unwrap();
        assert_eq!(spec.local_file_name, "rip-macos-arm64");
        assert_eq!(spec.remote_asset_name, "rip-macos-arm64");

        assert_eq!(resolve(&key("macos", "aarch64")).unwrap(), spec);
    }

    #[test]
    fn test_resolve_macos_other_arch() {
        for arch in ["x64", "x86_64", "ia32", "ppc64"] {
            let spec = resolve(&key("darwin", arch)).unwrap();
            assert_eq!(spec, BinarySpec::same("rip-macos-x64"), "arch {}", arch);
        }
    }

    #[test]
    fn test_resolve_linux() {
        assert_eq!(
            resolve(&key("linux", "x64")).unwrap(),
            BinarySpec::same("rip-linux-x64")
        );
        assert_eq!(
            resolve(&key("linux", "x86_64")).unwrap(),
            BinarySpec::same("rip-linux-x64")
        );
        assert_eq!(
            resolve(&key("linux", "arm64")).unwrap(),
            BinarySpec::same("rip-linux-arm64")
        );
        assert_eq!(
            resolve(&key("linux", "aarch64")).unwrap(),
            BinarySpec::same("rip-linux-arm64")
        );
    }

    #[test]
    fn test_resolve_windows_ignores_arch() {
        for arch in ["x64", "x86_64", "arm64", "ia32"] {
            for os in ["win32", "windows"] {
                let spec = resolve(&key(os, arch)).unwrap();
                assert_eq!(spec.local_file_name, "rip.exe");
                assert_eq!(spec.remote_asset_name, "rip-windows-x64.exe");
            }
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let k = key("linux", "arm64");
        assert_eq!(resolve(&k), resolve(&k));
    }

    #[test]
    fn test_resolve_unsupported() {
        let err = resolve(&key("freebsd", "x64")).unwrap_err();
        assert_eq!(
            err,
            UnsupportedPlatform {
                os: "freebsd".into(),
                arch: "x64".into()
            }
        );
        assert_eq!(err.to_string(), "Unsupported platform: freebsd-x64");
    }

    #[test]
    fn test_resolve_os_is_case_sensitive() {
        assert!(resolve(&key("Linux", "x64")).is_err());
    }

    #[test]
    fn test_launcher_binary_name() {
        assert_eq!(launcher_binary_name(&key("win32", "arm64")), "rip.exe");
        assert_eq!(
            launcher_binary_name(&key("darwin", "arm64")),
            "rip-macos-arm64"
        );
        assert_eq!(launcher_binary_name(&key("linux", "x64")), "rip-linux-x64");
        assert_eq!(launcher_binary_name(&key("sunos", "sparc")), "rip");
    }
}
