//! Hands the current invocation over to the installed scanner binary.

use anyhow::{Context, Result};
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::install::binary_path;
use crate::platform::{PlatformKey, launcher_binary_name};

/// Where the launcher expects the binary for `platform`.
pub fn launcher_binary_path(install_root: &Path, platform: &PlatformKey) -> PathBuf {
    binary_path(install_root, launcher_binary_name(platform))
}

/// Run the scanner with `args` and the inherited stdio, returning its exit
/// code. A child without an exit code (killed by a signal) counts as 0.
///
/// Errors only when the child cannot be started.
#[tracing::instrument(skip(args))]
pub async fn launch<I, S>(install_root: &Path, platform: &PlatformKey, args: I) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let path = launcher_binary_path(install_root, platform);
    debug!("Launching {:?}", path);

    let status = Command::new(&path)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("{}", path.display()))?;

    debug!("{:?} exited with {}", path, status);
    Ok(status.code().unwrap_or(0))
}
