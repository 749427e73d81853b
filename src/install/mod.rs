use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    cleanup::{CleanupGuard, cleanup_and_exit, new_shared},
    config::Config,
    http::HttpClient,
    platform::{PlatformKey, resolve},
    release::GetLatestRelease,
    runtime::Runtime,
};

mod paths;
mod remediation;

pub use paths::{bin_dir, binary_path};
pub use remediation::{remediation_lines, report_failure};

/// Mode applied to the downloaded binary on Unix.
const EXECUTABLE_MODE: u32 = 0o755;

/// What [`Installer::install`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// A file was already present; nothing was fetched.
    AlreadyInstalled(PathBuf),
    /// The binary was downloaded to `path`.
    Installed { path: PathBuf, bytes: u64 },
}

/// Install the scanner for the host platform, configured from `runtime`.
#[tracing::instrument(skip(runtime, install_root, api_url))]
pub async fn install<R: Runtime>(
    runtime: R,
    install_root: Option<PathBuf>,
    api_url: Option<String>,
) -> Result<InstallOutcome> {
    let config = Config::new(runtime, install_root, api_url)?;
    let installer = Installer::new(
        config.runtime,
        config.releases,
        config.http_client,
        PlatformKey::detect(),
    );
    installer.install(&config.install_root).await
}

/// Downloads one platform's scanner binary into an install root.
pub struct Installer<R: Runtime, G: GetLatestRelease> {
    pub runtime: R,
    pub releases: G,
    pub http_client: HttpClient,
    pub platform: PlatformKey,
}

impl<R: Runtime, G: GetLatestRelease> Installer<R, G> {
    pub fn new(runtime: R, releases: G, http_client: HttpClient, platform: PlatformKey) -> Self {
        Self {
            runtime,
            releases,
            http_client,
            platform,
        }
    }

    /// Make sure the scanner binary for `self.platform` is present under
    /// `install_root`. An existing file is trusted as-is.
    #[tracing::instrument(skip(self))]
    pub async fn install(&self, install_root: &Path) -> Result<InstallOutcome> {
        println!("Installing RIP vulnerability scanner...");

        let spec = resolve(&self.platform)?;
        let bin_dir = bin_dir(install_root);
        let path = bin_dir.join(spec.local_file_name);

        debug!("Creating bin directory: {:?}", bin_dir);
        self.runtime
            .create_dir_all(&bin_dir)
            .with_context(|| format!("Failed to create directory {:?}", bin_dir))?;

        if self.runtime.exists(&path) {
            println!("Binary already exists at {:?}, skipping download", path);
            return Ok(InstallOutcome::AlreadyInstalled(path));
        }

        println!(
            "Downloading {} for {}...",
            spec.remote_asset_name, self.platform
        );

        let release = self.releases.get_latest_release().await?;
        info!(
            "Latest release: {}",
            release.tag_name.as_deref().unwrap_or("<untagged>")
        );

        let asset = release.find_asset(spec.remote_asset_name).ok_or_else(|| {
            anyhow!(
                "Binary not found for platform {} (expected asset {:?}; available: {})",
                self.platform,
                spec.remote_asset_name,
                release.asset_names().join(", ")
            )
        })?;

        let bytes = self.download(&asset.browser_download_url, &path).await?;
        self.make_executable(&path);

        println!("RIP vulnerability scanner installed successfully!");
        println!("Run with: rip");

        Ok(InstallOutcome::Installed { path, bytes })
    }

    /// Stream `url` into `path`, removing the partial file on failure or Ctrl-C.
    async fn download(&self, url: &str, path: &Path) -> Result<u64> {
        info!("Downloading {} to {:?}", url, path);

        let cleanup_ctx = new_shared();
        let guard = CleanupGuard::new(Arc::clone(&cleanup_ctx), path.to_path_buf());

        let ctrl_c_ctx = Arc::clone(&cleanup_ctx);
        let ctrl_c_handler = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cleanup_and_exit(&ctrl_c_ctx);
            }
        });

        let result = self
            .http_client
            .download_file(url, || {
                self.runtime
                    .create_file(path)
                    .with_context(|| format!("Failed to create file at {:?}", path))
            })
            .await;

        ctrl_c_handler.abort();

        match result {
            Ok(bytes) => {
                guard.success();
                info!("Download complete ({} bytes).", bytes);
                Ok(bytes)
            }
            Err(e) => {
                self.discard_partial(path);
                Err(e.context(format!("Failed to download {}", url)))
            }
        }
    }

    fn discard_partial(&self, path: &Path) {
        if !self.runtime.exists(path) {
            return;
        }
        debug!("Removing partial download {:?}", path);
        if let Err(e) = self.runtime.remove_file(path) {
            debug!("Could not remove {:?}: {:#}", path, e);
        }
    }

    fn make_executable(&self, path: &Path) {
        if self.platform.is_windows() {
            return;
        }
        if let Err(e) = self.runtime.set_permissions(path, EXECUTABLE_MODE) {
            warn!("Could not set executable permissions on {:?}: {:#}", path, e);
            eprintln!("Warning: Could not set executable permissions");
        }
    }
}
