//! Release metadata: the types returned by the release API and the source
//! that fetches them.

mod github;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

pub use github::{DEFAULT_API_URL, GitHubReleases, GitHubRepo, RIP_REPO};

/// A downloadable file attached to a release.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// The subset of a published release this tool cares about.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Release {
    #[serde(default)]
    pub tag_name: Option<String>,
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Asset whose name is exactly `name`.
    pub fn find_asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }

    /// Sorted asset names, for error messages.
    pub fn asset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.assets.iter().map(|a| a.name.as_str()).collect();
        names.sort();
        names
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GetLatestRelease: Send + Sync {
    async fn get_latest_release(&self) -> Result<Release>;
}
