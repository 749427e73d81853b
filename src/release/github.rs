//! GitHub release source.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;

use super::{GetLatestRelease, Release};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository that publishes the scanner binaries.
pub const RIP_REPO: GitHubRepo = GitHubRepo {
    owner: "saintpetejackboy",
    repo: "rip",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitHubRepo {
    pub owner: &'static str,
    pub repo: &'static str,
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

pub struct GitHubReleases {
    http_client: HttpClient,
    api_url: String,
    repo: GitHubRepo,
}

impl GitHubReleases {
    pub fn new(http_client: HttpClient, api_url: Option<String>, repo: GitHubRepo) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, self.repo.owner, self.repo.repo
        )
    }
}

#[async_trait]
impl GetLatestRelease for GitHubReleases {
    #[tracing::instrument(skip(self))]
    async fn get_latest_release(&self) -> Result<Release> {
        let url = self.latest_release_url();
        debug!("Fetching latest release of {} from {}...", self.repo, url);

        self.http_client
            .get_json::<Release>(&url)
            .await
            .with_context(|| format!("Failed to fetch release info for {}", self.repo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::client_builder;

    fn releases(api_url: Option<String>) -> GitHubReleases {
        GitHubReleases::new(
            HttpClient::new(client_builder().build().unwrap()),
            api_url,
            RIP_REPO,
        )
    }

    #[test]
    fn test_default_api_url() {
        let source = releases(None);
        assert_eq!(source.api_url(), "https://api.github.com");
        assert_eq!(
            source.latest_release_url(),
            "https://api.github.com/repos/saintpetejackboy/rip/releases/latest"
        );
    }

    #[test]
    fn test_custom_api_url_trailing_slash() {
        let source = releases(Some("https://ghe.example.com/api/v3/".into()));
        assert_eq!(
            source.latest_release_url(),
            "https://ghe.example.com/api/v3/repos/saintpetejackboy/rip/releases/latest"
        );
    }

    #[tokio::test]
    async fn test_get_latest_release() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/saintpetejackboy/rip/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{
                    "tag_name": "v1.2.0",
                    "assets": [
                        {{ "name": "rip-linux-x64", "browser_download_url": "{url}/dl/rip-linux-x64" }},
                        {{ "name": "rip-windows-x64.exe", "browser_download_url": "{url}/dl/rip-windows-x64.exe" }}
                    ]
                }}"#
            ))
            .create_async()
            .await;

        let release = releases(Some(url.clone()))
            .get_latest_release()
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(release.tag_name.as_deref(), Some("v1.2.0"));
        assert_eq!(
            release.find_asset("rip-linux-x64").unwrap().browser_download_url,
            format!("{}/dl/rip-linux-x64", url)
        );
    }

    #[tokio::test]
    async fn test_get_latest_release_not_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/saintpetejackboy/rip/releases/latest")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let err = releases(Some(url)).get_latest_release().await.unwrap_err();

        mock.assert_async().await;
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to fetch release info for saintpetejackboy/rip"));
        assert!(message.contains("HTTP 404"));
    }

    #[tokio::test]
    async fn test_get_latest_release_garbage_body() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/saintpetejackboy/rip/releases/latest")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = releases(Some(url)).get_latest_release().await.unwrap_err();

        mock.assert_async().await;
        assert!(format!("{:#}", err).contains("Failed to parse JSON response"));
    }
}
