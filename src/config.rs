use anyhow::{Context, Result};
use log::debug;
use reqwest::header::HeaderValue;
use std::path::PathBuf;

use crate::{
    http::{HttpClient, client_builder},
    release::{GitHubReleases, RIP_REPO},
    runtime::Runtime,
};

/// Sent on every request; the GitHub API rejects requests without one.
pub const USER_AGENT: &str = "rip-installer";

/// Environment variable overriding the install root.
pub const ROOT_ENV: &str = "RIP_ROOT";

const DEFAULT_ROOT_DIR_NAME: &str = "rip";

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub releases: GitHubReleases,
    pub http_client: HttpClient,
    pub install_root: PathBuf,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, install_root: Option<PathBuf>, api_url: Option<String>) -> Result<Self> {
        let client = client_builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        let mut http_client = HttpClient::new(client);

        if let Ok(token) = runtime.env_var("GITHUB_TOKEN") {
            if !token.is_empty() {
                let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .context("GITHUB_TOKEN contains invalid characters")?;
                auth_value.set_sensitive(true);
                http_client = http_client.with_authorization(auth_value);
                debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(&token));
            }
        }

        let releases = GitHubReleases::new(http_client.clone(), api_url, RIP_REPO);
        let install_root = resolve_install_root(&runtime, install_root)?;

        Ok(Self {
            runtime,
            releases,
            http_client,
            install_root,
        })
    }
}

/// Pick the install root: explicit value, then `RIP_ROOT`, then the
/// per-user data directory.
pub fn resolve_install_root<R: Runtime>(
    runtime: &R,
    install_root: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(root) = install_root {
        return Ok(root);
    }

    if let Ok(root) = runtime.env_var(ROOT_ENV) {
        if !root.is_empty() {
            return Ok(PathBuf::from(root));
        }
    }

    runtime
        .data_local_dir()
        .map(|dir| dir.join(DEFAULT_ROOT_DIR_NAME))
        .with_context(|| {
            format!(
                "Could not determine an install root; pass --root or set {}",
                ROOT_ENV
            )
        })
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
