//! HTTP client that follows redirects itself so the chain length is bounded.
//!
//! Credentials are attached per request and only sent to the origin the
//! request started at. A redirect to another host never sees them.

use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{AUTHORIZATION, HeaderValue, LOCATION};
use reqwest::{Client, ClientBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::io::Write;

use super::HttpError;

/// Maximum number of 301/302 hops followed for a single request.
pub const MAX_REDIRECTS: usize = 10;

/// A reqwest builder with automatic redirects turned off.
///
/// Clients passed to [`HttpClient::new`] should come from here, otherwise
/// reqwest follows redirects on its own and the hop limit is not enforced.
pub fn client_builder() -> ClientBuilder {
    Client::builder().redirect(reqwest::redirect::Policy::none())
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    authorization: Option<HeaderValue>,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            authorization: None,
        }
    }

    /// Sends `value` as the `Authorization` header, but only to the origin
    /// of each request's starting URL.
    pub fn with_authorization(mut self, value: HeaderValue) -> Self {
        self.authorization = Some(value);
        self
    }

    /// Performs a GET request and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self.get_following_redirects(url).await?;
        let body = response
            .bytes()
            .await
            .context("Failed to read response body")?;

        serde_json::from_slice(&body).context("Failed to parse JSON response")
    }

    /// Streams the body at `url` into the writer returned by `create_writer`.
    ///
    /// The writer is only created once a 200 response has arrived, so a
    /// failed request never leaves a file behind. Returns the byte count.
    #[tracing::instrument(skip(self, create_writer))]
    pub async fn download_file<W, F>(&self, url: &str, create_writer: F) -> Result<u64>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
    {
        debug!("Downloading file from {}...", url);

        let mut response = self.get_following_redirects(url).await?;

        let mut writer = create_writer()?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .context("Failed to read chunk from download stream")?
        {
            writer
                .write_all(&chunk)
                .context("Failed to write chunk to file")?;
            downloaded_bytes += chunk.len() as u64;
        }
        writer.flush().context("Failed to flush downloaded file")?;

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }

    /// Sends a GET, reissuing it against `Location` for every 301/302.
    async fn get_following_redirects(&self, url: &str) -> Result<Response> {
        let mut current = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
        let origin = current.origin();

        for hop in 0..=MAX_REDIRECTS {
            let mut request = self.client.get(current.clone());
            if let Some(authorization) = &self.authorization {
                if current.origin() == origin {
                    request = request.header(AUTHORIZATION, authorization.clone());
                } else {
                    debug!(
                        "Not sending credentials to {}",
                        current.origin().ascii_serialization()
                    );
                }
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("Failed to send request to {}", current))?;

            let status = response.status();
            if is_followed_redirect(status) {
                if hop == MAX_REDIRECTS {
                    break;
                }
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| current.join(value).ok())
                    .ok_or_else(|| HttpError::MissingLocation {
                        url: current.to_string(),
                        status: status.as_u16(),
                    })?;
                debug!("HTTP {} redirect: {} -> {}", status.as_u16(), current, location);
                current = location;
                continue;
            }

            if status != StatusCode::OK {
                return Err(HttpError::Status {
                    url: current.to_string(),
                    status: status.as_u16(),
                }
                .into());
            }

            return Ok(response);
        }

        Err(HttpError::TooManyRedirects {
            url: url.to_string(),
            max: MAX_REDIRECTS,
        }
        .into())
    }
}

fn is_followed_redirect(status: StatusCode) -> bool {
    status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND
}
