//! HTTP client module with manual redirect handling and error reporting.

mod client;
mod error;

pub use client::{HttpClient, MAX_REDIRECTS, client_builder};
pub use error::HttpError;
