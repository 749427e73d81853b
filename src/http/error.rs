//! Typed HTTP failures that callers may want to inspect.

/// Errors raised by [`super::HttpClient`] for responses it refuses to accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Final response had a status other than 200 OK
    Status { url: String, status: u16 },
    /// The redirect chain was longer than allowed
    TooManyRedirects { url: String, max: usize },
    /// A 301/302 response came without a usable `Location` header
    MissingLocation { url: String, status: u16 },
}

impl HttpError {
    /// Status code of the offending response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } | HttpError::MissingLocation { status, .. } => {
                Some(*status)
            }
            HttpError::TooManyRedirects { .. } => None,
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::Status { url, status } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            HttpError::TooManyRedirects { url, max } => {
                write!(f, "Too many redirects (more than {}) starting at {}", max, url)
            }
            HttpError::MissingLocation { url, status } => {
                write!(
                    f,
                    "HTTP {} redirect from {} has no valid Location header",
                    status, url
                )
            }
        }
    }
}

impl std::error::Error for HttpError {}
