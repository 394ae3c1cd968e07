use std::future::Future;
use thiserror::Error;
use url::Url;

/// Errors raised while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid request header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Source of raw page markup.
///
/// Walkers only depend on this trait, so tests can serve pages from memory.
pub trait PageFetcher {
    /// GET `url` and return the response body
    fn fetch_page(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}
