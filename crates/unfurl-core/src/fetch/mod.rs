//! Page fetch adapter.
//!
//! Wraps a [`PageFetcher`] and the HTML parser, classifying the outcome:
//!
//! - HTTP 500 → recoverable content error (`badStatus500`), no parse.
//! - any other status → body parsed, error pages included (many sites serve
//!   useful `<head>` markup on 404s).
//! - transport failure → `Err`, left for the caller to surface.

mod easy;
mod error;

pub use easy::CurlFetcher;
pub use error::{classify_curl_error, FetchError, TransportKind};

use url::Url;

use crate::document::Document;

/// Status and body of a fetched page.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub status: u32,
    pub body: String,
}

/// Something that can GET a page. Blocking; implementations must be shareable
/// across requests.
pub trait PageFetcher: Send + Sync {
    fn get(&self, url: &Url) -> Result<RawPage, FetchError>;
}

/// Outcome of fetching and parsing a target page.
#[derive(Debug)]
pub enum FetchedPage {
    Parsed(Document),
    /// Label such as `badStatus500`, appended to the fallback icon.
    ContentError(String),
}

/// Content error label for statuses that are not worth parsing.
pub fn classify_status(status: u32) -> Option<String> {
    match status {
        500 => Some(format!("badStatus{}", status)),
        _ => None,
    }
}

pub fn fetch_page(fetcher: &dyn PageFetcher, url: &Url) -> Result<FetchedPage, FetchError> {
    let page = fetcher.get(url)?;
    if let Some(label) = classify_status(page.status) {
        tracing::warn!("{} returned HTTP {}; using fallback icon", url, page.status);
        return Ok(FetchedPage::ContentError(label));
    }
    Ok(FetchedPage::Parsed(Document::parse(&page.body)))
}
