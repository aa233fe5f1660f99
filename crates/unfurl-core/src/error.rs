//! Errors that abort a single unfurl request.
//!
//! The `Display` text of each variant is what the caller sees as the body of a
//! 500 response, so messages are short and self-contained.

use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum UnfurlError {
    /// Request URL has no `target` query parameter.
    #[error("missing target parameter")]
    MissingTarget,
    /// `target` is not an absolute URL.
    #[error("invalid target URL {target:?}: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },
    /// Network-level failure reaching the target page.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The blocking fetch task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("encoding response: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("building response: {0}")]
    Response(#[from] http::Error),
}
