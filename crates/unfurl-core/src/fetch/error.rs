//! Network-level page fetch failure.

use thiserror::Error;

/// Rough class of a transport failure, for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Timeout,
    Connection,
    Other,
}

/// The target page could not be fetched at all (no HTTP status to classify).
#[derive(Debug, Error)]
#[error("GET {url} failed: {message}")]
pub struct FetchError {
    pub url: String,
    pub kind: TransportKind,
    pub message: String,
}

impl FetchError {
    pub fn new(url: &str, kind: TransportKind, message: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            kind,
            message: message.into(),
        }
    }

    pub fn from_curl(url: &str, e: &curl::Error) -> Self {
        Self::new(url, classify_curl_error(e), e.to_string())
    }
}

/// Classify a curl error by what went wrong on the wire.
pub fn classify_curl_error(e: &curl::Error) -> TransportKind {
    if e.is_operation_timedout() {
        return TransportKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_ssl_connect_error()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportKind::Connection;
    }
    TransportKind::Other
}
