//! Page fetcher backed by a libcurl easy handle.

use std::time::Duration;
use url::Url;

use super::{FetchError, PageFetcher, RawPage};
use crate::config::FetchConfig;

/// Bodies are truncated past this size; icon and theme tags live in `<head>`.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Appends as much of `data` as fits under `cap` and returns the count taken.
/// Anything short of `data.len()` tells curl to stop the transfer.
fn append_capped(body: &mut Vec<u8>, data: &[u8], cap: usize) -> usize {
    let take = data.len().min(cap.saturating_sub(body.len()));
    body.extend_from_slice(&data[..take]);
    take
}

/// Blocking GET via curl. Call from `spawn_blocking` when used from async code.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    cfg: FetchConfig,
}

impl CurlFetcher {
    pub fn new(cfg: FetchConfig) -> Self {
        Self { cfg }
    }
}

impl PageFetcher for CurlFetcher {
    fn get(&self, url: &Url) -> Result<RawPage, FetchError> {
        let target = url.as_str();
        let err = |e: curl::Error| FetchError::from_curl(target, &e);
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(target).map_err(err)?;
        easy.get(true).map_err(err)?;
        easy.follow_location(true).map_err(err)?;
        easy.max_redirections(self.cfg.max_redirections).map_err(err)?;
        easy.connect_timeout(Duration::from_secs(self.cfg.connect_timeout_secs))
            .map_err(err)?;
        easy.timeout(Duration::from_secs(self.cfg.timeout_secs))
            .map_err(err)?;
        // Empty string: accept every encoding libcurl can decode.
        easy.accept_encoding("").map_err(err)?;
        if let Some(ua) = &self.cfg.user_agent {
            easy.useragent(ua).map_err(err)?;
        }

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| Ok(append_capped(&mut body, data, MAX_BODY_BYTES)))
                .map_err(err)?;
            transfer.perform()
        };
        match performed {
            Ok(()) => {}
            // Short write once the cap is hit aborts the transfer; keep what we have.
            Err(e) if e.is_write_error() && body.len() >= MAX_BODY_BYTES => {
                tracing::debug!("GET {} truncated at {} bytes", target, body.len());
            }
            Err(e) => return Err(err(e)),
        }

        let status = easy.response_code().map_err(err)?;
        tracing::debug!("GET {} -> HTTP {} ({} bytes)", target, status, body.len());

        Ok(RawPage {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
