//! Request orchestration.
//!
//! Per request: origin check → cache lookup → target extraction → fetch and
//! resolve → response assembly → background cache store. Every error after
//! the origin check is caught here and becomes a 500 whose body is the error
//! text; nothing is partially returned.

mod resolve;
mod response;

pub use resolve::{fetch_and_resolve, resolve_document, resolve_page};
pub use response::{expires_header, INVALID_CLIENT_BODY};

use chrono::Utc;
use http::header::ORIGIN;
use http::{Request, Response, Uri};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

use crate::cache::{CacheKey, MemoryCache, ResponseCache, StoredResponse};
use crate::config::UnfurlConfig;
use crate::error::UnfurlError;
use crate::fetch::{CurlFetcher, PageFetcher};
use crate::icon::strip_scheme;
use crate::origin::OriginPolicy;
use crate::overrides::OverrideTable;

/// The JSON payload. An absent theme is encoded as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub icon: String,
    pub theme: Option<String>,
}

/// A response plus the cache store it scheduled, if any.
///
/// The store runs detached; awaiting `store` is optional and only tells the
/// caller when it finished.
#[derive(Debug)]
pub struct Handled {
    pub response: Response<String>,
    pub store: Option<JoinHandle<()>>,
}

impl Handled {
    fn immediate(response: Response<String>) -> Self {
        Self {
            response,
            store: None,
        }
    }
}

/// Value of the `target` query parameter.
pub fn target_from_uri(uri: &Uri) -> Result<String, UnfurlError> {
    let query = uri.query().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == "target")
        .map(|(_, value)| value.into_owned())
        .ok_or(UnfurlError::MissingTarget)
}

pub struct Unfurler {
    fetcher: Arc<dyn PageFetcher>,
    cache: Arc<dyn ResponseCache>,
    overrides: Arc<OverrideTable>,
    origins: OriginPolicy,
    fallback_icon: Arc<str>,
    strip_icon_scheme: bool,
}

impl Unfurler {
    pub fn new(
        cfg: &UnfurlConfig,
        fetcher: Arc<dyn PageFetcher>,
        cache: Arc<dyn ResponseCache>,
    ) -> Self {
        Self {
            fetcher,
            cache,
            overrides: Arc::new(OverrideTable::new(&cfg.overrides)),
            origins: OriginPolicy::from_config(cfg),
            fallback_icon: Arc::from(cfg.fallback_icon.as_str()),
            strip_icon_scheme: cfg.strip_icon_scheme,
        }
    }

    /// curl fetcher and an in-memory cache, both from `cfg`.
    pub fn from_config(cfg: &UnfurlConfig) -> Self {
        let fetcher = Arc::new(CurlFetcher::new(cfg.fetch_config()));
        let cache = Arc::new(MemoryCache::new(
            Duration::from_secs(cfg.cache_ttl_secs),
            cfg.cache_max_entries,
        ));
        Self::new(cfg, fetcher, cache)
    }

    pub async fn handle(&self, request: &Request<()>) -> Handled {
        let origin = request
            .headers()
            .get(ORIGIN)
            .and_then(|value| value.to_str().ok());
        let settings = self.origins.evaluate(origin);
        let origin = match origin {
            Some(origin) if settings.valid => origin,
            _ => {
                tracing::debug!("rejecting request from origin {:?}", origin);
                return Handled::immediate(response::unauthorized());
            }
        };

        let key = CacheKey {
            uri: request.uri().to_string(),
            origin: origin.to_string(),
        };
        if let Some(hit) = self.cache.lookup(&key) {
            tracing::debug!("cache hit for {}", key.uri);
            return Handled::immediate(hit.into_response());
        }

        let assembled = self
            .unfurl_uri(request.uri())
            .await
            .and_then(|resolution| response::ok(&resolution, origin, Utc::now()));
        let response = match assembled {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    UnfurlError::Fetch(fe) => {
                        tracing::warn!("unfurl {} failed ({:?}): {}", request.uri(), fe.kind, e)
                    }
                    _ => tracing::warn!("unfurl {} failed: {}", request.uri(), e),
                }
                return Handled::immediate(response::server_error(&e));
            }
        };

        let store = settings.cache.then(|| self.spawn_store(key, &response));
        Handled { response, store }
    }

    async fn unfurl_uri(&self, uri: &Uri) -> Result<Resolution, UnfurlError> {
        let target = target_from_uri(uri)?;
        self.unfurl(&target).await
    }

    /// Resolve icon and theme for `target`, without origin checks or caching.
    pub async fn unfurl(&self, target: &str) -> Result<Resolution, UnfurlError> {
        let url = Url::parse(target).map_err(|source| UnfurlError::InvalidTarget {
            target: target.to_string(),
            source,
        })?;

        let fetcher = Arc::clone(&self.fetcher);
        let overrides = Arc::clone(&self.overrides);
        let fallback = Arc::clone(&self.fallback_icon);
        let mut resolution = tokio::task::spawn_blocking(move || {
            fetch_and_resolve(fetcher.as_ref(), &url, &overrides, &fallback)
        })
        .await??;

        if self.strip_icon_scheme {
            resolution.icon = strip_scheme(&resolution.icon).to_string();
        }
        Ok(resolution)
    }

    fn spawn_store(&self, key: CacheKey, response: &Response<String>) -> JoinHandle<()> {
        let cache = Arc::clone(&self.cache);
        let stored = StoredResponse::from_response(response);
        tokio::task::spawn_blocking(move || {
            let uri = key.uri.clone();
            if let Err(e) = cache.store(key, stored) {
                tracing::warn!("cache store for {} failed: {:#}", uri, e);
            }
        })
    }
}
