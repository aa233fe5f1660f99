//! Caller allow-list.
//!
//! The `Origin` header is parsed as a URL and its host must exactly equal one
//! of the allowed hostnames. One allowed host is designated local: it may call
//! the service but its responses are never cached.

use std::collections::HashSet;
use url::Url;

use crate::config::UnfurlConfig;

/// What the service may do for a given caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSettings {
    pub valid: bool,
    pub cache: bool,
}

impl SourceSettings {
    const REJECTED: Self = Self {
        valid: false,
        cache: false,
    };
}

#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: HashSet<String>,
    local: String,
}

impl OriginPolicy {
    pub fn new<I, S>(allowed: I, local: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            local: local.to_string(),
        }
    }

    pub fn from_config(cfg: &UnfurlConfig) -> Self {
        Self::new(cfg.allowed_origins.iter().cloned(), &cfg.local_origin)
    }

    pub fn evaluate(&self, origin: Option<&str>) -> SourceSettings {
        let Some(origin) = origin else {
            return SourceSettings::REJECTED;
        };
        let host = match Url::parse(origin) {
            Ok(url) => url.host_str().map(str::to_string),
            Err(_) => None,
        };
        match host {
            Some(host) if self.allowed.contains(&host) => SourceSettings {
                valid: true,
                cache: host != self.local,
            },
            _ => SourceSettings::REJECTED,
        }
    }
}
