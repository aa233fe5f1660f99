//! `unfurl inspect <file> --target <url>` – resolve from saved markup.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use unfurl_core::config::UnfurlConfig;
use unfurl_core::document::Document;
use unfurl_core::handler::resolve_document;
use unfurl_core::icon;
use unfurl_core::overrides::OverrideTable;
use url::Url;

pub fn run_inspect(cfg: &UnfurlConfig, path: &Path, target: &str) -> Result<()> {
    let markup =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let target = Url::parse(target).with_context(|| format!("invalid target URL {:?}", target))?;

    let doc = Document::parse(&markup);
    let overrides = OverrideTable::new(&cfg.overrides);
    let mut resolution = resolve_document(&doc, &target, &overrides, &cfg.fallback_icon);
    if cfg.strip_icon_scheme {
        resolution.icon = icon::strip_scheme(&resolution.icon).to_string();
    }

    match icon::detect(&doc) {
        Some(href) => tracing::debug!("declared icon href: {}", href),
        None => tracing::debug!("no icon link declared in {}", path.display()),
    }
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}
