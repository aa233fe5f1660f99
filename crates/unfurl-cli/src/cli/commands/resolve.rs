//! `unfurl resolve <target>` – one-off lookup, no origin check or cache.

use anyhow::Result;
use std::sync::Arc;
use unfurl_core::cache::NoCache;
use unfurl_core::config::UnfurlConfig;
use unfurl_core::fetch::CurlFetcher;
use unfurl_core::Unfurler;

pub async fn run_resolve(cfg: &UnfurlConfig, target: &str) -> Result<()> {
    let fetcher = Arc::new(CurlFetcher::new(cfg.fetch_config()));
    let unfurler = Unfurler::new(cfg, fetcher, Arc::new(NoCache));
    let resolution = unfurler.unfurl(target).await?;
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}
