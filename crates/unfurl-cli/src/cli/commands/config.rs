//! `unfurl config` – where the config lives and what it says.

use anyhow::Result;
use std::path::Path;
use unfurl_core::config::{self, UnfurlConfig};

pub fn run_config(cfg: &UnfurlConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
