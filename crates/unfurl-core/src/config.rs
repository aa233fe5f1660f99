use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Page fetch parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Overall transfer timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of redirects followed.
    pub max_redirections: u32,
    /// Optional `User-Agent` sent with page fetches.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            max_redirections: 10,
            user_agent: None,
        }
    }
}

/// A hostname whose icon is pinned instead of detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub domain: String,
    pub icon: String,
}

impl OverrideEntry {
    fn new(domain: &str, icon: &str) -> Self {
        Self {
            domain: domain.to_string(),
            icon: icon.to_string(),
        }
    }
}

fn default_cache_max_entries() -> usize {
    10_000
}

/// Global configuration loaded from `~/.config/unfurl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnfurlConfig {
    /// Address `unfurl serve` binds to.
    pub listen: SocketAddr,
    /// Caller hostnames allowed to use the service (exact match on the Origin host).
    pub allowed_origins: Vec<String>,
    /// Allowed origin whose responses are never cached (local development).
    pub local_origin: String,
    /// Icon returned when nothing usable is found; suffixed with `?<reason>`.
    pub fallback_icon: String,
    /// Return icons without their scheme (`//host/path`).
    #[serde(default)]
    pub strip_icon_scheme: bool,
    /// Lifetime of entries in the in-process response cache.
    pub cache_ttl_secs: u64,
    /// Upper bound on entries in the in-process response cache; oldest go first.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
    /// Optional fetch settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
    /// Manually pinned icons, by exact hostname.
    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,
}

impl Default for UnfurlConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8787)),
            allowed_origins: vec![
                "localhost".to_string(),
                "devconf.co.za".to_string(),
                "www.devconf.co.za".to_string(),
            ],
            local_origin: "localhost".to_string(),
            fallback_icon: "/public/images/hl3confirmed.jpg".to_string(),
            strip_icon_scheme: false,
            cache_ttl_secs: 86_400,
            cache_max_entries: default_cache_max_entries(),
            fetch: None,
            overrides: vec![
                OverrideEntry::new("www.facebook.com", "/public/images/media/facebook.png"),
                OverrideEntry::new("www.youtube.com", "/public/images/media/youtube.png"),
                OverrideEntry::new("www.bizcommunity.com", "https://biz-file.com/res/img/logo.gif"),
                OverrideEntry::new(
                    "it-online.co.za",
                    "https://it-online.co.za/wp-content/uploads/2017/12/IT-Online-Logo.png",
                ),
                OverrideEntry::new(
                    "www.itweb.co.za",
                    "https://www.itweb.co.za/static/assets/favicon-96x96.png",
                ),
            ],
        }
    }
}

impl UnfurlConfig {
    /// Fetch settings, falling back to defaults when the section is absent.
    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }

    /// Logs settings that load fine but cannot behave as intended.
    pub fn warn_inconsistencies(&self) {
        if !self.allowed_origins.iter().any(|o| o == &self.local_origin) {
            tracing::warn!(
                "local_origin {:?} is not in allowed_origins; it will always be rejected",
                self.local_origin
            );
        }
        if self.fallback_icon.is_empty() {
            tracing::warn!("fallback_icon is empty; fallback responses will be bare markers");
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("unfurl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UnfurlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UnfurlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<UnfurlConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: UnfurlConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    cfg.warn_inconsistencies();
    Ok(cfg)
}
