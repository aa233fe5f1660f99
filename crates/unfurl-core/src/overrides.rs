//! Manually pinned icons for sites whose markup misleads auto-detection.

use std::collections::HashMap;

use crate::config::OverrideEntry;

/// Hostname → icon URL. Built once from config, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    icons: HashMap<String, String>,
}

impl OverrideTable {
    /// Builds the table; on duplicate domains the first entry wins.
    pub fn new(entries: &[OverrideEntry]) -> Self {
        let mut icons = HashMap::with_capacity(entries.len());
        for entry in entries {
            icons
                .entry(entry.domain.clone())
                .or_insert_with(|| entry.icon.clone());
        }
        Self { icons }
    }

    /// Exact hostname match; no wildcard or subdomain matching.
    pub fn lookup(&self, hostname: &str) -> Option<&str> {
        self.icons.get(hostname).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
