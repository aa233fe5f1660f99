//! Turning a fetched page into a [`Resolution`].

use url::Url;

use super::Resolution;
use crate::document::Document;
use crate::fetch::{fetch_page, FetchError, FetchedPage, PageFetcher};
use crate::icon;
use crate::overrides::OverrideTable;
use crate::theme::extract_theme;

/// Icon and theme for a parsed page. Overrides (by exact target hostname)
/// win over anything the markup declares.
pub fn resolve_document(
    doc: &Document,
    target: &Url,
    overrides: &OverrideTable,
    fallback: &str,
) -> Resolution {
    let pinned = target.host_str().and_then(|host| overrides.lookup(host));
    let icon = match pinned {
        Some(icon) => icon.to_string(),
        None => icon::resolve(doc, target, fallback),
    };
    Resolution {
        icon,
        theme: extract_theme(doc),
    }
}

pub fn resolve_page(
    page: FetchedPage,
    target: &Url,
    overrides: &OverrideTable,
    fallback: &str,
) -> Resolution {
    match page {
        FetchedPage::ContentError(label) => Resolution {
            icon: icon::fallback_icon(fallback, &label),
            theme: None,
        },
        FetchedPage::Parsed(doc) => resolve_document(&doc, target, overrides, fallback),
    }
}

/// Fetch, parse and resolve in one blocking step.
pub fn fetch_and_resolve(
    fetcher: &dyn PageFetcher,
    target: &Url,
    overrides: &OverrideTable,
    fallback: &str,
) -> Result<Resolution, FetchError> {
    let page = fetch_page(fetcher, target)?;
    Ok(resolve_page(page, target, overrides, fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnfurlConfig;

    const FALLBACK: &str = "/public/images/hl3confirmed.jpg";

    fn default_overrides() -> OverrideTable {
        OverrideTable::new(&UnfurlConfig::default().overrides)
    }

    #[test]
    fn relative_override_is_returned_verbatim() {
        let doc = Document::parse(
            r#"<html><head><link rel="apple-touch-icon" href="/touch.png"></head></html>"#,
        );
        let target = Url::parse("https://www.facebook.com/devconf").unwrap();
        let r = resolve_document(&doc, &target, &default_overrides(), FALLBACK);
        assert_eq!(r.icon, "/public/images/media/facebook.png");
    }

    #[test]
    fn override_needs_exact_host() {
        let doc = Document::parse(
            r#"<html><head><link rel="apple-touch-icon" href="/touch.png"></head></html>"#,
        );
        let target = Url::parse("https://facebook.com/devconf").unwrap();
        let r = resolve_document(&doc, &target, &default_overrides(), FALLBACK);
        assert_eq!(r.icon, "https://facebook.com/touch.png");
    }

    #[test]
    fn content_error_has_no_theme() {
        let target = Url::parse("https://www.facebook.com/").unwrap();
        let r = resolve_page(
            FetchedPage::ContentError("badStatus500".to_string()),
            &target,
            &default_overrides(),
            FALLBACK,
        );
        assert_eq!(r.icon, format!("{}?badStatus500", FALLBACK));
        assert_eq!(r.theme, None);
    }
}
