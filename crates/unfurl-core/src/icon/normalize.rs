//! Turning a chosen icon href into something a client can load directly.

use url::Url;

/// Makes `href` absolute against the scheme and host of `target`.
///
/// Hrefs that already carry a hostname are returned untouched (not
/// re-serialized). Relative paths resolve against the site root, and
/// protocol-relative hrefs pick up the target's scheme.
pub fn absolutize(href: &str, target: &Url) -> String {
    if let Ok(parsed) = Url::parse(href) {
        if parsed.host_str().is_some_and(|h| !h.is_empty()) {
            return href.to_string();
        }
    }

    let mut base = target.clone();
    base.set_path("/");
    base.set_query(None);
    base.set_fragment(None);

    match base.join(href) {
        Ok(joined) => joined.to_string(),
        Err(e) => {
            tracing::debug!("cannot join icon href {:?} onto {}: {}", href, base, e);
            format!("{}{}", site_prefix(target), href)
        }
    }
}

/// `scheme://host[:port]` of `target`.
fn site_prefix(target: &Url) -> String {
    let host = target.host_str().unwrap_or_default();
    match target.port() {
        Some(port) => format!("{}://{}:{}", target.scheme(), host, port),
        None => format!("{}://{}", target.scheme(), host),
    }
}

/// Drops the leading `scheme:` so the icon loads over the caller's protocol.
///
/// Values without a scheme (fallback paths) pass through.
pub fn strip_scheme(icon: &str) -> &str {
    match icon.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => icon,
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Url {
        Url::parse("https://example.com/a/b").unwrap()
    }

    #[test]
    fn root_relative() {
        assert_eq!(
            absolutize("/favicon.ico", &target()),
            "https://example.com/favicon.ico"
        );
    }

    #[test]
    fn path_relative_resolves_at_site_root() {
        assert_eq!(
            absolutize("img/icon.png", &target()),
            "https://example.com/img/icon.png"
        );
    }

    #[test]
    fn protocol_relative_takes_target_scheme() {
        assert_eq!(
            absolutize("//cdn.example.net/i.png", &target()),
            "https://cdn.example.net/i.png"
        );
    }

    #[test]
    fn absolute_passes_through_verbatim() {
        assert_eq!(
            absolutize("https://CDN.Example.net/x.png", &target()),
            "https://CDN.Example.net/x.png"
        );
    }

    #[test]
    fn keeps_target_port() {
        let t = Url::parse("http://127.0.0.1:8080/page?q=1").unwrap();
        assert_eq!(absolutize("/i.png", &t), "http://127.0.0.1:8080/i.png");
    }

    #[test]
    fn strip_scheme_only_strips_schemes() {
        assert_eq!(strip_scheme("https://a.test/i.png"), "//a.test/i.png");
        assert_eq!(strip_scheme("/public/x.jpg?none"), "/public/x.jpg?none");
        assert_eq!(strip_scheme("/p?a=b:c"), "/p?a=b:c");
    }
}
