//! Icon resolution.
//!
//! Searches `<link>` elements by relation type in a fixed priority order; the
//! first relation that yields an href wins and later ones are not consulted.
//!
//! | priority | `rel`                          | pick                        |
//! |----------|--------------------------------|-----------------------------|
//! | 1        | `apple-touch-icon`             | first in document order     |
//! | 2        | `shortcut icon`                | first in document order     |
//! | 3        | `apple-touch-icon-precomposed` | largest declared width      |
//! | 4        | `icon`                         | largest declared width      |
//!
//! Relation matching is exact and case-sensitive against the whole `rel`
//! attribute.

mod normalize;
mod size;

pub use normalize::{absolutize, strip_scheme};
pub use size::declared_width;

use std::cmp::Reverse;
use url::Url;

use crate::document::Document;

/// Marker appended to the fallback icon when the page declares no usable icon.
pub const NO_ICON_MARKER: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pick {
    First,
    Largest,
}

const PRIORITY: [(&str, Pick); 4] = [
    ("apple-touch-icon", Pick::First),
    ("shortcut icon", Pick::First),
    ("apple-touch-icon-precomposed", Pick::Largest),
    ("icon", Pick::Largest),
];

/// A `<link>` that carries a `rel` attribute.
#[derive(Debug, Clone, Copy)]
struct IconCandidate<'a> {
    rel: &'a str,
    href: Option<&'a str>,
    sizes: Option<&'a str>,
}

fn candidates(doc: &Document) -> Vec<IconCandidate<'_>> {
    doc.elements("link")
        .filter_map(|el| {
            Some(IconCandidate {
                rel: el.attr("rel")?,
                href: el.attr("href"),
                sizes: el.attr("sizes"),
            })
        })
        .collect()
}

fn pick<'a>(candidates: &[IconCandidate<'a>], rel: &str, how: Pick) -> Option<&'a str> {
    let mut matching: Vec<&IconCandidate<'a>> =
        candidates.iter().filter(|c| c.rel == rel).collect();
    if how == Pick::Largest {
        // Stable: equal widths keep document order.
        matching.sort_by_key(|c| Reverse(declared_width(c.sizes)));
    }
    matching
        .first()
        .and_then(|c| c.href)
        .filter(|href| !href.is_empty())
}

/// The raw href of the best icon link, before normalization.
pub fn detect(doc: &Document) -> Option<String> {
    let candidates = candidates(doc);
    PRIORITY
        .iter()
        .find_map(|&(rel, how)| pick(&candidates, rel, how))
        .map(str::to_string)
}

/// `<fallback>?<reason>`.
pub fn fallback_icon(fallback: &str, reason: &str) -> String {
    format!("{}?{}", fallback, reason)
}

/// Best icon URL for the page at `target`. Never fails: when nothing is
/// declared, returns the fallback icon marked `?none`.
pub fn resolve(doc: &Document, target: &Url, fallback: &str) -> String {
    match detect(doc) {
        Some(href) => absolutize(&href, target),
        None => fallback_icon(fallback, NO_ICON_MARKER),
    }
}
