//! Parsed HTML document, queryable by tag name.
//!
//! Thin wrapper over `scraper::Html`. Parsing is lenient (html5ever error
//! recovery), so any text produces a document.

use scraper::node::Element;
use scraper::Html;

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Elements named `tag`, in document order.
    pub fn elements<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(|node| node.value().as_element())
            .filter(move |el| el.name() == tag)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("parse_errors", &self.html.errors.len())
            .finish()
    }
}
