//! Theme colour from `<meta name="theme-color" content="...">`.

use crate::document::Document;

/// Content of the first `theme-color` meta tag in document order.
///
/// A matching tag without `content` yields `None`; later tags are not consulted.
pub fn extract_theme(doc: &Document) -> Option<String> {
    doc.elements("meta")
        .find(|meta| meta.attr("name") == Some("theme-color"))
        .and_then(|meta| meta.attr("content"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_theme_color_wins() {
        let doc = Document::parse(
            r##"<head><meta charset="utf-8">
               <meta name="theme-color" content="#112233">
               <meta name="theme-color" content="#445566"></head>"##,
        );
        assert_eq!(extract_theme(&doc).as_deref(), Some("#112233"));
    }

    #[test]
    fn no_meta_tags() {
        let doc = Document::parse("<head><title>t</title></head>");
        assert_eq!(extract_theme(&doc), None);
    }

    #[test]
    fn other_meta_only() {
        let doc = Document::parse(
            r#"<meta name="description" content="x"><meta name="Theme-Color" content="red">"#,
        );
        assert_eq!(extract_theme(&doc), None);
    }
}
