//! HTML parsing and element access.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and querying the DOM tree with CSS selectors. Content-derived
//! features only need a handful of queries (the `<title>` element and the
//! page's `<a>` tags), so the surface here is intentionally small.
//!
//! # Example
//!
//! ```rust
//! use hamus_core::parse::Document;
//!
//! let html = r#"<html><head><title>Login</title></head><body><a href="/a">x</a></body></html>"#;
//! let doc = Document::parse(html).unwrap();
//! assert_eq!(doc.title(), Some("Login".to_string()));
//! assert_eq!(doc.select("a").unwrap().len(), 1);
//! ```

use scraper::{Html, Selector};

use crate::{HamusError, Result};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors and reading the page title.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// scraper's parser is lenient: malformed markup still produces a tree,
    /// so this only fails on pathological inputs.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`HamusError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| HamusError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the title of the document.
    ///
    /// Returns the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

/// A wrapper around scraper's ElementRef.
///
/// Element represents a single node in the HTML document tree and provides
/// access to its attributes and text content.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
        </head>
        <body>
            <h1>Heading</h1>
            <a href="https://example.com/one">First</a>
            <a href="/two">Second</a>
            <a>Anchor without href</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_select_anchors() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select("a").unwrap();

        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].attr("href"), Some("https://example.com/one"));
        assert_eq!(elements[1].attr("href"), Some("/two"));
        assert_eq!(elements[2].attr("href"), None);
    }

    #[test]
    fn test_element_text() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select("h1").unwrap();

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].text(), "Heading");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(HamusError::HtmlParseError(_))));
    }

    #[test]
    fn test_missing_title() {
        let doc = Document::parse("<html><body><p>No title here</p></body></html>").unwrap();
        assert_eq!(doc.title(), None);
    }
}
