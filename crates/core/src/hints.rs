//! Title hints from page HTML.
//!
//! The content-start locator works best when it knows roughly what the
//! article's title is. Pages usually say so twice: in an Open Graph
//! `og:title` meta tag, which tends to be the bare headline, and in the
//! `<title>` element, which often carries the site name as well.
//!
//! # Example
//!
//! ```rust
//! use citeloc_core::hints::Document;
//!
//! let html = r#"<html><head>
//!     <meta property="og:title" content="Seven World Trade Center fully leased">
//!     <title>Seven World Trade Center fully leased | New York Post</title>
//! </head></html>"#;
//!
//! let doc = Document::parse(html).unwrap();
//! assert_eq!(doc.title_hint().as_deref(), Some("Seven World Trade Center fully leased"));
//! ```

use scraper::{Html, Selector};

use crate::{CitelocError, Result};

/// A parsed HTML page.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an HTML string.
    pub fn parse(html: &str) -> Result<Self> {
        Ok(Self { html: Html::parse_document(html) })
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`CitelocError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| CitelocError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Text of the `<title>` element, trimmed. `None` when missing or blank.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    /// The `content` of the first `<meta>` tag whose `property` or `name`
    /// equals `key`.
    pub fn meta_content(&self, key: &str) -> Option<String> {
        ["property", "name"].iter().find_map(|attr| {
            let elements = self.select(&format!("meta[{}=\"{}\"]", attr, key)).ok()?;
            elements
                .iter()
                .filter_map(|el| el.attr("content"))
                .map(str::trim)
                .find(|content| !content.is_empty())
                .map(String::from)
        })
    }

    /// Best guess at the article title: `og:title`, then `<title>`.
    pub fn title_hint(&self) -> Option<String> {
        self.meta_content("og:title").or_else(|| self.title())
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }
}

/// Reads the title hint straight from an HTML string.
pub fn title_hint(html: &str) -> Option<String> {
    Document::parse(html).ok()?.title_hint()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <meta name="author" content="Paul Barretto">
            <meta property="og:title" content="  Seven World Trade Center fully leased ">
            <title>7 WTC fully leased | New York Post</title>
        </head>
        <body><h1>Seven World Trade Center fully leased</h1></body>
        </html>
    "#;

    #[test]
    fn test_og_title_preferred() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.title_hint(), Some("Seven World Trade Center fully leased".to_string()));
    }

    #[test]
    fn test_title_element_fallback() {
        let html = "<html><head><title> Just a title </title></head><body></body></html>";
        assert_eq!(title_hint(html), Some("Just a title".to_string()));
    }

    #[test]
    fn test_blank_og_title_is_skipped() {
        let html = r#"<html><head><meta property="og:title" content="  "><title>Fallback</title></head></html>"#;
        assert_eq!(title_hint(html), Some("Fallback".to_string()));
    }

    #[test]
    fn test_no_hint() {
        assert_eq!(title_hint("<html><body><p>nothing</p></body></html>"), None);
        assert_eq!(title_hint(""), None);
    }

    #[test]
    fn test_meta_content_by_name() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.meta_content("author"), Some("Paul Barretto".to_string()));
        assert_eq!(doc.meta_content("description"), None);
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert!(matches!(doc.select("[[invalid"), Err(CitelocError::HtmlParseError(_))));
    }
}
