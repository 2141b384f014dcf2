//! Webpages rendered to Markdown, and a cache for them.
//!
//! A [`Webpage`] keeps the raw HTML it was built from alongside its Markdown
//! rendering and title hint, so content location never has to go back to
//! the network. [`PageCache`] holds pages by URL for as long as its owner
//! keeps it around.

use std::collections::HashMap;

use htmd::HtmlToMarkdown;
use htmd::options::{HeadingStyle, Options};
use serde::Serialize;

use crate::content::{LocatorConfig, extract_content, locate_content_start};
use crate::hints;
use crate::standardize::clean_text;
use crate::{CitelocError, Result};

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};

/// A fetched page.
#[derive(Debug, Clone, Serialize)]
pub struct Webpage {
    pub url: String,
    /// Raw HTML.
    #[serde(skip)]
    pub source: String,
    /// Markdown rendering of `source`, always starting with a newline.
    pub markdown: String,
    /// `og:title` or `<title>` of the page.
    pub title_hint: Option<String>,
}

impl Webpage {
    /// Builds a page from HTML already in hand.
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Result<Self> {
        let source = html.into();
        let markdown = render_markdown(&source)?;
        let title_hint = hints::title_hint(&source);
        Ok(Self { url: url.into(), source, markdown, title_hint })
    }

    /// Fetches and renders a page.
    #[cfg(feature = "fetch")]
    pub async fn fetch(url: &str, config: &FetchConfig) -> Result<Self> {
        let html = fetch_url(url, config).await?;
        Self::from_html(url, html)
    }

    /// Offset into [`Webpage::markdown`] where the article starts.
    pub fn content_start(&self, config: &LocatorConfig) -> usize {
        locate_content_start(&self.markdown, self.title_hint.as_deref(), config)
    }

    /// The article content, starting at its title.
    pub fn content(&self, config: &LocatorConfig) -> String {
        extract_content(&self.markdown, self.title_hint.as_deref(), config)
    }

    /// The article content in the standardized form field values are
    /// located in.
    pub fn standardized_content(&self, config: &LocatorConfig) -> String {
        clean_text(&self.content(config))
    }
}

/// Renders HTML to Markdown with ATX headings.
///
/// The result starts with `"\n"` so a heading on the first line still has
/// the newline its marker needs.
pub fn render_markdown(html: &str) -> Result<String> {
    let converter = HtmlToMarkdown::builder()
        .options(Options { heading_style: HeadingStyle::Atx, ..Default::default() })
        .skip_tags(vec!["script", "style", "noscript"])
        .build();
    let markdown = converter.convert(html).map_err(|e| CitelocError::RenderError(e.to_string()))?;
    Ok(format!("\n{}", markdown))
}

/// Pages keyed by URL.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: HashMap<String, Webpage>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&Webpage> {
        self.pages.get(url)
    }

    /// Stores a page, replacing any earlier page for the same URL.
    pub fn insert(&mut self, page: Webpage) -> Option<Webpage> {
        self.pages.insert(page.url.clone(), page)
    }

    pub fn remove(&mut self, url: &str) -> Option<Webpage> {
        self.pages.remove(url)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Returns the cached page for `url`, fetching it on a miss.
    ///
    /// Failed fetches are not cached.
    #[cfg(feature = "fetch")]
    pub async fn fetch(&mut self, url: &str, config: &FetchConfig) -> Result<&Webpage> {
        if !self.pages.contains_key(url) {
            let page = Webpage::fetch(url, config).await?;
            self.pages.insert(url.to_string(), page);
        }
        self.pages.get(url).ok_or_else(|| CitelocError::InvalidUrl(url.to_string()))
    }
}
