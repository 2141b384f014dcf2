//! Locating where the real article content starts in a rendered page.
//!
//! Webpages put navigation chrome ("Search", "Home", menus) ahead of the
//! article. The content start is taken to be the caption of the article's
//! title heading, chosen in one of two ways:
//!
//! 1. With a title hint (the page's `og:title` or `<title>`), every heading of
//!    levels 1 to 4 is scored against the hint. A near-exact match is returned
//!    immediately; otherwise the best-scoring heading wins if it clears a low
//!    acceptance floor.
//! 2. Without a hint, or when nothing cleared the floor, the first heading
//!    whose caption is not known boilerplate wins.
//!
//! When the page has no usable heading at all, the whole document is content
//! and the offset is `0`.
//!
//! # Example
//!
//! ```rust
//! use citeloc_core::content::{LocatorConfig, extract_content, locate_content_start};
//!
//! let markdown = "Foo\n# Bar\nBaz";
//! let start = locate_content_start(markdown, None, &LocatorConfig::default());
//! assert_eq!(&markdown[start..], "Bar\nBaz");
//! ```

use tracing::debug;

use crate::heading::{Heading, MAX_HEADING_LEVEL, headings};
use crate::similarity::similarity;

/// Configuration for content-start location.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// A heading scoring above this against the title hint is returned
    /// without looking any further (default: 0.95).
    pub accept_threshold: f64,

    /// The best heading must score above this to be trusted (default: 0.2).
    pub min_threshold: f64,

    /// Deepest heading level considered (default: 4).
    pub max_heading_level: usize,

    /// Captions that are never the article title, matched case-sensitively.
    pub ignored_captions: Vec<String>,

    /// Substrings removed from extracted content.
    pub ignored_substrings: Vec<String>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 0.95,
            min_threshold: 0.2,
            max_heading_level: MAX_HEADING_LEVEL,
            ignored_captions: ["", "Search", "News", "Home"].map(String::from).to_vec(),
            ignored_substrings: vec!["Image\n\n".to_string()],
        }
    }
}

impl LocatorConfig {
    /// Creates a new builder for LocatorConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use citeloc_core::LocatorConfig;
    ///
    /// let config = LocatorConfig::builder().min_threshold(0.5).ignore_caption("Menu").build();
    /// assert!(config.is_ignored("Menu"));
    /// ```
    pub fn builder() -> LocatorConfigBuilder {
        LocatorConfigBuilder::new()
    }

    /// Whether a caption is known boilerplate.
    pub fn is_ignored(&self, caption: &str) -> bool {
        self.ignored_captions.iter().any(|ignored| ignored == caption)
    }
}

/// Builder for LocatorConfig.
pub struct LocatorConfigBuilder {
    config: LocatorConfig,
}

impl LocatorConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: LocatorConfig::default() }
    }

    /// Sets the short-circuit acceptance threshold.
    pub fn accept_threshold(mut self, value: f64) -> Self {
        self.config.accept_threshold = value;
        self
    }

    /// Sets the minimum score for the best candidate.
    pub fn min_threshold(mut self, value: f64) -> Self {
        self.config.min_threshold = value;
        self
    }

    /// Sets the deepest heading level scanned.
    pub fn max_heading_level(mut self, value: usize) -> Self {
        self.config.max_heading_level = value;
        self
    }

    /// Adds a caption to the ignored set.
    pub fn ignore_caption(mut self, caption: impl Into<String>) -> Self {
        self.config.ignored_captions.push(caption.into());
        self
    }

    /// Adds a substring to strip from extracted content.
    pub fn ignore_substring(mut self, substring: impl Into<String>) -> Self {
        self.config.ignored_substrings.push(substring.into());
        self
    }

    /// Builds the config.
    pub fn build(self) -> LocatorConfig {
        self.config
    }
}

impl Default for LocatorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A heading scored against the title hint.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub heading: Heading<'a>,
    pub score: f64,
}

/// Finds the byte offset where article content starts.
///
/// The offset points at the first character of the winning heading's
/// caption, or is `0` when no heading qualifies. It is never beyond
/// `markdown.len()`.
pub fn locate_content_start(markdown: &str, title_hint: Option<&str>, config: &LocatorConfig) -> usize {
    let hint = title_hint.map(str::trim).filter(|hint| !hint.is_empty());

    if let Some(hint) = hint
        && let Some(heading) = best_match(markdown, hint, config)
    {
        return heading.offset;
    }

    match first_unignored(markdown, config) {
        Some(heading) => {
            debug!(caption = heading.caption, level = heading.size, "content starts at first non-boilerplate heading");
            heading.offset
        }
        None => {
            debug!("no usable heading, using whole document");
            0
        }
    }
}

/// Returns the content of `markdown` from the located start, with the
/// configured ignored substrings removed.
pub fn extract_content(markdown: &str, title_hint: Option<&str>, config: &LocatorConfig) -> String {
    let start = locate_content_start(markdown, title_hint, config);
    let mut content = markdown[start..].to_string();
    for substring in config.ignored_substrings.iter().filter(|s| !s.is_empty()) {
        content = content.replace(substring.as_str(), "");
    }
    content
}

/// Scores every heading against `hint`, level by level.
///
/// Returns early on a score above the acceptance threshold; otherwise the
/// highest-scoring heading if it clears the floor. Ties go to the heading
/// seen first.
fn best_match<'a>(markdown: &'a str, hint: &str, config: &LocatorConfig) -> Option<Heading<'a>> {
    let mut best: Option<Candidate<'a>> = None;

    for size in 1..=config.max_heading_level {
        for heading in headings(markdown, size) {
            let score = similarity(heading.caption, hint);
            if score > config.accept_threshold {
                debug!(caption = heading.caption, score, "heading matches title hint");
                return Some(heading);
            }
            if best.is_none_or(|b| score > b.score) {
                best = Some(Candidate { heading, score });
            }
        }
    }

    match best {
        Some(candidate) if candidate.score > config.min_threshold => {
            debug!(caption = candidate.heading.caption, score = candidate.score, "best heading for title hint");
            Some(candidate.heading)
        }
        Some(candidate) => {
            debug!(score = candidate.score, "no heading close enough to title hint");
            None
        }
        None => None,
    }
}

fn first_unignored<'a>(markdown: &'a str, config: &LocatorConfig) -> Option<Heading<'a>> {
    (1..=config.max_heading_level)
        .flat_map(|size| headings(markdown, size))
        .find(|heading| !config.is_ignored(heading.caption))
}
