//! Locate article content and citation fields inside scraped web pages.
//!
//! Pages are rendered to Markdown, trimmed to where the article starts, and
//! standardized; citation values (title, authors, date) are then located in
//! the result as byte spans.
//!
//! # Example
//!
//! ```rust
//! use citeloc_core::{FieldKind, LocatorConfig, clean_text, locate, locate_content_start};
//!
//! let markdown = "\n# Home\n# Bees in Winter\nBy Ada Lovelace, March 3, 2015";
//! let start = locate_content_start(markdown, Some("Bees in Winter"), &LocatorConfig::default());
//! let text = clean_text(&markdown[start..]);
//!
//! let date = locate(&"03/03/15".into(), &text, FieldKind::Date);
//! assert!(date.is_found());
//! ```

pub mod citation;
pub mod content;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod heading;
pub mod hints;
pub mod locate;
pub mod similarity;
pub mod standardize;

#[cfg(all(feature = "fetch", feature = "markdown"))]
pub mod collect;
#[cfg(feature = "markdown")]
pub mod evaluate;
#[cfg(feature = "markdown")]
pub mod page;

pub use citation::{Citation, locate_citation};
pub use content::{LocatorConfig, LocatorConfigBuilder, extract_content, locate_content_start};
pub use error::{CitelocError, Result};
pub use fetch::{FetchConfig, Source, fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::{fetch_source, fetch_url};
pub use formatters::{JsonConfig, JsonFormatter, LocationOutput, TextConfig, TextFormatter, to_json};
pub use heading::{Heading, MAX_HEADING_LEVEL, find_heading};
pub use hints::{Document, title_hint};
pub use locate::{Location, Span, locate};
pub use similarity::similarity;
pub use standardize::{FieldKind, FieldValue, clean_text, standardize, standardize_text};

#[cfg(all(feature = "fetch", feature = "markdown"))]
pub use collect::{CollectConfig, CollectedDocument, Collection, collect};
#[cfg(feature = "markdown")]
pub use evaluate::{ContentStartReport, PreservationReport, Sample, content_start_accuracy, data_preservation};
#[cfg(feature = "markdown")]
pub use page::{PageCache, Webpage, render_markdown};
