//! Field location inside standardized article text.
//!
//! Given a field value and the standardized text of an article, find where the
//! value occurs. Each [`FieldKind`] has its own rule:
//!
//! - `title` / `generic`: first exact occurrence of the value.
//! - `author`: every name is standardized and searched independently; names
//!   that do not occur are left out of the result.
//! - `date`: the canonical `MM/DD/YY` value is compared, as a calendar date,
//!   against every date phrase found in the text.
//!
//! All offsets are byte offsets into the exact text passed in. Standardized
//! text is pure ASCII, so they are also character offsets. Pass the same
//! standardized string that will later be sliced; a re-derived copy is not
//! guaranteed to line up.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use tracing::debug;

use crate::dates;
use crate::standardize::{FieldKind, FieldValue, standardize_author};

/// A half-open byte range `[start, end)` into a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The slice of `text` this span covers, if it is in bounds.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.start)?;
        seq.serialize_element(&self.end)?;
        seq.end()
    }
}

/// The outcome of locating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A single-valued field (title, date, generic). `None` when not found.
    Single(Option<Span>),
    /// A multi-valued field (authors): the spans of every value found.
    Multiple(Vec<Span>),
}

impl Location {
    /// Whether anything was found.
    pub fn is_found(&self) -> bool {
        match self {
            Location::Single(span) => span.is_some(),
            Location::Multiple(spans) => !spans.is_empty(),
        }
    }

    /// Every span found, in order.
    pub fn spans(&self) -> Vec<Span> {
        match self {
            Location::Single(span) => span.iter().copied().collect(),
            Location::Multiple(spans) => spans.clone(),
        }
    }
}

/// Serialized as `[start, end]`, `[-1, -1]` when a single field is not
/// found, or a list of pairs for multi-valued fields.
impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Location::Single(Some(span)) => span.serialize(serializer),
            Location::Single(None) => [-1i64, -1].serialize(serializer),
            Location::Multiple(spans) => spans.serialize(serializer),
        }
    }
}

/// Locates a field value inside standardized text.
///
/// `text` must already be standardized. Title and generic values are
/// expected to be standardized by the caller too; author names are
/// standardized here, and date values are expected in the canonical
/// `MM/DD/YY` form.
///
/// An empty value is treated as nothing to locate.
///
/// # Example
///
/// ```rust
/// use citeloc_core::{FieldKind, FieldValue, Location, Span, locate};
///
/// let text = "Hello my name is Michael Wan";
/// let authors = FieldValue::List(vec!["Michael Wan".to_string()]);
/// assert_eq!(locate(&authors, text, FieldKind::Author), Location::Multiple(vec![Span::new(17, 28)]));
///
/// let text = "The date is April 13, 2000";
/// assert_eq!(locate(&"04/13/00".into(), text, FieldKind::Date), Location::Single(Some(Span::new(12, 26))));
/// ```
pub fn locate(value: &FieldValue, text: &str, kind: FieldKind) -> Location {
    match kind {
        FieldKind::Author => Location::Multiple(locate_authors(value.values(), text)),
        FieldKind::Date => Location::Single(value.first().and_then(|date| locate_date(date, text))),
        FieldKind::Title | FieldKind::Generic => {
            Location::Single(value.first().and_then(|needle| locate_substring(needle, text)))
        }
    }
}

/// Finds the first exact occurrence of `needle`.
pub fn locate_substring(needle: &str, text: &str) -> Option<Span> {
    if needle.is_empty() {
        return None;
    }

    let found = find_exact(needle, text);
    if found.is_none() {
        debug!(needle, "value not found in text");
    }
    found
}

/// Locates every author name independently.
///
/// Names that are blank or not found are omitted, so the result may be
/// shorter than the input.
pub fn locate_authors(names: &[String], text: &str) -> Vec<Span> {
    names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .filter_map(|name| locate_name(&standardize_author(name), text))
        .collect()
}

/// Standardized names are title-cased while body text is lowercase, so a
/// miss on the name as given is retried with its lowercase form.
fn locate_name(name: &str, text: &str) -> Option<Span> {
    let found = find_exact(name, text).or_else(|| {
        let lower = name.to_lowercase();
        (lower != name).then(|| find_exact(&lower, text)).flatten()
    });

    if found.is_none() {
        debug!(name, "author not found in text");
    }
    found
}

/// Locates a canonical `MM/DD/YY` date among the date phrases of `text`.
///
/// Returns the span of the first phrase resolving to the same calendar day,
/// or `None` if the value does not parse or no phrase matches.
pub fn locate_date(value: &str, text: &str) -> Option<Span> {
    let Some(target) = dates::parse_canonical(value) else {
        debug!(value, "date value is not in MM/DD/YY form");
        return None;
    };

    let found = dates::search_dates(text)
        .into_iter()
        .find(|m| m.date == target)
        .map(|m| m.span);

    if found.is_none() {
        debug!(value, %target, "no date phrase matches");
    }
    found
}

fn find_exact(needle: &str, text: &str) -> Option<Span> {
    text.find(needle).map(|start| Span::new(start, start + needle.len()))
}
