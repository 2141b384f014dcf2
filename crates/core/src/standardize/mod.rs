//! Text and field value standardization.
//!
//! Scraped article text and citation field values are written in whatever
//! case, punctuation and encoding the source happened to use. Everything is
//! brought into one canonical form here before it is compared:
//!
//! - [`standardize_text`] for article text: entity references decoded,
//!   accented characters folded to ASCII, lowercased.
//! - [`clean_text`] for article bodies that feed the heading scanner and field
//!   locator: additionally strips punctuation and underscores while keeping
//!   line structure and `#` heading markers.
//! - [`standardize`] for field values, dispatched on [`FieldKind`].
//!
//! None of these functions fail. A date that cannot be parsed falls back to a
//! textual normalization, and a character missing from the accent table
//! becomes a space.

pub mod ascii;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dates;

pub use ascii::{ascii_equivalent, fold_to_ascii};

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").unwrap());

/// The semantic type of a citation field.
///
/// Governs which standardization and location rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Title,
    Author,
    Date,
    Generic,
}

impl FieldKind {
    /// Every kind, in the order fields are reported.
    pub const ALL: [FieldKind; 4] = [FieldKind::Title, FieldKind::Author, FieldKind::Date, FieldKind::Generic];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Title => "title",
            FieldKind::Author => "author",
            FieldKind::Date => "date",
            FieldKind::Generic => "generic",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" | "authors" => Ok(Self::Author),
            "date" => Ok(Self::Date),
            "generic" | "text" => Ok(Self::Generic),
            _ => Err(format!("Invalid field kind: {}. Valid options: title, author, date, generic", s)),
        }
    }
}

/// A citation field value: a single string (title, date) or an ordered list
/// of strings (author names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    List(Vec<String>),
}

impl FieldValue {
    /// All strings held by the value, in order.
    pub fn values(&self) -> &[String] {
        match self {
            FieldValue::Single(value) => std::slice::from_ref(value),
            FieldValue::List(values) => values,
        }
    }

    /// The first string, for kinds that expect exactly one.
    pub fn first(&self) -> Option<&str> {
        self.values().first().map(String::as_str)
    }

    /// True when there is nothing to locate: an empty list or blank strings only.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|value| value.trim().is_empty())
    }

    /// Applies `f` to every string, keeping the shape of the value.
    pub fn map(&self, f: impl Fn(&str) -> String) -> FieldValue {
        match self {
            FieldValue::Single(value) => FieldValue::Single(f(value)),
            FieldValue::List(values) => FieldValue::List(values.iter().map(|value| f(value)).collect()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::List(values)
    }
}

/// Standardizes a field value according to its kind.
///
/// The shape of the value is preserved: a list stays a list in the same
/// order, with no deduplication.
///
/// # Example
///
/// ```rust
/// use citeloc_core::{FieldKind, FieldValue, standardize};
///
/// let authors = FieldValue::List(vec!["J.J. Veeramani".into(), "PAUL BARRETTO".into()]);
/// let std = standardize(&authors, FieldKind::Author);
/// assert_eq!(std.values(), ["Jj Veeramani", "Paul Barretto"]);
///
/// let date = standardize(&"April 13, 2000".into(), FieldKind::Date);
/// assert_eq!(date.first(), Some("04/13/00"));
/// ```
pub fn standardize(value: &FieldValue, kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Title => value.map(standardize_title),
        FieldKind::Author => value.map(standardize_author),
        FieldKind::Date => value.map(standardize_date),
        FieldKind::Generic => value.map(standardize_text),
    }
}

/// Standardizes article text: decodes entity references, folds accented
/// characters to ASCII and lowercases.
///
/// Applying it twice gives the same result as applying it once. After the
/// first pass the text is ASCII and every further pass that changes it
/// decodes an entity, so it shrinks until it reaches a fixed point.
pub fn standardize_text(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = fold_to_ascii(&decode_entities(&current)).to_lowercase();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Standardizes an article body for heading scanning and field location.
///
/// On top of [`standardize_text`]:
///
/// - quote characters are removed;
/// - every character other than a letter, digit, underscore, `#` or newline
///   becomes whitespace, and whitespace runs collapse to one space;
/// - runs of newlines collapse to a single newline;
/// - a word containing `#` becomes a lone `#` and repeated `#` tokens collapse;
/// - underscores are stripped from words;
/// - the first word of a line is never prefixed with a space, so heading
///   lines still read `"\n# caption"`.
///
/// # Example
///
/// ```rust
/// use citeloc_core::clean_text;
///
/// assert_eq!(clean_text("Hello... my name is Michael Wan. Bye!"), "hello my name is michael wan bye");
/// assert_eq!(clean_text("\n## Jean-Jacques\n\n_Rousseau_"), "\n# jean jacques\nrousseau");
/// ```
pub fn clean_text(text: &str) -> String {
    let text = standardize_text(text).replace(['\'', '"'], "");

    let mut tokens: Vec<String> = Vec::new();
    let mut word = String::new();

    for c in text.chars() {
        if c == '\n' {
            push_token(&mut tokens, &mut word);
            push_distinct(&mut tokens, "\n".to_string());
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '#' {
            word.push(c);
        } else {
            push_token(&mut tokens, &mut word);
        }
    }
    push_token(&mut tokens, &mut word);

    let mut out = String::with_capacity(text.len());
    for (i, token) in tokens.iter().enumerate() {
        let line_start = i == 0 || tokens[i - 1] == "\n";
        if token != "\n" && !line_start {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

/// Finishes the word being built and appends it as a token.
fn push_token(tokens: &mut Vec<String>, word: &mut String) {
    if word.is_empty() {
        return;
    }

    let token = if word.contains('#') { "#".to_string() } else { word.replace('_', "") };
    word.clear();

    if token.is_empty() {
        return;
    }
    if token == "#" {
        push_distinct(tokens, token);
    } else {
        tokens.push(token);
    }
}

/// Appends a marker token unless the previous token is the same marker.
fn push_distinct(tokens: &mut Vec<String>, token: String) {
    if tokens.last() != Some(&token) {
        tokens.push(token);
    }
}

/// Standardizes an author name: periods removed, hyphens turned into spaces,
/// every word title-cased.
pub fn standardize_author(name: &str) -> String {
    let name = fold_to_ascii(name).replace('.', "").replace('-', " ");
    title_case(&name)
}

/// Standardizes a title by capitalizing the first letter of every word.
pub fn standardize_title(title: &str) -> String {
    title_case(&fold_to_ascii(title))
}

/// Standardizes a date to `MM/DD/YY`.
///
/// The value is only rewritten when it parses to a date more than two years
/// away from the relative base; anything else (unparseable text, a day and
/// month without a year) falls back to lowercase text with commas and hyphens
/// replaced by spaces.
pub fn standardize_date(value: &str) -> String {
    match dates::parse_date(value) {
        Some(date) if dates::is_confident(date) => dates::format_canonical(date),
        parsed => {
            debug!(value, ?parsed, "date did not parse confidently, using textual form");
            fold_to_ascii(value).to_lowercase().replace([',', '-'], " ")
        }
    }
}

/// Capitalizes the first letter of every whitespace-separated word and
/// lowercases the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes HTML entity references (`&amp;`, `&#233;`, `&#x2019;`).
///
/// Unknown named references are left untouched.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse().ok().and_then(char::from_u32)
            } else {
                named_entity(body)
            };

            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "hellip" => '\u{2026}',
        _ => return None,
    };
    Some(c)
}
