//! Citation records and locating them in article text.
//!
//! Records arrive as flat field maps, one string per field, the way citation
//! templates store them: `url`, `title`, `date`, `publisher`, and authors
//! split across `first`/`last`, `first1`/`last1`, `first2`/`last2`. Blank
//! values and the literal `null` both mean "not set".

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::locate::{Location, locate};
use crate::standardize::{FieldKind, FieldValue, clean_text, standardize_author, standardize_date};
use crate::{CitelocError, Result};

/// Author name fields, in the order authors are listed.
const AUTHOR_FIELDS: [(&str, &str); 3] = [("first", "last"), ("first1", "last1"), ("first2", "last2")];

/// A citation for one webpage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

impl Citation {
    /// Decodes a flat field map.
    ///
    /// An author is kept only when both their first and last name are set.
    /// Duplicate authors are dropped, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`CitelocError::InvalidRecord`] when `url` is not set.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self> {
        let value = |name: &str| fields.get(name).map(|v| v.trim()).filter(|v| is_set(v)).map(String::from);

        let url = value("url").ok_or_else(|| CitelocError::InvalidRecord("missing url".to_string()))?;

        let mut authors: Vec<String> = Vec::new();
        for (first, last) in AUTHOR_FIELDS {
            if let (Some(first), Some(last)) = (value(first), value(last)) {
                let name = format!("{} {}", first, last);
                if !authors.contains(&name) {
                    authors.push(name);
                }
            }
        }

        Ok(Self { url, title: value("title"), authors, date: value("date"), publisher: value("publisher") })
    }

    /// Decodes a JSON array of flat field maps.
    ///
    /// Records without a URL are skipped; malformed JSON is an error.
    pub fn from_json_records(json: &str) -> Result<Vec<Self>> {
        let records: Vec<HashMap<String, serde_json::Value>> = serde_json::from_str(json)?;
        Ok(records
            .iter()
            .map(|record| {
                record
                    .iter()
                    .filter_map(|(key, value)| match value {
                        serde_json::Value::String(s) => Some((key.clone(), s.clone())),
                        serde_json::Value::Number(n) => Some((key.clone(), n.to_string())),
                        _ => None,
                    })
                    .collect::<HashMap<String, String>>()
            })
            .filter_map(|fields| Self::from_fields(&fields).ok())
            .collect())
    }

    /// The locatable fields that are set, keyed by output name.
    pub fn fields(&self) -> Vec<(&'static str, FieldKind, FieldValue)> {
        let mut fields = Vec::new();
        if let Some(title) = &self.title {
            fields.push(("title", FieldKind::Title, FieldValue::from(title.as_str())));
        }
        if !self.authors.is_empty() {
            fields.push(("authors", FieldKind::Author, FieldValue::List(self.authors.clone())));
        }
        if let Some(date) = &self.date {
            fields.push(("date", FieldKind::Date, FieldValue::from(date.as_str())));
        }
        if let Some(publisher) = &self.publisher {
            fields.push(("publisher", FieldKind::Generic, FieldValue::from(publisher.as_str())));
        }
        fields
    }
}

/// Locates every set field of `citation` in `text`.
///
/// `text` is expected to be [`clean_text`] output. Title, publisher and author
/// names are cleaned the same way before searching, and dates are brought into
/// `MM/DD/YY` form. Fields that are not
/// found are left out of the map.
pub fn locate_citation(text: &str, citation: &Citation) -> BTreeMap<String, Location> {
    citation
        .fields()
        .into_iter()
        .filter_map(|(name, kind, value)| {
            let value = prepare(&value, kind);
            let location = locate(&value, text, kind);
            location.is_found().then(|| (name.to_string(), location))
        })
        .collect()
}

/// Brings a field value into the form it takes in cleaned text.
pub fn prepare(value: &FieldValue, kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Title | FieldKind::Generic => value.map(|v| clean_text(v).trim().to_string()),
        FieldKind::Date => value.map(standardize_date),
        FieldKind::Author => value.map(|name| clean_text(&standardize_author(name)).trim().to_string()),
    }
}

fn is_set(value: &str) -> bool {
    !value.is_empty() && value != "null"
}
