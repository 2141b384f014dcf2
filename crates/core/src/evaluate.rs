//! Accuracy reports over pages with known citations.
//!
//! Two questions are asked of a labelled sample:
//!
//! - [`data_preservation`]: after trimming a page to its content, how many of
//!   the citation's values can still be located in it?
//! - [`content_start_accuracy`]: does the trimmed content begin with the
//!   article's title?

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::citation::{Citation, prepare};
use crate::content::LocatorConfig;
use crate::locate::locate;
use crate::page::Webpage;
use crate::similarity::similarity;
use crate::standardize::{FieldKind, standardize_text, title_case};

/// Predicted and expected titles must be more similar than this.
pub const TITLE_SIMILARITY: f64 = 0.7;

/// A page together with the citation it is known to carry.
#[derive(Debug, Clone)]
pub struct Sample {
    pub citation: Citation,
    pub page: Webpage,
}

/// Found and expected value counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub found: usize,
    pub total: usize,
}

impl Tally {
    fn record(&mut self, found: bool) {
        self.total += 1;
        if found {
            self.found += 1;
        }
    }
}

/// Outcome for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAccuracy {
    pub url: String,
    pub found: usize,
    pub expected: usize,
    pub accuracy: f64,
}

/// Report of [`data_preservation`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreservationReport {
    /// Per-field tallies across every document.
    pub fields: BTreeMap<String, Tally>,
    pub documents: Vec<DocumentAccuracy>,
    /// Mean of the per-document accuracies, `0.0` for an empty sample.
    pub average_accuracy: f64,
    /// URLs whose title was set but could not be located.
    pub no_title_found: Vec<String>,
}

/// Report of [`content_start_accuracy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ContentStartReport {
    pub valid: usize,
    pub total: usize,
    pub accuracy: f64,
}

/// Measures how much citation data survives content trimming.
///
/// Each author counts as one expected value. Publisher is not considered,
/// and documents with no title, author or date set are skipped.
pub fn data_preservation(samples: &[Sample], config: &LocatorConfig) -> PreservationReport {
    let mut report = PreservationReport::default();

    for sample in samples {
        let text = sample.page.standardized_content(config);
        let mut found = 0;
        let mut expected = 0;

        for (name, kind, value) in sample.citation.fields() {
            if kind == FieldKind::Generic {
                continue;
            }

            let tally = report.fields.entry(name.to_string()).or_default();
            let location = locate(&prepare(&value, kind), &text, kind);
            let values = if kind == FieldKind::Author { value.values().len() } else { 1 };
            let located = location.spans().len();

            for i in 0..values {
                tally.record(i < located);
            }
            expected += values;
            found += located.min(values);

            if kind == FieldKind::Title && !location.is_found() {
                report.no_title_found.push(sample.citation.url.clone());
            }
        }

        if expected == 0 {
            continue;
        }

        let accuracy = found as f64 / expected as f64;
        debug!(url = %sample.citation.url, found, expected, "data preservation");
        report.documents.push(DocumentAccuracy { url: sample.citation.url.clone(), found, expected, accuracy });
    }

    report.average_accuracy = mean(report.documents.iter().map(|d| d.accuracy));
    report
}

/// Measures how often trimmed content begins with the article title.
///
/// The first `len(title)` characters of the standardized content are taken
/// as the predicted title and compared, title-cased, against the expected
/// one. Samples without a title are skipped.
pub fn content_start_accuracy(samples: &[Sample], config: &LocatorConfig) -> ContentStartReport {
    let mut report = ContentStartReport::default();

    for sample in samples {
        let Some(title) = sample.citation.title.as_deref() else {
            continue;
        };
        let expected = title_case(&standardize_text(title));
        let content = standardize_text(&sample.page.content(config));
        let predicted: String = content.trim_start().chars().take(expected.chars().count()).collect();
        let predicted = title_case(&predicted);

        let score = similarity(&expected, &predicted);
        debug!(url = %sample.citation.url, %expected, %predicted, score, "content start");

        report.total += 1;
        if score > TITLE_SIMILARITY {
            report.valid += 1;
        }
    }

    report.accuracy = if report.total == 0 { 0.0 } else { report.valid as f64 / report.total as f64 };
    report
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(html: &str, citation: Citation) -> Sample {
        let page = Webpage::from_html(citation.url.clone(), html).unwrap();
        Sample { citation, page }
    }

    fn citation(url: &str, title: Option<&str>, authors: &[&str], date: Option<&str>) -> Citation {
        Citation {
            url: url.to_string(),
            title: title.map(String::from),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            date: date.map(String::from),
            publisher: Some("Ignored Publisher".to_string()),
        }
    }

    const GOOD: &str = "<html><head><title>Bees in Winter</title></head><body>\
        <h1>Home</h1><h1>Bees in Winter</h1><p>By Ada Lovelace, March 3, 2015</p></body></html>";

    const MISSING_TITLE: &str = "<html><body><h1>Totally different</h1><p>nothing useful</p></body></html>";

    #[test]
    fn test_data_preservation() {
        let authors = ["Ada Lovelace", "Nobody"];
        let samples = vec![
            sample(GOOD, citation("https://a.example", Some("Bees in Winter"), &authors, Some("March 3, 2015"))),
            sample(MISSING_TITLE, citation("https://b.example", Some("Bees in Winter"), &[], None)),
        ];

        let report = data_preservation(&samples, &LocatorConfig::default());

        assert_eq!(report.fields["title"], Tally { found: 1, total: 2 });
        assert_eq!(report.fields["authors"], Tally { found: 1, total: 2 });
        assert_eq!(report.fields["date"], Tally { found: 1, total: 1 });
        assert!(!report.fields.contains_key("publisher"));

        assert_eq!(report.documents[0].found, 3);
        assert_eq!(report.documents[0].expected, 4);
        assert_eq!(report.documents[1].accuracy, 0.0);
        assert!((report.average_accuracy - 0.375).abs() < 1e-9);
        assert_eq!(report.no_title_found, vec!["https://b.example"]);
    }

    #[test]
    fn test_data_preservation_skips_empty_citations() {
        let samples = vec![sample(GOOD, citation("https://a.example", None, &[], None))];
        let report = data_preservation(&samples, &LocatorConfig::default());
        assert!(report.documents.is_empty());
        assert_eq!(report.average_accuracy, 0.0);
    }

    #[test]
    fn test_content_start_accuracy() {
        let samples = vec![
            sample(GOOD, citation("https://a.example", Some("Bees in Winter"), &[], None)),
            sample(MISSING_TITLE, citation("https://b.example", Some("Bees in Winter"), &[], None)),
            sample(GOOD, citation("https://c.example", None, &[], None)),
        ];

        let report = content_start_accuracy(&samples, &LocatorConfig::default());

        assert_eq!(report, ContentStartReport { valid: 1, total: 2, accuracy: 0.5 });
    }

    #[test]
    fn test_empty_sample() {
        let config = LocatorConfig::default();
        assert_eq!(content_start_accuracy(&[], &config).accuracy, 0.0);
        assert_eq!(data_preservation(&[], &config), PreservationReport::default());
    }
}
