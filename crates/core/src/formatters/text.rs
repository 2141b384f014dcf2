use std::collections::BTreeMap;
use std::fmt::Write;

#[cfg(feature = "markdown")]
use crate::evaluate::{ContentStartReport, PreservationReport};
use crate::locate::Location;

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Quote the located text after each span
    pub show_snippets: bool,
}

/// Plain text formatter for location results and reports
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// Format located fields against the text they were found in
    pub fn locations(&self, text: &str, locations: &BTreeMap<String, Location>) -> String {
        format_locations(text, locations, &self.config)
    }
}

/// One line per field: its spans, or `not found`
pub fn format_locations(text: &str, locations: &BTreeMap<String, Location>, config: &TextConfig) -> String {
    let width = locations.keys().map(String::len).max().unwrap_or(0);
    let mut output = String::new();

    for (field, location) in locations {
        let spans = location.spans();
        if spans.is_empty() {
            let _ = writeln!(output, "{:width$}  not found", field);
            continue;
        }

        let rendered: Vec<String> = spans
            .iter()
            .map(|span| {
                let range = format!("[{}, {}]", span.start, span.end);
                match span.slice(text) {
                    Some(snippet) if config.show_snippets => format!("{} {:?}", range, snippet),
                    _ => range,
                }
            })
            .collect();

        let _ = writeln!(output, "{:width$}  {}", field, rendered.join(", "));
    }

    output
}

/// Summary of a data preservation run
#[cfg(feature = "markdown")]
pub fn format_preservation(report: &PreservationReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Data preservation");
    let _ = writeln!(output, "=================");
    let _ = writeln!(output, "Average accuracy: {:.3}", report.average_accuracy);
    let _ = writeln!(output, "Documents tested: {}", report.documents.len());

    for (field, tally) in &report.fields {
        let _ = writeln!(output, "Field {}: ({} / {} found)", field, tally.found, tally.total);
    }

    if !report.no_title_found.is_empty() {
        let _ = writeln!(output, "No title found:");
        for url in &report.no_title_found {
            let _ = writeln!(output, "  {}", url);
        }
    }

    output
}

/// Summary of a content start run
#[cfg(feature = "markdown")]
pub fn format_content_start(report: &ContentStartReport) -> String {
    format!(
        "Content start\n=============\nAccuracy: {:.3} ({} / {} titles)\n",
        report.accuracy, report.valid, report.total
    )
}
