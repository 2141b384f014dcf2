use std::collections::BTreeMap;

use serde::Serialize;

use crate::Result;
use crate::locate::Location;

/// JSON output of a single-document location run
#[derive(Debug, Clone, Serialize)]
pub struct LocationOutput {
    /// Where the document came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Offset of the content start in the rendered Markdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_start: Option<usize>,
    /// Located fields, keyed by field name
    pub locations: BTreeMap<String, Location>,
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Serializes any report to JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T, config: &JsonConfig) -> Result<String> {
    if config.pretty { Ok(serde_json::to_string_pretty(value)?) } else { Ok(serde_json::to_string(value)?) }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn format<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        to_json(value, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::Span;

    fn output() -> LocationOutput {
        let mut locations = BTreeMap::new();
        locations.insert("title".to_string(), Location::Single(Some(Span::new(0, 14))));
        locations.insert("date".to_string(), Location::Single(None));
        locations.insert("authors".to_string(), Location::Multiple(vec![Span::new(18, 30)]));
        LocationOutput { source: None, content_start: Some(7), locations }
    }

    #[test]
    fn test_compact_output() {
        let json = to_json(&output(), &JsonConfig::default()).unwrap();
        assert_eq!(
            json,
            r#"{"content_start":7,"locations":{"authors":[[18,30]],"date":[-1,-1],"title":[0,14]}}"#
        );
    }

    #[test]
    fn test_pretty_output_parses_back() {
        let json = JsonFormatter::new(JsonConfig { pretty: true }).format(&output()).unwrap();
        assert!(json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["locations"]["title"][1], 14);
    }
}
