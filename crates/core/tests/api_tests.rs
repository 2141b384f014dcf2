//! Library API integration tests
use citeloc_core::*;
use rstest::rstest;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn article_page() -> Webpage {
    let html = std::fs::read_to_string(get_fixture_path("article.html")).unwrap();
    Webpage::from_html("https://nypost.com/2011/09/19/seven-world-trade-center-fully-leased/", html).unwrap()
}

#[rstest]
#[case("Hello my name is Michael Wan", FieldValue::List(vec!["Michael Wan".to_string()]), FieldKind::Author, vec![Span::new(17, 28)])]
#[case("The date is April 13, 2000", FieldValue::from("04/13/00"), FieldKind::Date, vec![Span::new(12, 26)])]
#[case("BIRD is the word", FieldValue::List(vec!["bird".to_string()]), FieldKind::Author, vec![])]
fn test_locate_on_raw_text(
    #[case] text: &str, #[case] value: FieldValue, #[case] kind: FieldKind, #[case] expected: Vec<Span>,
) {
    assert_eq!(locate(&value, text, kind).spans(), expected);
}

#[test]
fn test_locate_after_standardizing() {
    let text = standardize_text("BIRD is the word");
    let location = locate(&FieldValue::List(vec!["bird".to_string()]), &text, FieldKind::Author);
    assert_eq!(location.spans(), vec![Span::new(0, 4)]);
}

#[test]
fn test_content_start_skips_preamble() {
    let markdown = "Foo\n# Bar\nBaz";
    let start = locate_content_start(markdown, None, &LocatorConfig::default());
    assert_eq!(&markdown[start..], "Bar\nBaz");
}

#[test]
fn test_content_start_skips_ignored_caption() {
    let markdown = "menu\n# Search\n\n# Real Article Title\nFirst paragraph.";
    let start = locate_content_start(markdown, None, &LocatorConfig::default());
    assert!(markdown[start..].starts_with("Real Article Title"));
}

#[test]
fn test_similarity_api() {
    assert_eq!(similarity("", ""), 1.0);
    assert_eq!(similarity("abc", ""), 0.0);
    assert!((similarity("Seven World Trade Center", "7 World Trade Center") - 38.0 / 44.0).abs() < 1e-9);
}

#[test]
fn test_page_content_from_fixture() {
    let page = article_page();
    let config = LocatorConfig::default();

    assert_eq!(page.title_hint.as_deref(), Some("Seven World Trade Center fully leased"));
    let content = page.content(&config);
    assert!(content.starts_with("Seven World Trade Center fully leased"));
    assert!(!content.contains("Search"));
    assert!(!content.contains("window.analytics"));
}

#[test]
fn test_locate_citation_in_fixture() {
    let page = article_page();
    let text = page.standardized_content(&LocatorConfig::default());

    let records = std::fs::read_to_string(get_fixture_path("records.json")).unwrap();
    let citations = Citation::from_json_records(&records).unwrap();
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].authors, vec!["Paul Barretto", "Renée Dupré"]);

    let locations = locate_citation(&text, &citations[0]);

    assert!(locations["title"].is_found());
    assert_eq!(locations["authors"].spans().len(), 2);
    let date = locations["date"].spans()[0];
    assert_eq!(date.slice(&text), Some("september 19 2011"));
    assert!(!locations.contains_key("publisher"));

    for location in locations.values() {
        for span in location.spans() {
            assert!(span.start < span.end && span.end <= text.len());
        }
    }
}

#[test]
fn test_evaluate_fixture() {
    let records = std::fs::read_to_string(get_fixture_path("records.json")).unwrap();
    let citation = Citation::from_json_records(&records).unwrap().remove(0);
    let samples = vec![Sample { citation, page: article_page() }];
    let config = LocatorConfig::default();

    let preservation = data_preservation(&samples, &config);
    assert_eq!(preservation.average_accuracy, 1.0);
    assert!(preservation.no_title_found.is_empty());

    let content_start = content_start_accuracy(&samples, &config);
    assert_eq!(content_start.valid, 1);
}

#[test]
fn test_location_json_output() {
    let page = article_page();
    let text = page.standardized_content(&LocatorConfig::default());
    let citation = Citation {
        url: page.url.clone(),
        date: Some("09/19/11".to_string()),
        publisher: Some("The Atlantic".to_string()),
        ..Default::default()
    };

    let output = LocationOutput { source: None, content_start: None, locations: locate_citation(&text, &citation) };
    let json: serde_json::Value = serde_json::from_str(&to_json(&output, &JsonConfig::default()).unwrap()).unwrap();

    assert!(json["locations"]["date"].is_array());
    assert!(json["locations"].get("publisher").is_none());
}

#[test]
fn test_standardization_is_idempotent_on_fixture() {
    let page = article_page();
    let once = clean_text(&page.markdown);
    assert_eq!(clean_text(&once), once);
    assert!(once.is_ascii());
}
