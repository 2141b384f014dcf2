//! Page source retrieval from URLs, files, and stdin.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
use url::Url;

use crate::{CitelocError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Citeloc/0.1)".to_string() }
    }
}

/// Where a page's source comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(Url),
    File(PathBuf),
    Stdin,
}

impl Source {
    /// Interprets a command-line style input: `-` is stdin, anything with an
    /// `http`/`https` scheme is a URL, everything else is a file path.
    pub fn from_input(input: &str) -> Self {
        if input == "-" {
            return Source::Stdin;
        }
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Url(url),
            _ => Source::File(PathBuf::from(input)),
        }
    }
}

/// Validates a URL string, requiring an `http` or `https` scheme.
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| CitelocError::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(CitelocError::InvalidUrl(format!("unsupported scheme '{}' in {}", scheme, url))),
    }
}

/// Fetches HTML content from a URL.
///
/// Follows redirects and respects the configured timeout. Non-success status
/// codes are reported as [`CitelocError::HttpError`].
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = parse_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(CitelocError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| {
            if e.is_timeout() { CitelocError::Timeout { timeout: config.timeout } } else { CitelocError::HttpError(e) }
        })?;

    let content = response.text().await?;

    Ok(content)
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(CitelocError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(CitelocError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(CitelocError::from)?;

    Ok(buffer)
}

/// Reads a page source from wherever `source` points.
#[cfg(feature = "fetch")]
pub async fn fetch_source(source: &Source, config: &FetchConfig) -> Result<String> {
    match source {
        Source::Url(url) => fetch_url(url.as_str(), config).await,
        Source::File(path) => fetch_file(&path.to_string_lossy()),
        Source::Stdin => fetch_stdin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Citeloc"));
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_fetch_url_invalid() {
        let result = fetch_url("not-a-url", &FetchConfig::default()).await;
        assert!(matches!(result, Err(CitelocError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(CitelocError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file_reads_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"<html><title>T</title></html>").unwrap();
        let content = fetch_file(file.path().to_str().unwrap()).unwrap();
        assert!(content.contains("<title>T</title>"));
    }

    #[test]
    fn test_parse_url_requires_web_scheme() {
        assert!(parse_url("https://example.com/a").is_ok());
        assert!(matches!(parse_url("ftp://example.com"), Err(CitelocError::InvalidUrl(_))));
        assert!(matches!(parse_url("example.com"), Err(CitelocError::InvalidUrl(_))));
    }

    #[test]
    fn test_source_from_input() {
        assert_eq!(Source::from_input("-"), Source::Stdin);
        assert!(matches!(Source::from_input("http://example.com"), Source::Url(_)));
        assert_eq!(Source::from_input("page.html"), Source::File(PathBuf::from("page.html")));
        assert_eq!(Source::from_input("C:/pages/a.html"), Source::File(PathBuf::from("C:/pages/a.html")));
    }
}
