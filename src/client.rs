// File: ./src/client.rs
// Fetches the concert feed from an ordered list of candidate sources.
//
// The primary source is the spreadsheet's direct CSV export; the remaining
// entries are alternate export endpoints and public proxies that help when
// the direct URL is blocked. Sources are tried strictly in order and the
// first body that validates as a concert feed wins. There is no retry
// beyond the list and no polling afterwards; a reload is the recovery path.
use crate::config::Config;
use crate::model::Concert;
use crate::model::parser;
use anyhow::{Context, Result, bail};

const SPREADSHEET_ID: &str = "1J6aInjzgf-_7PZO6I8TG4Ghvnx9e3Z_E5rVYImY2BC0";
const GID: &str = "1445856825";

#[derive(Debug, Clone)]
pub struct FeedSource {
    pub label: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// The built-in source list. URLs are assembled from constants, so the
/// parses cannot fail at runtime.
pub fn default_sources() -> Vec<FeedSource> {
    let export_url = format!(
        "https://docs.google.com/spreadsheets/d/{SPREADSHEET_ID}/export?format=csv&gid={GID}"
    );
    let gviz_url = format!(
        "https://docs.google.com/spreadsheets/d/{SPREADSHEET_ID}/gviz/tq?tqx=out:csv&gid={GID}"
    );
    let allorigins =
        reqwest::Url::parse_with_params("https://api.allorigins.win/raw", [("url", &export_url)])
            .expect("static feed url");
    let corsproxy = reqwest::Url::parse_with_params("https://corsproxy.io/", [("url", &export_url)])
        .expect("static feed url");

    vec![
        FeedSource::new("sheet export", export_url),
        FeedSource::new("sheet gviz", gviz_url),
        FeedSource::new("allorigins proxy", allorigins.to_string()),
        FeedSource::new("corsproxy", corsproxy.to_string()),
    ]
}

/// Sources from config when the user overrides them, built-ins otherwise.
pub fn sources_from_config(config: &Config) -> Vec<FeedSource> {
    if config.feed_urls.is_empty() {
        return default_sources();
    }
    config
        .feed_urls
        .iter()
        .enumerate()
        .map(|(i, url)| FeedSource::new(format!("config url {}", i + 1), url.clone()))
        .collect()
}

pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("Gigview/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("http client");
        Self { http }
    }

    /// Tries each source in order; returns the records from the first one
    /// that yields a valid feed. The error after exhaustion carries every
    /// per-source failure.
    pub async fn fetch(&self, sources: &[FeedSource]) -> Result<Vec<Concert>> {
        let mut failures: Vec<String> = Vec::new();

        for (idx, source) in sources.iter().enumerate() {
            log::info!(
                "trying feed source {}/{}: {}",
                idx + 1,
                sources.len(),
                source.label
            );
            match self.try_source(source).await {
                Ok(concerts) => {
                    log::info!("loaded {} concerts from {}", concerts.len(), source.label);
                    return Ok(concerts);
                }
                Err(err) => {
                    log::warn!("feed source {} failed: {err:#}", source.label);
                    failures.push(format!("{}: {err:#}", source.label));
                }
            }
        }

        bail!(
            "all {} feed sources failed: {}",
            sources.len(),
            failures.join("; ")
        )
    }

    async fn try_source(&self, source: &FeedSource) -> Result<Vec<Concert>> {
        let response = self
            .http
            .get(&source.url)
            .send()
            .await
            .with_context(|| format!("request failed for {}", source.url))?;
        let response = response
            .error_for_status()
            .with_context(|| format!("non-success status for {}", source.url))?;
        let body = response
            .text()
            .await
            .with_context(|| format!("unable to read response body for {}", source.url))?;
        validate_feed_body(&body)
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural validation of a candidate feed body. A proxied error page or
/// any other non-tabular payload fails the header shape or the row count
/// check; an empty-but-tabular sheet fails the record check. Either way the
/// caller moves on to the next source.
pub fn validate_feed_body(body: &str) -> Result<Vec<Concert>> {
    // Some export endpoints prepend a UTF-8 BOM.
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);

    let mut lines = body.lines().filter(|l| !l.trim().is_empty());
    let Some(header_line) = lines.next() else {
        bail!("response body is empty");
    };
    if lines.next().is_none() {
        bail!("feed has a header but no data rows");
    }
    if parser::split_line(header_line).len() < 2 {
        bail!("response does not look like tabular data");
    }

    let concerts = parser::parse_feed(body);
    if concerts.is_empty() {
        bail!("no valid concert rows in response");
    }
    Ok(concerts)
}

/// Shown alongside the load error once every source has failed.
pub fn failure_guidance() -> &'static str {
    "Possible solutions:\n\
     1. Make sure the spreadsheet is published to the web as CSV\n\
     2. Check your internet connection\n\
     3. The sheet might be private; it must be publicly accessible\n\
     4. Try reloading"
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_FEED: &str = "Date,Artist,Genre,Venue,Promoter,Tickets,Facebook\n\
                             1. 11. 2025,The Cramps,Punk,Klub 007,,,";

    #[test]
    fn test_valid_body_parses() {
        let concerts = validate_feed_body(GOOD_FEED).unwrap();
        assert_eq!(concerts.len(), 1);
    }

    #[test]
    fn test_bom_is_stripped() {
        let body = format!("\u{feff}{GOOD_FEED}");
        assert_eq!(validate_feed_body(&body).unwrap().len(), 1);
    }

    #[test]
    fn test_markup_body_is_rejected() {
        let html = "<!DOCTYPE html>\n<html><body>blocked</body></html>";
        assert!(validate_feed_body(html).is_err());
    }

    #[test]
    fn test_header_only_body_is_rejected() {
        let err = validate_feed_body("Date,Artist,Genre,Venue,Promoter,Tickets,Facebook")
            .unwrap_err()
            .to_string();
        assert!(err.contains("no data rows"));
    }

    #[test]
    fn test_tabular_body_without_valid_rows_is_rejected() {
        let body = "Date,Artist,Genre,Venue,Promoter,Tickets,Facebook\n,,,,,,";
        assert!(validate_feed_body(body).is_err());
    }

    #[test]
    fn test_default_sources_are_ordered() {
        let sources = default_sources();
        assert_eq!(sources.len(), 4);
        assert!(sources[0].url.contains("export?format=csv"));
        assert!(sources[1].url.contains("gviz"));
    }

    #[test]
    fn test_config_override_replaces_sources() {
        let config = Config {
            feed_urls: vec!["https://example.com/feed.csv".to_string()],
            ..Default::default()
        };
        let sources = sources_from_config(&config);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "https://example.com/feed.csv");
    }
}
