use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::chart::models::ChartEntry;
use crate::error::{AppError, Result};

/// Elements carrying song titles on the chart page.
pub const TITLE_SELECTOR: &str = "h3.a-no-trucate";
/// Elements carrying artist names on the chart page.
pub const ARTIST_SELECTOR: &str = "span.a-no-trucate";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Anything that can produce the ordered chart listing for a date.
#[async_trait]
pub trait ChartSource: Send + Sync {
    /// `date` must already be a validated `YYYY-MM-DD` string.
    async fn fetch_entries(&self, date: &str) -> Result<Vec<ChartEntry>>;
}

/// Title and artist collections had different sizes on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    pub titles: usize,
    pub artists: usize,
}

pub struct ChartExtractor {
    http_client: Client,
    base_url: Url,
}

impl ChartExtractor {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid chart URL: {}", e)))?;

        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn chart_url(&self, date: &str) -> Result<Url> {
        self.base_url
            .join(date)
            .map_err(|e| AppError::Fetch(format!("Cannot build chart URL for {}: {}", date, e)))
    }
}

#[async_trait]
impl ChartSource for ChartExtractor {
    async fn fetch_entries(&self, date: &str) -> Result<Vec<ChartEntry>> {
        let url = self.chart_url(date)?;
        debug!("Fetching chart page: {}", url);

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!("{} returned {}", url, status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to read body of {}: {}", url, e)))?;

        let entries = parse_chart(&body)?;
        info!("Found {} chart entries for {}", entries.len(), date);

        Ok(entries)
    }
}

/// Extract entries from a chart document. A title/artist count mismatch is
/// logged and the listing is truncated to the shorter collection.
pub fn parse_chart(html: &str) -> Result<Vec<ChartEntry>> {
    let document = Html::parse_document(html);

    let titles = select_text(&document, TITLE_SELECTOR)?;
    let artists = select_text(&document, ARTIST_SELECTOR)?;

    if titles.is_empty() {
        warn!(
            "No elements matched '{}'; the chart page layout may have changed",
            TITLE_SELECTOR
        );
    }

    let (entries, mismatch) = pair_by_position(titles, artists);
    if let Some(m) = mismatch {
        warn!(
            "Chart page has {} titles but {} artists; keeping the first {} pairs",
            m.titles,
            m.artists,
            entries.len()
        );
    }

    Ok(entries)
}

/// Zip titles with artists by index, stopping at the shorter list.
pub fn pair_by_position(
    titles: Vec<String>,
    artists: Vec<String>,
) -> (Vec<ChartEntry>, Option<CountMismatch>) {
    let mismatch = (titles.len() != artists.len()).then_some(CountMismatch {
        titles: titles.len(),
        artists: artists.len(),
    });

    let entries = titles
        .into_iter()
        .zip(artists)
        .map(|(title, artist)| ChartEntry::new(title, artist))
        .collect();

    (entries, mismatch)
}

fn select_text(document: &Html, selector: &str) -> Result<Vec<String>> {
    let parsed = Selector::parse(selector)
        .map_err(|e| AppError::Parse(format!("Invalid selector '{}': {}", selector, e)))?;

    Ok(document
        .select(&parsed)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::test_logs;

    /// Answers a single HTTP request with `status` and `body`, returning the
    /// chart base URL pointing at it.
    async fn serve_once(status: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/charts/hot-100/", addr)
    }

    fn chart_html(titles: &[&str], artists: &[&str]) -> String {
        let mut body = String::from("<html><body><ul>");
        for (i, title) in titles.iter().enumerate() {
            body.push_str("<li class=\"o-chart-results-list__item\">");
            body.push_str(&format!(
                "<h3 id=\"title-of-a-story\" class=\"c-title a-no-trucate\">\n\t\t{}\n\t</h3>",
                title
            ));
            if let Some(artist) = artists.get(i) {
                body.push_str(&format!(
                    "<span class=\"c-label a-no-trucate\">\n\t{}\t\n</span>",
                    artist
                ));
            }
            body.push_str("</li>");
        }
        body.push_str("</ul></body></html>");
        body
    }

    #[test]
    fn test_parse_chart_pairs_in_document_order() {
        let html = chart_html(
            &["Flowers", "Kill Bill", "Last Night"],
            &["Miley Cyrus", "SZA", "Morgan Wallen"],
        );

        let entries = parse_chart(&html).unwrap();

        assert_eq!(
            entries,
            vec![
                ChartEntry::new("Flowers", "Miley Cyrus"),
                ChartEntry::new("Kill Bill", "SZA"),
                ChartEntry::new("Last Night", "Morgan Wallen"),
            ]
        );
    }

    #[test]
    fn test_parse_chart_truncates_to_shorter_list() {
        let html = chart_html(&["A", "B", "C", "D", "E"], &["1", "2", "3", "4"]);

        let entries = parse_chart(&html).unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3], ChartEntry::new("D", "4"));
    }

    #[test]
    fn test_parse_chart_decodes_entities() {
        let html = chart_html(&["Tom&#39;s Diner"], &["Suzanne Vega &amp; DNA"]);

        let entries = parse_chart(&html).unwrap();

        assert_eq!(entries, vec![ChartEntry::new("Tom's Diner", "Suzanne Vega & DNA")]);
    }

    #[test]
    fn test_parse_chart_ignores_other_elements() {
        let html = r#"<html><body>
            <h3 class="c-title">Not a chart title</h3>
            <span class="c-label">Not an artist</span>
            <h3 class="c-title a-no-trucate">Vampire</h3>
            <span class="c-label a-no-trucate">Olivia Rodrigo</span>
        </body></html>"#;

        let entries = parse_chart(html).unwrap();

        assert_eq!(entries, vec![ChartEntry::new("Vampire", "Olivia Rodrigo")]);
    }

    #[test]
    fn test_parse_chart_empty_document() {
        assert!(parse_chart("<html></html>").unwrap().is_empty());
    }

    #[test]
    fn test_pair_by_position_reports_mismatch() {
        let titles = vec!["a".to_string(), "b".to_string()];
        let artists = vec!["x".to_string()];

        let (entries, mismatch) = pair_by_position(titles, artists);

        assert_eq!(entries, vec![ChartEntry::new("a", "x")]);
        assert_eq!(
            mismatch,
            Some(CountMismatch {
                titles: 2,
                artists: 1
            })
        );
    }

    #[test]
    fn test_pair_by_position_equal_lengths() {
        let (entries, mismatch) =
            pair_by_position(vec!["a".to_string()], vec!["x".to_string()]);

        assert_eq!(entries.len(), 1);
        assert!(mismatch.is_none());
    }

    #[test]
    fn test_chart_url_appends_date() {
        let extractor = ChartExtractor::new("https://www.billboard.com/charts/hot-100").unwrap();

        let url = extractor.chart_url("2023-06-15").unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.billboard.com/charts/hot-100/2023-06-15"
        );
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(matches!(
            ChartExtractor::new("not a url"),
            Err(AppError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_entries_parses_success_response() {
        let html = chart_html(&["Flowers", "Kill Bill"], &["Miley Cyrus", "SZA"]);
        let base_url = serve_once("200 OK", html).await;
        let extractor = ChartExtractor::new(&base_url).unwrap();

        let entries = extractor.fetch_entries("2023-06-15").await.unwrap();

        assert_eq!(
            entries,
            vec![
                ChartEntry::new("Flowers", "Miley Cyrus"),
                ChartEntry::new("Kill Bill", "SZA"),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_entries_error_status_is_fetch_error() {
        let base_url = serve_once("404 Not Found", "not here".to_string()).await;
        let extractor = ChartExtractor::new(&base_url).unwrap();

        let result = extractor.fetch_entries("2023-06-15").await;

        match result {
            Err(AppError::Fetch(msg)) => assert!(msg.contains("404"), "unexpected message: {}", msg),
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_entries_refused_connection_is_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let extractor = ChartExtractor::new(&format!("http://{}/charts/hot-100/", addr)).unwrap();

        let result = extractor.fetch_entries("2023-06-15").await;

        assert!(matches!(result, Err(AppError::Fetch(_))));
    }

    #[test]
    fn test_parse_chart_warns_on_count_mismatch() {
        let (logs, _guard) = test_logs::capture();

        let html = chart_html(&["A", "B", "C", "D", "E"], &["1", "2", "3", "4"]);
        let entries = parse_chart(&html).unwrap();

        assert_eq!(entries.len(), 4);
        let output = logs.contents();
        assert!(output.contains("WARN"), "no warning logged: {}", output);
        assert!(
            output.contains("5 titles but 4 artists"),
            "unexpected warning: {}",
            output
        );
    }

    #[test]
    fn test_parse_chart_silent_when_counts_match() {
        let (logs, _guard) = test_logs::capture();

        let html = chart_html(&["A", "B"], &["1", "2"]);
        parse_chart(&html).unwrap();

        assert!(!logs.contents().contains("WARN"));
    }
}
