use std::sync::LazyLock;

use reqwest::header;
use scraper::{Html, Selector};

use crate::services::error::PlaylistError;

const CHART_BASE_URL: &str = "https://www.officialcharts.com/charts/singles-chart/";
const CHART_ID: &str = "7501";

// Browser-like headers; the chart site blocks obvious non-browser clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const ACCEPT: &str = "text/html,application/xhtml+xml";

/// A playlist never takes more than the top 20 chart entries.
pub const MAX_TRACKS: usize = 20;

// Tied to the exact DOM layout of the chart site; when the site changes its
// markup, this selector is the one thing to update.
static TRACK_TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        ".no-intro div div:nth-child(1) div:nth-child(2) p:nth-child(1) a:nth-child(1) span:nth-child(2)",
    )
    .unwrap()
});

pub struct ChartClient {
    http: reqwest::Client,
}

impl ChartClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub fn chart_url(date: &str) -> String {
        format!("{CHART_BASE_URL}{date}/{CHART_ID}/")
    }

    /// Fetches the rendered chart page for a week. Any non-success status is
    /// an error; there is no retry.
    pub async fn fetch_chart(&self, date: &str) -> Result<String, PlaylistError> {
        let url = Self::chart_url(date);
        tracing::info!("Fetching chart page {url}");

        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(header::ACCEPT, ACCEPT)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(PlaylistError::ChartFetch)?;

        response.text().await.map_err(PlaylistError::ChartFetch)
    }
}

/// Extracts track titles from the chart markup in document order, truncated
/// to [`MAX_TRACKS`]. A page the selector does not match yields an empty
/// list, not an error.
pub fn extract_track_titles(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&TRACK_TITLE_SELECTOR)
        .map(|element| element.text().collect::<String>())
        .take(MAX_TRACKS)
        .collect()
}
