// src/sources/carfax.rs
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use super::SourceScraper;

const BASE_URL: &str = "https://www.carfax.com";
// Carfax model landing page for the Honda Element.
const SEARCH_PATH: &str = "/Used-Honda-Element_w310";
const SEARCH_RADIUS_MILES: u32 = 500;

/// Carfax model search, scoped to a zip code. Carfax gives detail pages no
/// stable anchor class, so every link on the results page is harvested and
/// filtered down to `/vehicle/` hrefs.
pub struct CarfaxScraper {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl CarfaxScraper {
    pub fn new(zip_code: &str, timeout: Duration) -> Result<Self> {
        let url = format!("{BASE_URL}{SEARCH_PATH}?zip={zip_code}&radius={SEARCH_RADIUS_MILES}");
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building carfax http client")?;
        Ok(Self {
            mode: Mode::Http { url, client },
        })
    }

    /// Parse a canned results page instead of fetching; used by tests.
    pub fn from_fixture(html: &str) -> Self {
        Self {
            mode: Mode::Fixture(html.to_string()),
        }
    }

    fn parse_links(html: &str) -> Result<Vec<String>> {
        let doc = Html::parse_document(html);
        let anchors = Selector::parse("a[href]").map_err(|e| anyhow!("anchor selector: {e:?}"))?;
        let base = Url::parse(BASE_URL).context("carfax base url")?;

        let mut links = Vec::new();
        for a in doc.select(&anchors) {
            let Some(href) = a.value().attr("href") else {
                continue;
            };
            let absolute = match base.join(href) {
                Ok(u) => u.to_string(),
                Err(e) => {
                    tracing::debug!(error = ?e, href, "skipping unparsable href");
                    continue;
                }
            };
            if absolute.to_ascii_lowercase().contains("/vehicle/") {
                links.push(absolute);
            }
        }
        Ok(links)
    }
}

#[async_trait]
impl SourceScraper for CarfaxScraper {
    async fn fetch_links(&self) -> Result<Vec<String>> {
        match &self.mode {
            Mode::Fixture(html) => Self::parse_links(html),
            Mode::Http { url, client } => {
                let body = client
                    .get(url)
                    .send()
                    .await
                    .context("carfax get")?
                    .error_for_status()
                    .context("carfax non-2xx")?
                    .text()
                    .await
                    .context("carfax body")?;
                Self::parse_links(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "Carfax"
    }
}
