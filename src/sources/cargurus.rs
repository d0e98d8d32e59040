// src/sources/cargurus.rs
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use super::SourceScraper;

const BASE_URL: &str = "https://www.cargurus.com";
// Honda Element in the CarGurus entity scheme.
const ENTITY: &str = "d590";
const SEARCH_RADIUS_MILES: u32 = 500;

/// CarGurus inventory search, scoped to a zip code. Result blades carry a
/// stable `data-cg-ft` marker on their detail-page anchor, which survives
/// most of their layout churn.
pub struct CarGurusScraper {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl CarGurusScraper {
    pub fn new(zip_code: &str, timeout: Duration) -> Result<Self> {
        let url = format!(
            "{BASE_URL}/Cars/inventorylisting/viewDetailsFilterViewInventoryListing.action\
             ?zip={zip_code}&showNegotiable=true&sortDir=ASC\
             &sourceContext=untrackedExternal_false_0\
             &distance={SEARCH_RADIUS_MILES}&sortType=MILEAGE\
             &entitySelectingHelper.selectedEntity={ENTITY}"
        );
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building cargurus http client")?;
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
        let blade = Selector::parse(r#"a[data-cg-ft="car-blade-link"]"#)
            .map_err(|e| anyhow!("car blade selector: {e:?}"))?;
        let base = Url::parse(BASE_URL).context("cargurus base url")?;

        let mut links = Vec::new();
        for a in doc.select(&blade) {
            let Some(href) = a.value().attr("href") else {
                continue;
            };
            match base.join(href) {
                Ok(u) => links.push(u.to_string()),
                Err(e) => tracing::debug!(error = ?e, href, "skipping unparsable href"),
            }
        }
        Ok(links)
    }
}

#[async_trait]
impl SourceScraper for CarGurusScraper {
    async fn fetch_links(&self) -> Result<Vec<String>> {
        match &self.mode {
            Mode::Fixture(html) => Self::parse_links(html),
            Mode::Http { url, client } => {
                let body = client
                    .get(url)
                    .send()
                    .await
                    .context("cargurus get")?
                    .error_for_status()
                    .context("cargurus non-2xx")?
                    .text()
                    .await
                    .context("cargurus body")?;
                Self::parse_links(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "CarGurus"
    }
}
