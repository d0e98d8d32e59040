// src/sources/mod.rs
pub mod cargurus;
pub mod carfax;

pub use cargurus::CarGurusScraper;
pub use carfax::CarfaxScraper;

use anyhow::Result;

/// One listings site being polled.
///
/// Implementations own their complete search recipe (URL construction,
/// selectors, request timeout) and share no state with each other; a variant
/// that breaks when its site changes markup must not be able to poison any
/// other variant or a later cycle.
#[async_trait::async_trait]
pub trait SourceScraper: Send + Sync {
    /// Fetch candidate detail-page links, in the order the page lists them.
    async fn fetch_links(&self) -> Result<Vec<String>>;

    fn name(&self) -> &'static str;
}
