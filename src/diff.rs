// src/diff.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::notify::Notifier;
use crate::store::LinkStore;

/// What one source produced in one cycle. Held in memory only until the
/// health check has consumed it.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub source: String,
    /// When the batch finished processing.
    pub created_at: DateTime<Utc>,
    /// Links extracted this cycle, new or not. A scraper that finds plenty
    /// of already-known cars is healthy; one that finds nothing is not.
    pub links_found: usize,
}

/// Walk a freshly extracted batch in page order, alert once per link never
/// seen before, and record each new one durably before moving on.
///
/// A link appearing twice in one batch alerts once: by the time the second
/// copy is checked, the first has already been recorded. Alert delivery is
/// best-effort; a store failure aborts the batch.
pub async fn process_batch(
    source: &str,
    links: &[String],
    store: &LinkStore,
    notifier: &dyn Notifier,
) -> Result<RunSummary> {
    info!("-> {source}: found {} links", links.len());

    for link in links {
        if store.contains(link).await? {
            continue;
        }

        info!("! new link: {link}");
        if let Err(e) = notifier.notify(link).await {
            warn!("notification failed for {link}: {e:#}");
        }
        store.add(link).await?;
    }

    Ok(RunSummary {
        source: source.to_string(),
        created_at: Utc::now(),
        links_found: links.len(),
    })
}
