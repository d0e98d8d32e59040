// src/scheduler.rs
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::diff::{self, RunSummary};
use crate::health::HealthMonitor;
use crate::notify::NotifierMux;
use crate::sources::SourceScraper;
use crate::store::LinkStore;

/// Drives the fixed-interval polling loop: every source in a fixed order,
/// the diff step per source, one health check per completed cycle, then
/// sleep. The interval never adapts, so cycle starts drift by however long
/// a cycle takes.
pub struct Scheduler {
    sources: Vec<Box<dyn SourceScraper>>,
    store: LinkStore,
    notifier: NotifierMux,
    health: HealthMonitor,
    interval: Duration,
}

impl Scheduler {
    pub fn new(
        sources: Vec<Box<dyn SourceScraper>>,
        store: LinkStore,
        notifier: NotifierMux,
        health: HealthMonitor,
        interval: Duration,
    ) -> Self {
        Self {
            sources,
            store,
            notifier,
            health,
            interval,
        }
    }

    /// Loops until the process is killed.
    pub async fn run(mut self) {
        loop {
            info!("cycle start {}", Utc::now().to_rfc3339());

            match self.run_cycle().await {
                Ok(summaries) => {
                    self.health
                        .check_cycle(&summaries, Utc::now(), &self.notifier)
                        .await;
                }
                // One failing source abandons the rest of its cycle; the
                // next cycle starts from scratch after the usual wait.
                Err(e) => warn!("cycle aborted: {e:#}"),
            }

            info!(
                "waiting {} until next cycle",
                format_min_sec(self.interval)
            );
            tokio::time::sleep(self.interval).await;
        }
    }

    async fn run_cycle(&self) -> Result<Vec<RunSummary>> {
        let mut summaries = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let links = source
                .fetch_links()
                .await
                .with_context(|| format!("{} extraction", source.name()))?;
            let summary = diff::process_batch(source.name(), &links, &self.store, &self.notifier)
                .await
                .with_context(|| format!("{} diff step", source.name()))?;
            summaries.push(summary);
        }
        Ok(summaries)
    }
}

/// `m:ss`, for the wait log.
pub fn format_min_sec(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
