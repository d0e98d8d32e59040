pub mod slack;

pub use slack::SlackNotifier;

use anyhow::Result;

/// Best-effort outbound delivery of a single plain-text message.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<()>;
}

/// Fan-out over the configured channels, honoring the global block toggle.
///
/// Channel failures are logged and swallowed here: nothing downstream of a
/// notification may fail because a webhook did.
pub struct NotifierMux {
    slack: SlackNotifier,
    block: bool,
}

impl NotifierMux {
    pub fn new(slack_webhook_url: Option<String>, block: bool) -> Self {
        Self {
            slack: SlackNotifier::new(slack_webhook_url),
            block,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for NotifierMux {
    async fn notify(&self, text: &str) -> Result<()> {
        if self.block {
            tracing::info!("blocked outbound notification: {text}");
            return Ok(());
        }
        if let Err(e) = self.slack.notify(text).await {
            tracing::warn!("slack delivery failed: {e:#}");
        }
        Ok(())
    }
}
