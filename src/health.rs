// src/health.rs
use chrono::{DateTime, FixedOffset, Timelike, Utc};
use tracing::{debug, info, warn};

use crate::diff::RunSummary;
use crate::notify::Notifier;

/// A summary older than this counts as broken even with a positive count.
pub const STALE_THRESHOLD_SECS: i64 = 60 * 60;

/// The two daily notification slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Midday,
    Evening,
}

/// Decides when a "Health Check" message may go out and what it says.
///
/// Throttle state is held here explicitly so the window logic is testable
/// with injected clocks. It is in-memory only and resets to `Evening` on
/// restart, so a process started during midday hours notifies on its first
/// completed cycle and then settles into the once-per-crossing rhythm.
pub struct HealthMonitor {
    tz_offset: FixedOffset,
    midday_hour: u32,
    evening_hour: u32,
    last_notified: Window,
}

impl HealthMonitor {
    pub fn new(tz_offset: FixedOffset, midday_hour: u32, evening_hour: u32) -> Self {
        Self {
            tz_offset,
            midday_hour,
            evening_hour,
            last_notified: Window::Evening,
        }
    }

    /// True iff every source produced at least one link, recently enough.
    /// Stops at the first bad summary; the message never names a culprit.
    pub fn all_good(summaries: &[RunSummary], now: DateTime<Utc>) -> bool {
        summaries
            .iter()
            .all(|s| s.links_found > 0 && (now - s.created_at).num_seconds() <= STALE_THRESHOLD_SECS)
    }

    /// Which window `now` falls in, in the configured time zone. Evening
    /// wraps past midnight, so the overnight hours never re-arm it.
    fn window_at(&self, now: DateTime<Utc>) -> Window {
        let hour = now.with_timezone(&self.tz_offset).hour();
        if (self.midday_hour..self.evening_hour).contains(&hour) {
            Window::Midday
        } else {
            Window::Evening
        }
    }

    /// The window a notification is due for, if any. Does NOT mutate state.
    pub fn due_window(&self, now: DateTime<Utc>) -> Option<Window> {
        let current = self.window_at(now);
        (current != self.last_notified).then_some(current)
    }

    /// Evaluate one completed cycle and notify if a window boundary has been
    /// crossed since the last message. Diagnostic only; nothing here can
    /// abort the scheduler.
    pub async fn check_cycle(
        &mut self,
        summaries: &[RunSummary],
        now: DateTime<Utc>,
        notifier: &dyn Notifier,
    ) {
        let Some(window) = self.due_window(now) else {
            debug!("health check throttled until next window");
            return;
        };

        let text = if Self::all_good(summaries, now) {
            "Health Check: OK"
        } else {
            "Health Check: ERROR"
        };

        if let Err(e) = notifier.notify(text).await {
            warn!("health notification failed: {e:#}");
        }
        self.last_notified = window;
        info!(?window, "{text}");
    }
}
