// src/config.rs
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;

// Production runs patient: a slow loop and generous fetch timeouts.
const PROD_LOOP_WAIT: Duration = Duration::from_secs(15 * 60);
const PROD_FETCH_TIMEOUT: Duration = Duration::from_secs(15);
// Development runs fast so a full cycle is observable in seconds.
const DEV_LOOP_WAIT: Duration = Duration::from_secs(20);
const DEV_FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Everything the process reads from the environment, resolved once at boot.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Center of the location-scoped searches on both sites.
    pub zip_code: String,
    pub is_prod: bool,
    /// When set, outbound messages are logged instead of delivered.
    pub block_notifications: bool,
    /// Absent → the Slack channel is disabled.
    pub slack_webhook_url: Option<String>,
    pub links_path: PathBuf,
    /// Time zone the health-check windows are computed in.
    pub tz_offset: FixedOffset,
    pub midday_hour: u32,
    pub evening_hour: u32,
    pub loop_interval: Duration,
    pub fetch_timeout: Duration,
}

impl Settings {
    /// Read settings from the environment (call `dotenvy::dotenv()` first).
    ///
    /// Recognized variables: `ZIP_CODE` (required), `IS_PROD`,
    /// `BLOCK_NOTIFICATIONS`, `SLACK_WEBHOOK_URL`, `LINKS_JSON_PATH`,
    /// `TIME_ZONE_OFFSET_HOURS`, `HEALTH_MIDDAY_HOUR`, `HEALTH_EVENING_HOUR`.
    pub fn from_env() -> Result<Self> {
        let zip_code = std::env::var("ZIP_CODE")
            .context("ZIP_CODE must be set")?
            .trim()
            .to_string();
        if zip_code.is_empty() {
            return Err(anyhow!("ZIP_CODE must not be empty"));
        }

        let is_prod = env_flag("IS_PROD", true);
        let (loop_interval, fetch_timeout) = if is_prod {
            (PROD_LOOP_WAIT, PROD_FETCH_TIMEOUT)
        } else {
            (DEV_LOOP_WAIT, DEV_FETCH_TIMEOUT)
        };

        let offset_hours: i32 = env_parse("TIME_ZONE_OFFSET_HOURS", 0);
        let tz_offset = FixedOffset::east_opt(offset_hours * 3600)
            .ok_or_else(|| anyhow!("TIME_ZONE_OFFSET_HOURS out of range: {offset_hours}"))?;

        let midday_hour: u32 = env_parse("HEALTH_MIDDAY_HOUR", 12);
        let evening_hour: u32 = env_parse("HEALTH_EVENING_HOUR", 18);
        if midday_hour >= evening_hour || evening_hour > 23 {
            return Err(anyhow!(
                "health windows must satisfy midday < evening < 24, got {midday_hour} and {evening_hour}"
            ));
        }

        Ok(Self {
            zip_code,
            is_prod,
            block_notifications: env_flag("BLOCK_NOTIFICATIONS", false),
            slack_webhook_url: std::env::var("SLACK_WEBHOOK_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            links_path: PathBuf::from(
                std::env::var("LINKS_JSON_PATH").unwrap_or_else(|_| "links.json".to_string()),
            ),
            tz_offset,
            midday_hour,
            evening_hour,
            loop_interval,
            fetch_timeout,
        })
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// "1" / "true" / "yes" (any case) count as set; anything else is false.
fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn clear_all() {
        for key in [
            "ZIP_CODE",
            "IS_PROD",
            "BLOCK_NOTIFICATIONS",
            "SLACK_WEBHOOK_URL",
            "LINKS_JSON_PATH",
            "TIME_ZONE_OFFSET_HOURS",
            "HEALTH_MIDDAY_HOUR",
            "HEALTH_EVENING_HOUR",
        ] {
            env::remove_var(key);
        }
    }

    #[serial_test::serial]
    #[test]
    fn zip_code_is_required() {
        clear_all();
        assert!(Settings::from_env().is_err());
    }

    #[serial_test::serial]
    #[test]
    fn defaults_are_production_magnitudes() {
        clear_all();
        env::set_var("ZIP_CODE", "55401");
        let s = Settings::from_env().unwrap();
        assert!(s.is_prod);
        assert_eq!(s.loop_interval, Duration::from_secs(900));
        assert_eq!(s.fetch_timeout, Duration::from_secs(15));
        assert_eq!(s.links_path, PathBuf::from("links.json"));
        assert_eq!((s.midday_hour, s.evening_hour), (12, 18));
        assert!(!s.block_notifications);
        assert!(s.slack_webhook_url.is_none());
        env::remove_var("ZIP_CODE");
    }

    #[serial_test::serial]
    #[test]
    fn dev_mode_shrinks_intervals() {
        clear_all();
        env::set_var("ZIP_CODE", "55401");
        env::set_var("IS_PROD", "false");
        let s = Settings::from_env().unwrap();
        assert_eq!(s.loop_interval, Duration::from_secs(20));
        assert_eq!(s.fetch_timeout, Duration::from_secs(3));
        env::remove_var("ZIP_CODE");
        env::remove_var("IS_PROD");
    }

    #[serial_test::serial]
    #[test]
    fn offset_and_window_overrides() {
        clear_all();
        env::set_var("ZIP_CODE", "55401");
        env::set_var("TIME_ZONE_OFFSET_HOURS", "-6");
        env::set_var("HEALTH_MIDDAY_HOUR", "11");
        env::set_var("HEALTH_EVENING_HOUR", "19");
        let s = Settings::from_env().unwrap();
        assert_eq!(s.tz_offset.local_minus_utc(), -6 * 3600);
        assert_eq!((s.midday_hour, s.evening_hour), (11, 19));
        clear_all();
    }

    #[serial_test::serial]
    #[test]
    fn inverted_windows_rejected() {
        clear_all();
        env::set_var("ZIP_CODE", "55401");
        env::set_var("HEALTH_MIDDAY_HOUR", "20");
        env::set_var("HEALTH_EVENING_HOUR", "8");
        assert!(Settings::from_env().is_err());
        clear_all();
    }
}
