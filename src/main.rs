//! Car Sleuth binary entrypoint.
//! Polls the listing sites forever and alerts on newly posted vehicles.

use car_sleuth::{
    CarGurusScraper, CarfaxScraper, HealthMonitor, LinkStore, NotifierMux, Scheduler, Settings,
    SourceScraper,
};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("car_sleuth=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env()?;
    info!(
        "start {}",
        Utc::now().with_timezone(&settings.tz_offset).to_rfc3339()
    );

    // Fixed order: every cycle visits the sources the same way.
    let sources: Vec<Box<dyn SourceScraper>> = vec![
        Box::new(CarGurusScraper::new(
            &settings.zip_code,
            settings.fetch_timeout,
        )?),
        Box::new(CarfaxScraper::new(
            &settings.zip_code,
            settings.fetch_timeout,
        )?),
    ];

    let store = LinkStore::new(&settings.links_path);
    info!("link store at {}", store.path().display());
    let notifier = NotifierMux::new(
        settings.slack_webhook_url.clone(),
        settings.block_notifications,
    );
    let health = HealthMonitor::new(
        settings.tz_offset,
        settings.midday_hour,
        settings.evening_hour,
    );

    Scheduler::new(sources, store, notifier, health, settings.loop_interval)
        .run()
        .await;

    Ok(())
}
