use std::sync::Arc;

use anyhow::Context;

use flight_monitor::client::EmailClient;
use flight_monitor::notify::{EmailTemplate, Notifier};
use flight_monitor::quote::MockPriceLookup;
use flight_monitor::repo::MonitorRepo;
use flight_monitor::settings::Settings;
use flight_monitor::telemetry;

/// One-shot daily notification run, scheduled externally (e.g. cron)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    let subscriber =
        telemetry::get_subscriber(&settings.log.level, settings.log.format, std::io::stdout);
    telemetry::init_subscriber(subscriber)?;

    let email_client = EmailClient::new(
        settings.email.sender(),
        settings.email.api_timeout(),
        settings.email.api_base_url()?,
        settings.email.api_auth_token(),
    )?;
    if !email_client.is_live() {
        tracing::warn!("No email API key configured, emails will only be logged");
    }

    let notifier = Notifier::new(
        MonitorRepo::new(settings.store.storage()?),
        Arc::new(MockPriceLookup::new(settings.quote.clone())),
        Arc::new(email_client),
        EmailTemplate::new(settings.city_names(), &settings.notifier),
        settings.notifier.send_delay(),
    );

    let summary = notifier.run().await;
    tracing::info!(
        total = summary.total,
        skipped = summary.skipped,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Daily notification finished"
    );

    Ok(())
}
