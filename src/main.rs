use std::net::TcpListener;
use std::path::Path;

use anyhow::Context;

use flight_monitor::app;
use flight_monitor::controller::assets::StaticAssets;
use flight_monitor::controller::check::SearchLead;
use flight_monitor::repo::MonitorRepo;
use flight_monitor::settings::Settings;
use flight_monitor::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    let subscriber =
        telemetry::get_subscriber(&settings.log.level, settings.log.format, std::io::stdout);
    telemetry::init_subscriber(subscriber)?;

    let repo = MonitorRepo::new(settings.store.storage()?);
    let static_assets = StaticAssets::new(settings.app.static_dir().map(Path::to_path_buf));
    let search_lead = SearchLead {
        days: settings.notifier.search_lead_days,
    };

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!(
        "Flight monitor API listening on {}",
        listener.local_addr()?
    );

    app::run(listener, repo, static_assets, search_lead)?
        .await
        .context("Failed to run app")
}
