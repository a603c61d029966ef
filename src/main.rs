use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use skyboard_core::Config;
use skyboard_nws::resources::AlertAdminMessage;
use skyboard_nws::{ClientConfig, Coordinate, NwsClient, ReportOptions};
use skyboard_ui::{
    format_nws_error, ConsoleDialog, ConsoleMessages, Dashboard, Element, Location,
    MessageSurface, NwsReportSource, Progress, SchedulerConfig, Spinner, Surfaces, Templates,
};

/// How often the dashboard tree is printed.
const SNAPSHOT_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    skyboard_core::init()?;

    let (config, _) = Config::load_validated()?;
    tracing::info!(
        locations = config.locations.len(),
        origin = %config.api.origin,
        "Skyboard starting"
    );

    let client = NwsClient::new(
        ClientConfig::new(&config.api.user_agent)
            .with_origin(&config.api.origin)
            .with_timeout(config.api.timeout()),
    )
    .context("Failed to build HTTP client")?;

    let messages: Arc<dyn MessageSurface> = Arc::new(ConsoleMessages);
    let surfaces = Surfaces {
        templates: Arc::new(Templates::builtin()),
        dialog: Arc::new(ConsoleDialog),
        messages: messages.clone(),
        progress: Arc::new(Progress::new()),
        loading: Arc::new(Spinner::new()),
    };

    if let Some(office) = &config.weather.admin_message_office {
        match client.get(&AlertAdminMessage(office.clone())).await {
            Ok(body) => match body.0 {
                Some(product) => tracing::info!(office = %office, "{}", product.product_text),
                None => tracing::debug!(office = %office, "No administrative message"),
            },
            Err(err) => messages.show(&format_nws_error(&err)),
        }
    }

    let options = ReportOptions {
        station_limit: config.weather.station_limit,
        alerts: config.weather.alerts,
        product_types: config.weather.product_types.clone(),
        hide_quiet_outlooks: config.weather.hide_quiet_outlooks,
    };
    let source = Arc::new(NwsReportSource::new(client, options));

    let grid = Element::new("div").with_id("weather-grid");
    let dashboard = Dashboard::new(
        source,
        grid.clone(),
        surfaces,
        SchedulerConfig {
            refresh_interval: config.weather.refresh_interval(),
            progress_hold: config.ui.progress_hold(),
        },
    );

    let locations = config
        .locations
        .iter()
        .map(|location| Location {
            coordinate: Coordinate::new(location.latitude, location.longitude),
            name: location.name.clone(),
        })
        .collect();
    let handles = dashboard.start(locations).await;

    let mut snapshots = tokio::time::interval(SNAPSHOT_INTERVAL);
    loop {
        tokio::select! {
            _ = snapshots.tick() => println!("{}", grid.outline()),
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for shutdown signal")?;
                break;
            }
        }
    }

    tracing::info!("Shutting down");
    for handle in handles {
        handle.abort();
    }
    Ok(())
}
