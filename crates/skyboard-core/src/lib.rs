pub mod config;

pub use config::{
    ApiConfig, Config, ConfigValidationError, LocationConfig, UiConfig, ValidationResult,
    WeatherConfig,
};

use anyhow::Result;

/// Initialize logging for the dashboard
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("Skyboard core initialized");
    Ok(())
}
