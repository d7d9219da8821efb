//! Farm Dashboard - headless snapshot
//!
//! Loads every page once against the configured backend and logs what a
//! browser session would render on first paint.

use farm_dashboard::config::{Config, WeatherSourceKind};
use farm_dashboard::pages::{Dashboard, FarmManagement, WeatherData, WeatherSource};
use farm_dashboard::ApiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farm_dashboard=debug,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Farm Dashboard");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Backend: {}", config.api.base_url);

    let api = ApiClient::new(&config.api)?;

    let dashboard = Dashboard::new();
    for card in dashboard.cards() {
        tracing::info!(title = %card.title, value = %card.value, "dashboard card");
    }

    let mut farms = FarmManagement::new();
    farms.load(&api).await;
    tracing::info!(
        farms = farms.farms().len(),
        fields = farms.fields().len(),
        "farm management loaded"
    );
    for farm in farms.farms() {
        tracing::info!(
            farm_id = farm.id,
            name = %farm.name,
            fields = farms.fields_of(farm.id).count(),
            "farm"
        );
    }

    let source = match config.weather.source {
        WeatherSourceKind::Sample => WeatherSource::Sample,
        WeatherSourceKind::Live => WeatherSource::Live(api.clone()),
    };
    let mut weather = WeatherData::new(source);
    weather.select_field(config.weather.field_id).await;
    for card in weather.cards() {
        tracing::info!(title = %card.title, value = %card.value, "weather card");
    }

    Ok(())
}
