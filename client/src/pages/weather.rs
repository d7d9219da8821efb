//! Weather data page

use shared::{
    sample_weather_entries, weather_chart, LineChart, SummaryCard, WeatherEntry, WeatherSummary,
};

use crate::api::ApiClient;
use crate::error::ClientResult;

/// Where observations come from
#[derive(Debug, Clone)]
pub enum WeatherSource {
    /// Fixed five-day sample set
    Sample,
    /// `GET /weather-data/` on the backend
    Live(ApiClient),
}

impl WeatherSource {
    async fn fetch(&self, field_id: Option<i64>) -> ClientResult<Vec<WeatherEntry>> {
        match self {
            WeatherSource::Sample => Ok(sample_weather_entries()),
            WeatherSource::Live(api) => api.list_weather(field_id).await,
        }
    }
}

/// Weather page state. Read-only: entries are replaced on each load.
#[derive(Debug)]
pub struct WeatherData {
    source: WeatherSource,
    selected_field: Option<i64>,
    entries: Vec<WeatherEntry>,
    loading: bool,
}

impl WeatherData {
    /// New page; stays loading until the first [`WeatherData::load`]
    pub fn new(source: WeatherSource) -> Self {
        Self {
            source,
            selected_field: None,
            entries: Vec::new(),
            loading: true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected_field(&self) -> Option<i64> {
        self.selected_field
    }

    pub async fn load(&mut self) {
        self.loading = true;
        match self.source.fetch(self.selected_field).await {
            Ok(entries) => {
                tracing::debug!(
                    count = entries.len(),
                    field_id = ?self.selected_field,
                    "weather loaded"
                );
                self.entries = entries;
            }
            Err(e) => tracing::error!("Error fetching weather data: {}", e),
        }
        self.loading = false;
    }

    /// Switch the field selector and reload
    pub async fn select_field(&mut self, field_id: Option<i64>) {
        self.selected_field = field_id;
        self.load().await;
    }

    pub fn summary(&self) -> WeatherSummary {
        WeatherSummary::latest(&self.entries)
    }

    pub fn cards(&self) -> Vec<SummaryCard> {
        self.summary().cards()
    }

    pub fn chart(&self) -> LineChart {
        weather_chart(&self.entries)
    }

    /// Table rows, one per observation, oldest first
    pub fn rows(&self) -> &[WeatherEntry] {
        &self.entries
    }
}
