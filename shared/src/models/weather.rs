//! Weather observation models and their dashboard views

use serde::{Deserialize, Serialize};

use crate::types::{nullable_f64, parse_numeric, LineChart, SummaryCard};

/// One weather/soil-moisture observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherEntry {
    pub date: String,
    /// Degrees Celsius
    #[serde(deserialize_with = "nullable_f64")]
    pub temperature: f64,
    /// Relative humidity, percent
    #[serde(deserialize_with = "nullable_f64")]
    pub humidity: f64,
    /// Millimetres
    #[serde(deserialize_with = "nullable_f64")]
    pub rainfall: f64,
    /// Volumetric soil moisture, percent
    #[serde(deserialize_with = "nullable_f64")]
    pub soil_moisture: f64,
}

impl WeatherEntry {
    pub fn new(
        date: impl Into<String>,
        temperature: f64,
        humidity: f64,
        rainfall: f64,
        soil_moisture: f64,
    ) -> Self {
        Self {
            date: date.into(),
            temperature,
            humidity,
            rainfall,
            soil_moisture,
        }
    }
}

/// Weather metrics captured by the prediction form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherMetric {
    Temperature,
    Humidity,
    Rainfall,
    SoilMoisture,
}

impl WeatherMetric {
    pub const ALL: [WeatherMetric; 4] = [
        WeatherMetric::Temperature,
        WeatherMetric::Humidity,
        WeatherMetric::Rainfall,
        WeatherMetric::SoilMoisture,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            WeatherMetric::Temperature => "temperature",
            WeatherMetric::Humidity => "humidity",
            WeatherMetric::Rainfall => "rainfall",
            WeatherMetric::SoilMoisture => "soil_moisture",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    pub fn title(&self) -> &'static str {
        match self {
            WeatherMetric::Temperature => "Temperature",
            WeatherMetric::Humidity => "Humidity",
            WeatherMetric::Rainfall => "Rainfall",
            WeatherMetric::SoilMoisture => "Soil Moisture",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            WeatherMetric::Temperature => "°C",
            WeatherMetric::Humidity | WeatherMetric::SoilMoisture => "%",
            WeatherMetric::Rainfall => "mm",
        }
    }

    /// Chart/table column heading, e.g. `Rainfall (mm)`
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title(), self.unit())
    }

    pub fn read(&self, entry: &WeatherEntry) -> f64 {
        match self {
            WeatherMetric::Temperature => entry.temperature,
            WeatherMetric::Humidity => entry.humidity,
            WeatherMetric::Rainfall => entry.rainfall,
            WeatherMetric::SoilMoisture => entry.soil_moisture,
        }
    }
}

/// A single weather snapshot as typed into the prediction form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherDraft {
    pub temperature: String,
    pub humidity: String,
    pub rainfall: String,
    pub soil_moisture: String,
}

impl WeatherDraft {
    pub fn set(&mut self, metric: WeatherMetric, value: impl Into<String>) {
        let slot = match metric {
            WeatherMetric::Temperature => &mut self.temperature,
            WeatherMetric::Humidity => &mut self.humidity,
            WeatherMetric::Rainfall => &mut self.rainfall,
            WeatherMetric::SoilMoisture => &mut self.soil_moisture,
        };
        *slot = value.into();
    }

    pub fn get(&self, metric: WeatherMetric) -> &str {
        match metric {
            WeatherMetric::Temperature => &self.temperature,
            WeatherMetric::Humidity => &self.humidity,
            WeatherMetric::Rainfall => &self.rainfall,
            WeatherMetric::SoilMoisture => &self.soil_moisture,
        }
    }

    pub fn to_entry(&self, date: impl Into<String>) -> WeatherEntry {
        WeatherEntry {
            date: date.into(),
            temperature: parse_numeric(&self.temperature),
            humidity: parse_numeric(&self.humidity),
            rainfall: parse_numeric(&self.rainfall),
            soil_moisture: parse_numeric(&self.soil_moisture),
        }
    }
}

/// Latest readings shown on the weather summary cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub soil_moisture: f64,
}

impl WeatherSummary {
    /// Summary of the last entry; every metric is zero when there is none
    pub fn latest(entries: &[WeatherEntry]) -> Self {
        entries
            .last()
            .map(|entry| Self {
                temperature: entry.temperature,
                humidity: entry.humidity,
                rainfall: entry.rainfall,
                soil_moisture: entry.soil_moisture,
            })
            .unwrap_or_default()
    }

    pub fn value(&self, metric: WeatherMetric) -> f64 {
        match metric {
            WeatherMetric::Temperature => self.temperature,
            WeatherMetric::Humidity => self.humidity,
            WeatherMetric::Rainfall => self.rainfall,
            WeatherMetric::SoilMoisture => self.soil_moisture,
        }
    }

    pub fn cards(&self) -> Vec<SummaryCard> {
        WeatherMetric::ALL
            .iter()
            .map(|metric| {
                SummaryCard::new(
                    metric.title(),
                    format!("{}{}", self.value(*metric), metric.unit()),
                )
            })
            .collect()
    }
}

/// Four-series trend chart over the full sequence
pub fn weather_chart(entries: &[WeatherEntry]) -> LineChart {
    WeatherMetric::ALL.iter().fold(
        LineChart::new(entries.iter().map(|e| e.date.clone())),
        |chart, metric| {
            chart.with_series(
                metric.heading(),
                entries.iter().map(|e| metric.read(e)).collect(),
            )
        },
    )
}

/// Five days of sample observations used until a live feed is configured
pub fn sample_weather_entries() -> Vec<WeatherEntry> {
    vec![
        WeatherEntry::new("2024-03-01", 25.0, 65.0, 10.0, 45.0),
        WeatherEntry::new("2024-03-02", 26.0, 70.0, 5.0, 42.0),
        WeatherEntry::new("2024-03-03", 24.0, 68.0, 15.0, 48.0),
        WeatherEntry::new("2024-03-04", 23.0, 72.0, 20.0, 50.0),
        WeatherEntry::new("2024-03-05", 25.0, 67.0, 8.0, 46.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_summarizes_to_zero() {
        let summary = WeatherSummary::latest(&[]);
        for metric in WeatherMetric::ALL {
            assert_eq!(summary.value(metric), 0.0);
        }
        let values: Vec<_> = summary.cards().into_iter().map(|c| c.value).collect();
        assert_eq!(values, vec!["0°C", "0%", "0mm", "0%"]);
    }

    #[test]
    fn test_summary_uses_last_entry() {
        let summary = WeatherSummary::latest(&sample_weather_entries());
        assert_eq!(summary.temperature, 25.0);
        assert_eq!(summary.humidity, 67.0);
        assert_eq!(summary.rainfall, 8.0);
        assert_eq!(summary.soil_moisture, 46.0);

        let cards = summary.cards();
        assert_eq!(cards[0], SummaryCard::new("Temperature", "25°C"));
        assert_eq!(cards[2], SummaryCard::new("Rainfall", "8mm"));
        assert_eq!(cards[3], SummaryCard::new("Soil Moisture", "46%"));
    }

    #[test]
    fn test_chart_covers_full_sequence() {
        let entries = sample_weather_entries();
        let chart = weather_chart(&entries);
        assert_eq!(chart.labels.len(), 5);
        assert_eq!(chart.labels[0], "2024-03-01");
        assert_eq!(chart.datasets.len(), 4);
        assert_eq!(chart.datasets[0].label, "Temperature (°C)");
        assert_eq!(chart.datasets[2].data, vec![10.0, 5.0, 15.0, 20.0, 8.0]);
    }

    #[test]
    fn test_empty_chart_keeps_series() {
        let chart = weather_chart(&[]);
        assert!(chart.labels.is_empty());
        assert_eq!(chart.datasets.len(), 4);
        assert!(chart.datasets.iter().all(|s| s.data.is_empty()));
    }

    #[test]
    fn test_weather_draft_to_entry() {
        let mut draft = WeatherDraft::default();
        draft.set(WeatherMetric::Temperature, "24");
        draft.set(WeatherMetric::Humidity, "61.5");
        let entry = draft.to_entry("2024-04-01T09:30:00");
        assert_eq!(entry.temperature, 24.0);
        assert_eq!(entry.humidity, 61.5);
        assert!(entry.rainfall.is_nan());
    }
}
