//! Crop yield prediction models

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::models::{
    SoilProperties, SoilPropertiesDraft, SoilProperty, WeatherDraft, WeatherEntry, WeatherMetric,
};
use crate::types::{nullable_f64, parse_numeric};

/// Timestamp format used for the weather snapshot date
pub const OBSERVED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Body of `POST /predict/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRequest {
    pub crop_type: String,
    #[serde(deserialize_with = "nullable_f64")]
    pub field_area: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "iso_millis"
    )]
    pub planting_date: Option<DateTime<Utc>>,
    pub soil_type: String,
    pub soil_properties: SoilProperties,
    pub weather_data: Vec<WeatherEntry>,
}

fn iso_millis<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}

/// Response of `POST /predict/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    /// Tons per hectare
    pub predicted_yield: f64,
    /// 0.0 - 1.0
    pub confidence_score: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features_used: BTreeMap<String, f64>,
}

impl PredictionResult {
    pub fn yield_display(&self) -> String {
        format!("{:.2} tons/hectare", self.predicted_yield)
    }

    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.confidence_score * 100.0)
    }
}

/// Prediction form inputs. Soil and weather inputs address one nested key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionInput {
    CropType,
    FieldArea,
    SoilType,
    Soil(SoilProperty),
    Weather(WeatherMetric),
}

/// In-progress prediction form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionDraft {
    pub crop_type: String,
    pub field_area: String,
    pub planting_date: Option<DateTime<Utc>>,
    pub soil_type: String,
    pub soil_properties: SoilPropertiesDraft,
    pub weather: WeatherDraft,
}

impl PredictionDraft {
    pub fn set(&mut self, input: PredictionInput, value: impl Into<String>) {
        match input {
            PredictionInput::CropType => self.crop_type = value.into(),
            PredictionInput::FieldArea => self.field_area = value.into(),
            PredictionInput::SoilType => self.soil_type = value.into(),
            PredictionInput::Soil(property) => self.soil_properties.set(property, value),
            PredictionInput::Weather(metric) => self.weather.set(metric, value),
        }
    }

    pub fn get(&self, input: PredictionInput) -> &str {
        match input {
            PredictionInput::CropType => &self.crop_type,
            PredictionInput::FieldArea => &self.field_area,
            PredictionInput::SoilType => &self.soil_type,
            PredictionInput::Soil(property) => self.soil_properties.get(property),
            PredictionInput::Weather(metric) => self.weather.get(metric),
        }
    }

    /// Shape the draft into a request; the weather snapshot is dated `observed_at`.
    pub fn to_request(&self, observed_at: NaiveDateTime) -> PredictionRequest {
        PredictionRequest {
            crop_type: self.crop_type.clone(),
            field_area: parse_numeric(&self.field_area),
            planting_date: self.planting_date,
            soil_type: self.soil_type.clone(),
            soil_properties: self.soil_properties.parse(),
            weather_data: vec![self
                .weather
                .to_entry(observed_at.format(OBSERVED_AT_FORMAT).to_string())],
        }
    }
}
