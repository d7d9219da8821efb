//! Farm models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{display_numeric, nullable_f64, parse_numeric};
use crate::validation::validate_farm_payload;

/// A farm as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Farm {
    pub id: i64,
    pub name: String,
    pub location: String,
    #[serde(deserialize_with = "nullable_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub longitude: f64,
    /// Total area in hectares
    #[serde(deserialize_with = "nullable_f64")]
    pub total_area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

/// Body sent on farm create/update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[validate(schema(function = "validate_farm_payload", skip_on_field_errors = false))]
pub struct FarmPayload {
    /// Present only when updating an existing farm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[validate(length(min = 1))]
    pub name: String,
    pub location: String,
    #[serde(deserialize_with = "nullable_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub longitude: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub total_area: f64,
}

/// Editable farm fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarmInput {
    Name,
    Location,
    Latitude,
    Longitude,
    TotalArea,
}

/// In-progress farm form, numbers held as text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmDraft {
    pub name: String,
    pub location: String,
    pub latitude: String,
    pub longitude: String,
    pub total_area: String,
}

impl FarmDraft {
    pub fn set(&mut self, input: FarmInput, value: impl Into<String>) {
        let value = value.into();
        match input {
            FarmInput::Name => self.name = value,
            FarmInput::Location => self.location = value,
            FarmInput::Latitude => self.latitude = value,
            FarmInput::Longitude => self.longitude = value,
            FarmInput::TotalArea => self.total_area = value,
        }
    }

    pub fn get(&self, input: FarmInput) -> &str {
        match input {
            FarmInput::Name => &self.name,
            FarmInput::Location => &self.location,
            FarmInput::Latitude => &self.latitude,
            FarmInput::Longitude => &self.longitude,
            FarmInput::TotalArea => &self.total_area,
        }
    }

    /// Shape the draft into a request body. `id` is set for updates.
    pub fn to_payload(&self, id: Option<i64>) -> FarmPayload {
        FarmPayload {
            id,
            name: self.name.clone(),
            location: self.location.clone(),
            latitude: parse_numeric(&self.latitude),
            longitude: parse_numeric(&self.longitude),
            total_area: parse_numeric(&self.total_area),
        }
    }
}

impl From<&Farm> for FarmDraft {
    fn from(farm: &Farm) -> Self {
        Self {
            name: farm.name.clone(),
            location: farm.location.clone(),
            latitude: display_numeric(farm.latitude),
            longitude: display_numeric(farm.longitude),
            total_area: display_numeric(farm.total_area),
        }
    }
}
