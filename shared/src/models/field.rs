//! Field and soil models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{display_numeric, nullable_f64, parse_numeric};
use crate::validation::validate_field_payload;

/// Soil chemistry of a field. Missing or `null` readings decode as NaN.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilProperties {
    #[serde(default = "crate::types::nan", deserialize_with = "nullable_f64")]
    pub ph: f64,
    #[serde(default = "crate::types::nan", deserialize_with = "nullable_f64")]
    pub nitrogen: f64,
    #[serde(default = "crate::types::nan", deserialize_with = "nullable_f64")]
    pub phosphorus: f64,
    #[serde(default = "crate::types::nan", deserialize_with = "nullable_f64")]
    pub potassium: f64,
    #[serde(default = "crate::types::nan", deserialize_with = "nullable_f64")]
    pub organic_matter: f64,
}

/// Soil readings captured by the field and prediction forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilProperty {
    Ph,
    Nitrogen,
    Phosphorus,
    Potassium,
    OrganicMatter,
}

impl SoilProperty {
    pub const ALL: [SoilProperty; 5] = [
        SoilProperty::Ph,
        SoilProperty::Nitrogen,
        SoilProperty::Phosphorus,
        SoilProperty::Potassium,
        SoilProperty::OrganicMatter,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SoilProperty::Ph => "ph",
            SoilProperty::Nitrogen => "nitrogen",
            SoilProperty::Phosphorus => "phosphorus",
            SoilProperty::Potassium => "potassium",
            SoilProperty::OrganicMatter => "organic_matter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoilProperty::Ph => "Ph",
            SoilProperty::Nitrogen => "Nitrogen",
            SoilProperty::Phosphorus => "Phosphorus",
            SoilProperty::Potassium => "Potassium",
            SoilProperty::OrganicMatter => "Organic matter",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

/// Soil readings as typed into a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilPropertiesDraft {
    pub ph: String,
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub organic_matter: String,
}

impl SoilPropertiesDraft {
    pub fn set(&mut self, property: SoilProperty, value: impl Into<String>) {
        let slot = match property {
            SoilProperty::Ph => &mut self.ph,
            SoilProperty::Nitrogen => &mut self.nitrogen,
            SoilProperty::Phosphorus => &mut self.phosphorus,
            SoilProperty::Potassium => &mut self.potassium,
            SoilProperty::OrganicMatter => &mut self.organic_matter,
        };
        *slot = value.into();
    }

    pub fn get(&self, property: SoilProperty) -> &str {
        match property {
            SoilProperty::Ph => &self.ph,
            SoilProperty::Nitrogen => &self.nitrogen,
            SoilProperty::Phosphorus => &self.phosphorus,
            SoilProperty::Potassium => &self.potassium,
            SoilProperty::OrganicMatter => &self.organic_matter,
        }
    }

    pub fn parse(&self) -> SoilProperties {
        SoilProperties {
            ph: parse_numeric(&self.ph),
            nitrogen: parse_numeric(&self.nitrogen),
            phosphorus: parse_numeric(&self.phosphorus),
            potassium: parse_numeric(&self.potassium),
            organic_matter: parse_numeric(&self.organic_matter),
        }
    }
}

impl From<&SoilProperties> for SoilPropertiesDraft {
    fn from(soil: &SoilProperties) -> Self {
        Self {
            ph: display_numeric(soil.ph),
            nitrogen: display_numeric(soil.nitrogen),
            phosphorus: display_numeric(soil.phosphorus),
            potassium: display_numeric(soil.potassium),
            organic_matter: display_numeric(soil.organic_matter),
        }
    }
}

/// A field within a farm, as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub id: i64,
    pub farm_id: i64,
    pub name: String,
    /// Area in hectares
    #[serde(deserialize_with = "nullable_f64")]
    pub area: f64,
    pub soil_type: String,
    pub soil_properties: SoilProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

/// Body sent on field create/update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[validate(schema(function = "validate_field_payload", skip_on_field_errors = false))]
pub struct FieldPayload {
    /// Present only when updating an existing field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Parent farm; `null` when no farm is selected
    pub farm_id: Option<i64>,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(deserialize_with = "nullable_f64")]
    pub area: f64,
    pub soil_type: String,
    pub soil_properties: SoilProperties,
}

/// Editable field inputs, soil readings nested one level down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Name,
    Area,
    SoilType,
    Soil(SoilProperty),
}

/// In-progress field form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDraft {
    pub name: String,
    pub area: String,
    pub soil_type: String,
    pub soil_properties: SoilPropertiesDraft,
}

impl FieldDraft {
    pub fn set(&mut self, input: FieldInput, value: impl Into<String>) {
        match input {
            FieldInput::Name => self.name = value.into(),
            FieldInput::Area => self.area = value.into(),
            FieldInput::SoilType => self.soil_type = value.into(),
            FieldInput::Soil(property) => self.soil_properties.set(property, value),
        }
    }

    pub fn get(&self, input: FieldInput) -> &str {
        match input {
            FieldInput::Name => &self.name,
            FieldInput::Area => &self.area,
            FieldInput::SoilType => &self.soil_type,
            FieldInput::Soil(property) => self.soil_properties.get(property),
        }
    }

    pub fn to_payload(&self, id: Option<i64>, farm_id: Option<i64>) -> FieldPayload {
        FieldPayload {
            id,
            farm_id,
            name: self.name.clone(),
            area: parse_numeric(&self.area),
            soil_type: self.soil_type.clone(),
            soil_properties: self.soil_properties.parse(),
        }
    }
}

impl From<&Field> for FieldDraft {
    fn from(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            area: display_numeric(field.area),
            soil_type: field.soil_type.clone(),
            soil_properties: SoilPropertiesDraft::from(&field.soil_properties),
        }
    }
}
