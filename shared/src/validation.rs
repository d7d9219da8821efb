//! Validation utilities for the farm dashboard
//!
//! These mirror the constraints the backend enforces on farm and field
//! payloads. They are advisory: forms report them but still submit.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{FarmPayload, FieldPayload, SoilProperties};

// ============================================================================
// Coordinate and Area Checks
// ============================================================================

/// Validate latitude is within [-90, 90]
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate longitude is within [-180, 180]
pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate an area is strictly positive
pub fn validate_area(area: f64) -> Result<(), &'static str> {
    if area.is_nan() || area <= 0.0 {
        return Err("Area must be greater than zero");
    }
    Ok(())
}

/// Validate every soil reading is a number
pub fn validate_soil_readings(soil: &SoilProperties) -> Result<(), &'static str> {
    let readings = [
        soil.ph,
        soil.nitrogen,
        soil.phosphorus,
        soil.potassium,
        soil.organic_matter,
    ];
    if readings.iter().any(|r| !r.is_finite()) {
        return Err("Soil readings must be numbers");
    }
    Ok(())
}

// ============================================================================
// Payload Schema Checks
// ============================================================================

fn schema_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub(crate) fn validate_farm_payload(payload: &FarmPayload) -> Result<(), ValidationError> {
    validate_latitude(payload.latitude).map_err(|m| schema_error("latitude", m))?;
    validate_longitude(payload.longitude).map_err(|m| schema_error("longitude", m))?;
    validate_area(payload.total_area).map_err(|m| schema_error("total_area", m))?;
    Ok(())
}

pub(crate) fn validate_field_payload(payload: &FieldPayload) -> Result<(), ValidationError> {
    if payload.farm_id.is_none() {
        return Err(schema_error("farm_id", "A field must belong to a farm"));
    }
    validate_area(payload.area).map_err(|m| schema_error("area", m))?;
    validate_soil_readings(&payload.soil_properties)
        .map_err(|m| schema_error("soil_properties", m))?;
    Ok(())
}

/// Human-readable list of everything the backend would reject
pub fn payload_issues<T: Validate>(payload: &T) -> Vec<String> {
    match payload.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => describe(&errors),
    }
}

fn describe(errors: &ValidationErrors) -> Vec<String> {
    let mut issues: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid ({})", field, e.code),
            })
        })
        .collect();
    issues.sort();
    issues
}
