//! WebAssembly module for the farm dashboard
//!
//! Provides client-side form shaping for:
//! - Numeric form input parsing
//! - Prediction request bodies
//! - Farm/field payloads and advisory checks
//! - Weather summary cards and chart series

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Current browser-local time, used to stamp the weather snapshot
fn local_now() -> Option<NaiveDateTime> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())?
        .and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds())
}

/// Parse numeric form text; NaN when there is no leading number
#[wasm_bindgen]
pub fn parse_form_number(text: &str) -> f64 {
    parse_numeric(text)
}

/// Build the `POST /predict/` body from the form's field values.
///
/// `soil` and `weather` are JSON objects keyed by property name. Values may be
/// strings as typed (`{"ph": "6.5"}`), numbers, or `null` for an empty input;
/// unknown keys are skipped with a console warning. `planting_date` is an
/// ISO-8601 timestamp or empty.
#[wasm_bindgen]
pub fn build_prediction_request(
    crop_type: &str,
    field_area: &str,
    planting_date: &str,
    soil_type: &str,
    soil_json: &str,
    weather_json: &str,
) -> Result<String, JsValue> {
    let observed_at =
        local_now().ok_or_else(|| JsValue::from_str("Browser clock returned an invalid date"))?;
    let form = PredictionForm {
        crop_type,
        field_area,
        planting_date,
        soil_type,
        soil_json,
        weather_json,
    };
    let (request, warnings) = form.to_request(observed_at).map_err(|e| JsValue::from_str(&e))?;
    warn_all(&warnings);
    to_json(&request)
}

/// Build a farm create/update body from a draft JSON object
#[wasm_bindgen]
pub fn build_farm_payload(draft_json: &str, id: Option<i64>) -> Result<String, JsValue> {
    let (payload, issues) = farm_payload(draft_json, id).map_err(|e| JsValue::from_str(&e))?;
    warn_all(&issues);
    to_json(&payload)
}

/// Build a field create/update body from a draft JSON object
#[wasm_bindgen]
pub fn build_field_payload(
    draft_json: &str,
    id: Option<i64>,
    farm_id: Option<i64>,
) -> Result<String, JsValue> {
    let (payload, issues) =
        field_payload(draft_json, id, farm_id).map_err(|e| JsValue::from_str(&e))?;
    warn_all(&issues);
    to_json(&payload)
}

fn warn_all(messages: &[String]) {
    for message in messages {
        warn(message);
    }
}

/// Raw prediction form values as handed over from JavaScript
struct PredictionForm<'a> {
    crop_type: &'a str,
    field_area: &'a str,
    planting_date: &'a str,
    soil_type: &'a str,
    soil_json: &'a str,
    weather_json: &'a str,
}

impl PredictionForm<'_> {
    /// The request plus warnings for skipped keys. The request is built
    /// whenever the inputs decode, whatever the warnings say.
    fn to_request(
        &self,
        observed_at: NaiveDateTime,
    ) -> Result<(PredictionRequest, Vec<String>), String> {
        let mut draft = PredictionDraft::default();
        let mut warnings = Vec::new();
        draft.set(PredictionInput::CropType, self.crop_type);
        draft.set(PredictionInput::FieldArea, self.field_area);
        draft.set(PredictionInput::SoilType, self.soil_type);

        if !self.planting_date.is_empty() {
            let parsed = chrono::DateTime::parse_from_rfc3339(self.planting_date)
                .map_err(|e| format!("Invalid planting date: {}", e))?;
            draft.planting_date = Some(parsed.with_timezone(&chrono::Utc));
        }

        for (key, value) in parse_keyed(self.soil_json, "soil")? {
            match SoilProperty::from_key(&key) {
                Some(property) => draft.set(PredictionInput::Soil(property), value),
                None => warnings.push(format!("Ignoring unknown soil property '{}'", key)),
            }
        }
        for (key, value) in parse_keyed(self.weather_json, "weather")? {
            match WeatherMetric::from_key(&key) {
                Some(metric) => draft.set(PredictionInput::Weather(metric), value),
                None => warnings.push(format!("Ignoring unknown weather metric '{}'", key)),
            }
        }

        Ok((draft.to_request(observed_at), warnings))
    }
}

/// Decode `{key: value}` form input. Numbers are kept in their JSON spelling
/// and `null` reads as an empty input.
fn parse_keyed(json: &str, what: &str) -> Result<Vec<(String, String)>, String> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let map: serde_json::Map<String, Value> =
        serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))?;
    map.into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                Value::Null => String::new(),
                other => return Err(format!("Invalid {} value for '{}': {}", what, key, other)),
            };
            Ok((key, text))
        })
        .collect()
}

fn farm_payload(draft_json: &str, id: Option<i64>) -> Result<(FarmPayload, Vec<String>), String> {
    let draft: FarmDraft =
        serde_json::from_str(draft_json).map_err(|e| format!("Invalid farm draft JSON: {}", e))?;
    let payload = draft.to_payload(id);
    let issues = payload_issues(&payload);
    Ok((payload, issues))
}

fn field_payload(
    draft_json: &str,
    id: Option<i64>,
    farm_id: Option<i64>,
) -> Result<(FieldPayload, Vec<String>), String> {
    let draft: FieldDraft =
        serde_json::from_str(draft_json).map_err(|e| format!("Invalid field draft JSON: {}", e))?;
    let payload = draft.to_payload(id, farm_id);
    let issues = payload_issues(&payload);
    Ok((payload, issues))
}

/// Draft JSON for editing an existing farm or field
#[wasm_bindgen]
pub fn draft_from_entity(kind: &str, entity_json: &str) -> Result<String, JsValue> {
    let invalid =
        |e: serde_json::Error| JsValue::from_str(&format!("Invalid {} JSON: {}", kind, e));
    match kind {
        "farm" => {
            let farm: Farm = serde_json::from_str(entity_json).map_err(invalid)?;
            to_json(&FarmDraft::from(&farm))
        }
        "field" => {
            let field: Field = serde_json::from_str(entity_json).map_err(invalid)?;
            to_json(&FieldDraft::from(&field))
        }
        other => Err(JsValue::from_str(&format!("Unknown entity kind '{}'", other))),
    }
}

/// Soil inputs in display order as `[{key, label}]`
#[wasm_bindgen]
pub fn soil_property_inputs() -> String {
    let inputs: Vec<_> = SoilProperty::ALL
        .iter()
        .map(|p| serde_json::json!({ "key": p.key(), "label": p.label() }))
        .collect();
    serde_json::Value::Array(inputs).to_string()
}

/// Summary cards for the latest entry of a weather series
#[wasm_bindgen]
pub fn weather_cards(entries_json: &str) -> Result<String, JsValue> {
    let entries = parse_entries(entries_json)?;
    to_json(&WeatherSummary::latest(&entries).cards())
}

/// Four-series chart over a weather series
#[wasm_bindgen]
pub fn weather_chart_data(entries_json: &str) -> Result<String, JsValue> {
    let entries = parse_entries(entries_json)?;
    to_json(&weather_chart(&entries))
}

/// The built-in sample weather series
#[wasm_bindgen]
pub fn sample_weather() -> Result<String, JsValue> {
    to_json(&sample_weather_entries())
}

/// Dashboard cards and charts
#[wasm_bindgen]
pub fn dashboard_summary() -> Result<String, JsValue> {
    to_json(&DashboardSummary::sample())
}

fn parse_entries(json: &str) -> Result<Vec<WeatherEntry>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid weather JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_number() {
        assert_eq!(parse_form_number("12.5"), 12.5);
        assert!(parse_form_number("n/a").is_nan());
    }

    fn observed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 2)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    fn wheat_form<'a>(soil_json: &'a str, weather_json: &'a str) -> PredictionForm<'a> {
        PredictionForm {
            crop_type: "Wheat",
            field_area: "12.5",
            planting_date: "",
            soil_type: "Loam",
            soil_json,
            weather_json,
        }
    }

    #[test]
    fn test_prediction_request_from_form_values() {
        let form = wheat_form(r#"{"ph": "6.5"}"#, r#"{"temperature": "24"}"#);
        let (request, warnings) = form.to_request(observed_at()).unwrap();
        assert!(warnings.is_empty());

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["crop_type"], "Wheat");
        assert_eq!(body["field_area"], 12.5);
        assert_eq!(body["soil_properties"]["ph"], 6.5);
        assert!(body["soil_properties"]["nitrogen"].is_null());
        assert_eq!(body["weather_data"][0]["temperature"], 24.0);
        assert_eq!(body["weather_data"][0]["date"], "2024-04-02T09:15:00");
        assert!(body.get("planting_date").is_none());
    }

    #[test]
    fn test_prediction_unknown_keys_are_skipped_with_warnings() {
        let form = wheat_form(
            r#"{"ph": "6.5", "clay": "30"}"#,
            r#"{"wind_speed": "4", "humidity": "60"}"#,
        );
        let (request, warnings) = form.to_request(observed_at()).unwrap();

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("clay"));
        assert!(warnings[1].contains("wind_speed"));
        assert_eq!(request.soil_properties.ph, 6.5);
        assert_eq!(request.weather_data[0].humidity, 60.0);
    }

    #[test]
    fn test_prediction_accepts_numeric_and_null_values() {
        let form = wheat_form(r#"{"ph": 6.5, "potassium": 150, "nitrogen": null}"#, "");
        let (request, _) = form.to_request(observed_at()).unwrap();
        assert_eq!(request.soil_properties.ph, 6.5);
        assert_eq!(request.soil_properties.potassium, 150.0);
        assert!(request.soil_properties.nitrogen.is_nan());

        let nested = wheat_form(r#"{"ph": [6.5]}"#, "");
        assert!(nested.to_request(observed_at()).is_err());
    }

    #[test]
    fn test_prediction_planting_date() {
        let mut form = wheat_form("", "");
        form.planting_date = "2024-03-15T07:00:00+07:00";
        let (request, _) = form.to_request(observed_at()).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["planting_date"], "2024-03-15T00:00:00.000Z");

        form.planting_date = "next spring";
        let err = form.to_request(observed_at()).unwrap_err();
        assert!(err.starts_with("Invalid planting date"));
    }

    #[test]
    fn test_farm_payload_warns_but_still_builds() {
        let (payload, issues) = farm_payload(
            r#"{"name":"","location":"Ridge","latitude":"120","longitude":"98.5","total_area":"4"}"#,
            Some(3),
        )
        .unwrap();

        assert!(!issues.is_empty());
        assert_eq!(payload.id, Some(3));
        assert_eq!(payload.latitude, 120.0);
        assert_eq!(payload.total_area, 4.0);

        assert!(farm_payload("not json", None).is_err());
    }

    #[test]
    fn test_field_payload_attaches_farm() {
        let draft = r#"{"name":"Terrace","area":"1.75","soil_type":"Clay",
            "soil_properties":{"ph":"6.5","nitrogen":"42","phosphorus":"15",
            "potassium":"120","organic_matter":"3.1"}}"#;
        let (payload, issues) = field_payload(draft, None, Some(2)).unwrap();

        assert!(issues.is_empty());
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["farm_id"], 2);
        assert_eq!(body["area"], 1.75);
        assert_eq!(body["soil_properties"]["organic_matter"], 3.1);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn test_weather_cards_on_empty_series() {
        let cards = weather_cards("[]").unwrap();
        let cards: Vec<SummaryCard> = serde_json::from_str(&cards).unwrap();
        assert_eq!(cards[0].value, "0°C");
        assert_eq!(cards[2].value, "0mm");
    }

    #[test]
    fn test_weather_chart_from_sample() {
        let chart = weather_chart_data(&sample_weather().unwrap()).unwrap();
        let chart: LineChart = serde_json::from_str(&chart).unwrap();
        assert_eq!(chart.labels.len(), 5);
        assert_eq!(chart.datasets[3].label, "Soil Moisture (%)");
    }

    #[test]
    fn test_draft_from_farm_entity() {
        let draft = draft_from_entity(
            "farm",
            r#"{"id":3,"name":"Hill","location":"Ridge","latitude":18.5,"longitude":98.25,"total_area":12.0}"#,
        )
        .unwrap();
        let draft: FarmDraft = serde_json::from_str(&draft).unwrap();
        assert_eq!(draft.latitude, "18.5");
        assert_eq!(draft.total_area, "12");
    }

    #[test]
    fn test_soil_property_inputs() {
        let inputs: serde_json::Value = serde_json::from_str(&soil_property_inputs()).unwrap();
        assert_eq!(inputs[4]["key"], "organic_matter");
        assert_eq!(inputs[4]["label"], "Organic matter");
    }

    #[test]
    fn test_dashboard_summary_json() {
        let summary: DashboardSummary =
            serde_json::from_str(&dashboard_summary().unwrap()).unwrap();
        assert_eq!(summary.cards[3].value, "1.2K");
    }
}
