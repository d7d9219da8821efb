//! In-process mock of the farm management backend

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use farm_dashboard::ApiClient;
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{Farm, FarmPayload, Field, FieldPayload, WeatherEntry};

#[derive(Default)]
pub struct BackendState {
    pub farms: Vec<Farm>,
    pub fields: Vec<Field>,
    pub weather: Vec<WeatherEntry>,
    pub fail_writes: bool,
    pub fail_lists: bool,
    pub fail_predict: bool,
    pub garbage_predict: bool,
    pub farm_list_calls: usize,
    pub field_list_calls: usize,
    pub last_farm_write: Option<Value>,
    pub last_field_write: Option<Value>,
    pub last_prediction: Option<Value>,
    pub weather_queries: Vec<Option<i64>>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }

    pub fn with_farms(self, farms: Vec<Farm>) -> Self {
        self.state().farms = farms;
        self
    }

    pub fn with_fields(self, fields: Vec<Field>) -> Self {
        self.state().fields = fields;
        self
    }

    pub fn with_weather(self, weather: Vec<WeatherEntry>) -> Self {
        self.state().weather = weather;
        self
    }

    /// Serve on an ephemeral local port and return a client pointed at it
    pub async fn spawn(&self) -> ApiClient {
        let app = Router::new()
            .route("/farms/", get(list_farms).post(create_farm).put(update_farm))
            .route("/fields/", get(list_fields).post(create_field).put(update_field))
            .route("/predict/", post(predict))
            .route("/weather-data/", get(list_weather))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        ApiClient::with_base_url(format!("http://{}", addr))
    }
}

/// Client pointed at a port nobody listens on
pub fn unreachable_client() -> ApiClient {
    ApiClient::with_base_url("http://127.0.0.1:9")
}

pub fn farm(id: i64, name: &str) -> Farm {
    Farm {
        id,
        name: name.to_string(),
        location: "Valley Road".to_string(),
        latitude: 18.79,
        longitude: 98.98,
        total_area: 40.0,
        created_at: None,
    }
}

pub fn field(id: i64, farm_id: i64, name: &str) -> Field {
    serde_json::from_value(json!({
        "id": id,
        "farm_id": farm_id,
        "name": name,
        "area": 2.5,
        "soil_type": "Loam",
        "soil_properties": {
            "ph": 6.4, "nitrogen": 35.0, "phosphorus": 18.0,
            "potassium": 140.0, "organic_matter": 2.8
        }
    }))
    .unwrap()
}

fn server_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "database unavailable" })),
    )
}

type Reply<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

async fn list_farms(State(backend): State<MockBackend>) -> Reply<Vec<Farm>> {
    let mut state = backend.state();
    state.farm_list_calls += 1;
    if state.fail_lists {
        return Err(server_error());
    }
    Ok(Json(state.farms.clone()))
}

async fn create_farm(
    State(backend): State<MockBackend>,
    Json(body): Json<Value>,
) -> Reply<Farm> {
    let mut state = backend.state();
    state.last_farm_write = Some(body.clone());
    if state.fail_writes {
        return Err(server_error());
    }
    let payload: FarmPayload = serde_json::from_value(body).unwrap();
    let created = Farm {
        id: state.farms.iter().map(|f| f.id).max().unwrap_or(0) + 1,
        name: payload.name,
        location: payload.location,
        latitude: payload.latitude,
        longitude: payload.longitude,
        total_area: payload.total_area,
        created_at: None,
    };
    state.farms.push(created.clone());
    Ok(Json(created))
}

async fn update_farm(
    State(backend): State<MockBackend>,
    Json(body): Json<Value>,
) -> Reply<Farm> {
    let mut state = backend.state();
    state.last_farm_write = Some(body.clone());
    if state.fail_writes {
        return Err(server_error());
    }
    let payload: FarmPayload = serde_json::from_value(body).unwrap();
    let id = payload.id.unwrap();
    let farm = state.farms.iter_mut().find(|f| f.id == id).unwrap();
    farm.name = payload.name;
    farm.location = payload.location;
    farm.latitude = payload.latitude;
    farm.longitude = payload.longitude;
    farm.total_area = payload.total_area;
    Ok(Json(farm.clone()))
}

async fn list_fields(State(backend): State<MockBackend>) -> Reply<Vec<Field>> {
    let mut state = backend.state();
    state.field_list_calls += 1;
    if state.fail_lists {
        return Err(server_error());
    }
    Ok(Json(state.fields.clone()))
}

async fn create_field(
    State(backend): State<MockBackend>,
    Json(body): Json<Value>,
) -> Reply<Field> {
    let mut state = backend.state();
    state.last_field_write = Some(body.clone());
    if state.fail_writes {
        return Err(server_error());
    }
    let payload: FieldPayload = serde_json::from_value(body).unwrap();
    let created = Field {
        id: state.fields.iter().map(|f| f.id).max().unwrap_or(0) + 1,
        farm_id: payload.farm_id.unwrap_or_default(),
        name: payload.name,
        area: payload.area,
        soil_type: payload.soil_type,
        soil_properties: payload.soil_properties,
        created_at: None,
    };
    state.fields.push(created.clone());
    Ok(Json(created))
}

async fn update_field(
    State(backend): State<MockBackend>,
    Json(body): Json<Value>,
) -> Reply<Field> {
    let mut state = backend.state();
    state.last_field_write = Some(body.clone());
    if state.fail_writes {
        return Err(server_error());
    }
    let payload: FieldPayload = serde_json::from_value(body).unwrap();
    let id = payload.id.unwrap();
    let field = state.fields.iter_mut().find(|f| f.id == id).unwrap();
    field.farm_id = payload.farm_id.unwrap_or(field.farm_id);
    field.name = payload.name;
    field.area = payload.area;
    field.soil_type = payload.soil_type;
    field.soil_properties = payload.soil_properties;
    Ok(Json(field.clone()))
}

async fn predict(State(backend): State<MockBackend>, Json(body): Json<Value>) -> Reply<Value> {
    let mut state = backend.state();
    state.last_prediction = Some(body);
    if state.fail_predict {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Model is not trained yet" })),
        ));
    }
    if state.garbage_predict {
        return Ok(Json(json!({ "unexpected": true })));
    }
    Ok(Json(json!({
        "predicted_yield": 4.25,
        "confidence_score": 0.82,
        "prediction_date": "2024-04-02T09:15:00.123456",
        "features_used": { "field_area": 12.5, "ph": 6.5 },
        "recommendations": ["Maintain current irrigation schedule"]
    })))
}

#[derive(Deserialize)]
struct WeatherQuery {
    field_id: Option<i64>,
}

async fn list_weather(
    State(backend): State<MockBackend>,
    Query(query): Query<WeatherQuery>,
) -> Reply<Vec<WeatherEntry>> {
    let mut state = backend.state();
    state.weather_queries.push(query.field_id);
    if state.fail_lists {
        return Err(server_error());
    }
    Ok(Json(state.weather.clone()))
}
