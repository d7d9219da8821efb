//! HTTP client for the farm management backend
//!
//! Every call is JSON over HTTP against a configured base URL. Non-success
//! statuses are surfaced as [`ClientError::Status`]; nothing is retried.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    Farm, FarmPayload, Field, FieldPayload, PredictionRequest, PredictionResult, WeatherEntry,
};

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Farm management API client
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from API configuration
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create a client with a custom base URL and default settings (for testing)
    pub fn with_base_url(base_url: impl AsRef<str>) -> Self {
        Self::with_client(Client::new(), base_url.as_ref())
    }

    fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Fetch all farms
    pub async fn list_farms(&self) -> ClientResult<Vec<Farm>> {
        self.send(self.request(Method::GET, "/farms/")).await
    }

    /// Create a farm
    pub async fn create_farm(&self, payload: &FarmPayload) -> ClientResult<Farm> {
        self.send(self.request(Method::POST, "/farms/").json(payload)).await
    }

    /// Update a farm; the payload carries its id
    pub async fn update_farm(&self, payload: &FarmPayload) -> ClientResult<Farm> {
        self.send(self.request(Method::PUT, "/farms/").json(payload)).await
    }

    /// Fetch all fields across farms
    pub async fn list_fields(&self) -> ClientResult<Vec<Field>> {
        self.send(self.request(Method::GET, "/fields/")).await
    }

    /// Create a field
    pub async fn create_field(&self, payload: &FieldPayload) -> ClientResult<Field> {
        self.send(self.request(Method::POST, "/fields/").json(payload)).await
    }

    /// Update a field; the payload carries its id
    pub async fn update_field(&self, payload: &FieldPayload) -> ClientResult<Field> {
        self.send(self.request(Method::PUT, "/fields/").json(payload)).await
    }

    /// Request a yield prediction
    pub async fn predict(&self, request: &PredictionRequest) -> ClientResult<PredictionResult> {
        self.send(self.request(Method::POST, "/predict/").json(request)).await
    }

    /// Fetch weather observations, optionally scoped to one field
    pub async fn list_weather(&self, field_id: Option<i64>) -> ClientResult<Vec<WeatherEntry>> {
        let mut request = self.request(Method::GET, "/weather-data/");
        if let Some(field_id) = field_id {
            request = request.query(&[("field_id", field_id)]);
        }
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, %body, "backend returned an error status");
        return Err(ClientError::Status { status, body });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}
