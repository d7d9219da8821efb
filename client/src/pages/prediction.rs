//! Yield prediction page

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use shared::{PredictionDraft, PredictionInput, PredictionRequest, PredictionResult, RequestState};

use crate::api::ApiClient;
use crate::error::ClientError;

/// Message shown when the backend rejects a prediction request
pub const PREDICTION_FAILED: &str = "Failed to get prediction";

/// Prediction form plus the outcome of its last submission
#[derive(Debug, Default)]
pub struct YieldPrediction {
    draft: PredictionDraft,
    state: RequestState<PredictionResult>,
}

impl YieldPrediction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &PredictionDraft {
        &self.draft
    }

    pub fn state(&self) -> &RequestState<PredictionResult> {
        &self.state
    }

    pub fn update(&mut self, input: PredictionInput, value: impl Into<String>) {
        self.draft.set(input, value);
    }

    pub fn set_planting_date(&mut self, date: Option<DateTime<Utc>>) {
        self.draft.planting_date = date;
    }

    /// Request body for the current draft, weather stamped with local time
    pub fn request(&self) -> PredictionRequest {
        self.draft.to_request(Local::now().naive_local())
    }

    /// Submit the draft, stamping the weather snapshot with local time
    pub async fn submit(&mut self, api: &ApiClient) {
        self.submit_observed_at(api, Local::now().naive_local()).await
    }

    /// Submit with an explicit observation time for the weather snapshot
    pub async fn submit_observed_at(&mut self, api: &ApiClient, observed_at: NaiveDateTime) {
        self.state = RequestState::Pending;

        let request = self.draft.to_request(observed_at);
        self.state = match api.predict(&request).await {
            Ok(result) => {
                tracing::info!(
                    predicted_yield = result.predicted_yield,
                    confidence = result.confidence_score,
                    "prediction received"
                );
                RequestState::Succeeded(result)
            }
            Err(e) => {
                tracing::warn!("Prediction request failed: {}", e);
                RequestState::Failed(failure_message(&e))
            }
        };
    }
}

fn failure_message(err: &ClientError) -> String {
    if err.is_status() {
        PREDICTION_FAILED.to_string()
    } else {
        err.to_string()
    }
}
