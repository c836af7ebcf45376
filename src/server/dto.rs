//! Wire types for the prediction HTTP API.

use serde::{Deserialize, Serialize};

use crate::classifier::Prediction;
use crate::remedy_store::RemedyEntry;

/// Body of a successful `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub label: String,
    pub confidence: f64,
    pub remedy: RemedyEntry,
}

impl PredictResponse {
    /// Join a prediction with its remedy, rounding the confidence for display
    pub fn new(prediction: Prediction, remedy: RemedyEntry) -> Self {
        Self {
            confidence: prediction.rounded_confidence(),
            label: prediction.disease,
            remedy,
        }
    }
}

/// Body of `GET /ping`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: String,
}

impl PingResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
