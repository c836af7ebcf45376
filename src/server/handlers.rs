//! HTTP route handlers for the prediction service.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use tracing::{debug, error, info, warn};

use super::dto::{PingResponse, PredictResponse};
use super::AppState;
use crate::classifier::Prediction;
use crate::errors::PredictionError;

/// Name of the multipart field carrying the photo
pub const IMAGE_FIELD: &str = "image";

pub const GREETING: &str = "🌾 Crop Disease Prediction Chatbot is Running!";

/// GET / - Greeting.
pub async fn root() -> &'static str {
    GREETING
}

/// GET /ping - Liveness check.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse::ok())
}

/// An image file pulled out of a multipart request
#[derive(Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// POST /predict - Classify an uploaded image and attach its remedy.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, PredictionError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "Predict request is not a multipart upload");
        PredictionError::MissingImage
    })?;

    let upload = read_image_field(&mut multipart).await?;
    info!(
        file_name = %upload.file_name,
        size_bytes = upload.bytes.len(),
        "Received image for prediction"
    );

    let prediction = run_classifier(&state, upload.bytes).await.map_err(|e| {
        error!(error = %e, "Prediction failed");
        e
    })?;

    let remedy = state.remedies.lookup(&prediction.disease);
    let response = PredictResponse::new(prediction, remedy);

    info!(
        label = %response.label,
        confidence = response.confidence,
        actions = response.remedy.actions.len(),
        "Prediction completed"
    );
    Ok(Json(response))
}

/// Find the `image` file field, skipping any other parts
pub async fn read_image_field(multipart: &mut Multipart) -> Result<ImageUpload, PredictionError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PredictionError::InvalidUpload(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            debug!(field = ?field.name(), "Skipping unrelated multipart field");
            continue;
        }

        // A part without a filename is a plain form value, not a file upload
        let file_name = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        if file_name.is_empty() {
            return Err(PredictionError::EmptyFilename);
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| PredictionError::InvalidUpload(e.body_text()))?;

        return Ok(ImageUpload { file_name, bytes });
    }

    Err(PredictionError::MissingImage)
}

/// Decode and classify on the blocking pool
async fn run_classifier(state: &AppState, bytes: Bytes) -> Result<Prediction, PredictionError> {
    let classifier = Arc::clone(&state.classifier);

    tokio::task::spawn_blocking(move || -> Result<Prediction, PredictionError> {
        let image = image::load_from_memory(&bytes)?;
        Ok(classifier.classify(&image))
    })
    .await?
}
