//! HTTP client used by the bot to reach the prediction service

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::errors::ClientError;

/// Tolerant view of the prediction service's JSON reply
///
/// Every field is optional so a partial reply still renders.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictionReply {
    pub label: Option<String>,
    pub confidence: Option<f64>,
    pub remedy: Option<RemedyReply>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemedyReply {
    pub actions: Option<Vec<String>>,
}

impl PredictionReply {
    /// Remedy actions, if the reply carried any list at all
    pub fn actions(&self) -> Option<&[String]> {
        self.remedy
            .as_ref()
            .and_then(|remedy| remedy.actions.as_deref())
    }
}

/// Client for `POST /predict` with a bounded request timeout
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl PredictionClient {
    /// Create a client for the given `/predict` URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid prediction endpoint URL: {endpoint}"))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Upload an image as multipart field `image` and parse the reply
    pub async fn predict(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> Result<PredictionReply, ClientError> {
        debug!(endpoint = %self.endpoint, size_bytes = image.len(), "Sending image for prediction");

        let part = Part::bytes(image).file_name(file_name.to_string());
        let form = Form::new().part("image", part);

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Prediction service rejected the request");
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let reply: PredictionReply =
            serde_json::from_str(&body).map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        info!(label = ?reply.label, confidence = ?reply.confidence, "Prediction received");
        Ok(reply)
    }

    /// Call the sibling `/ping` route of the configured endpoint
    pub async fn ping(&self) -> Result<(), ClientError> {
        let url = self
            .endpoint
            .join("ping")
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Rejected {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
    }
}
