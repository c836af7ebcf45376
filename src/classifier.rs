//! # Classifier Module
//!
//! Disease classification capability. The prediction service only depends
//! on the [`DiseaseClassifier`] trait, so a real model can replace the
//! random placeholder without touching the HTTP layer.

use anyhow::{anyhow, Result};
use image::DynamicImage;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Range;

/// Labels the placeholder classifier chooses from
pub const KNOWN_DISEASES: [&str; 3] = ["Late Blight", "Leaf Spot", "Early Blight"];

/// Lower bound (inclusive) of the placeholder confidence
pub const MIN_CONFIDENCE: f64 = 0.80;
/// Upper bound (exclusive) of the placeholder confidence
pub const MAX_CONFIDENCE: f64 = 0.99;

/// A single classification outcome
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Predicted disease label
    pub disease: String,
    /// Certainty in `[0, 1]`
    pub confidence: f64,
}

impl Prediction {
    /// Confidence rounded to two decimal places, as reported to clients
    pub fn rounded_confidence(&self) -> f64 {
        round_to_hundredths(self.confidence)
    }
}

/// Round a value to two decimal places
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Capability interface for anything that can label a decoded image
///
/// Implementations must be pure and return in bounded time; they never
/// fail for an image that decoded successfully.
pub trait DiseaseClassifier: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> Prediction;

    /// Every label this classifier can emit
    fn labels(&self) -> &[String];
}

/// Placeholder classifier picking a label and confidence at random
#[derive(Debug, Clone)]
pub struct RandomClassifier {
    labels: Vec<String>,
    confidence: Range<f64>,
}

impl RandomClassifier {
    /// Create a classifier over the given label set
    ///
    /// # Errors
    ///
    /// Returns an error if `labels` is empty.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(anyhow!("Classifier needs at least one disease label"));
        }
        Ok(Self {
            labels,
            confidence: MIN_CONFIDENCE..MAX_CONFIDENCE,
        })
    }
}

impl Default for RandomClassifier {
    fn default() -> Self {
        Self {
            labels: KNOWN_DISEASES.iter().map(|s| s.to_string()).collect(),
            confidence: MIN_CONFIDENCE..MAX_CONFIDENCE,
        }
    }
}

impl DiseaseClassifier for RandomClassifier {
    fn classify(&self, image: &DynamicImage) -> Prediction {
        let mut rng = rand::thread_rng();
        // labels is never empty, see RandomClassifier::new
        let disease = self
            .labels
            .choose(&mut rng)
            .cloned()
            .unwrap_or_default();
        let confidence = rng.gen_range(self.confidence.clone());

        debug!(
            "Classified {}x{} image as {} ({:.3})",
            image.width(),
            image.height(),
            disease,
            confidence
        );

        Prediction { disease, confidence }
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}
