//! Shared fixtures for the integration tests

#![allow(dead_code)]

use agrobuddy::classifier::{DiseaseClassifier, Prediction};
use agrobuddy::remedy_store::RemedyStore;
use agrobuddy::server::AppState;
use image::{DynamicImage, ImageOutputFormat};
use std::io::Cursor;
use std::sync::Arc;

pub const BOUNDARY: &str = "agrobuddy-test-boundary";

pub const REMEDY_DOCUMENT: &str = r#"{
    "Leaf Spot": {"actions": ["Apply copper-based fungicides.", "Water at the base to keep foliage dry.", "Remove infected leaves promptly."]},
    "Late Blight": {"actions": ["Remove and destroy infected plants."]}
}"#;

/// Classifier that always returns the same prediction
pub struct FixedClassifier {
    labels: Vec<String>,
    confidence: f64,
}

impl FixedClassifier {
    pub fn new(label: &str, confidence: f64) -> Self {
        Self {
            labels: vec![label.to_string()],
            confidence,
        }
    }
}

impl DiseaseClassifier for FixedClassifier {
    fn classify(&self, _image: &DynamicImage) -> Prediction {
        Prediction {
            disease: self.labels[0].clone(),
            confidence: self.confidence,
        }
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

pub fn remedy_store() -> RemedyStore {
    RemedyStore::from_json_str(REMEDY_DOCUMENT).unwrap()
}

pub fn state_with(classifier: Arc<dyn DiseaseClassifier>) -> Arc<AppState> {
    Arc::new(AppState::new(classifier, remedy_store()))
}

/// A small valid PNG image
pub fn png_bytes() -> Vec<u8> {
    let image = DynamicImage::new_rgb8(8, 8);
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageOutputFormat::Png).unwrap();
    cursor.into_inner()
}

/// One part of a hand-built multipart body
pub struct FormPart<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content: &'a [u8],
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match part.file_name {
            Some(file_name) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                part.name, file_name
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
