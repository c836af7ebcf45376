use agrobuddy::classifier::{DiseaseClassifier, RandomClassifier};
use agrobuddy::config::ServiceConfig;
use agrobuddy::logging;
use agrobuddy::remedy_store::RemedyStore;
use agrobuddy::server::{self, AppState};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    logging::init();

    info!("Starting crop disease prediction service");

    let config = ServiceConfig::from_env().context("Invalid service configuration")?;

    // A missing or malformed remedy document is fatal at startup
    let remedies = RemedyStore::load(&config.remedies_path)?;
    let classifier = Arc::new(RandomClassifier::default());
    info!("Classifier labels: {}", classifier.labels().join(", "));

    let state = Arc::new(AppState::new(classifier, remedies));
    server::serve(&config, state).await
}
