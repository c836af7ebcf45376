//! Bot module for handling Telegram interactions
//!
//! - `message_handler`: handles incoming text, photo and document messages
//! - `prediction_client`: talks to the prediction service over HTTP
//! - `ui_builder`: formats replies

pub mod message_handler;
pub mod prediction_client;
pub mod ui_builder;

use crate::errors::ClientError;
use crate::localization::LocalizationManager;
use std::path::PathBuf;

pub use message_handler::{download_file, largest_photo, message_handler, relay_image};
pub use prediction_client::{PredictionClient, PredictionReply, RemedyReply};
pub use ui_builder::{format_prediction, format_relay_error};

/// Everything a message handler needs, shared across updates
pub struct BotContext {
    pub client: PredictionClient,
    pub localizer: LocalizationManager,
    /// Where downloaded images are staged before upload
    pub temp_dir: PathBuf,
}

impl BotContext {
    pub fn new(client: PredictionClient, localizer: LocalizationManager) -> Self {
        Self {
            client,
            localizer,
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Stage downloads in `temp_dir` instead of the system temp directory
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }
}

/// Why an image could not be turned into a prediction
#[derive(Debug)]
pub enum RelayError {
    /// Fetching the file from Telegram or staging it locally failed
    Download(anyhow::Error),
    /// The prediction service call failed
    Service(ClientError),
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::Download(e) => write!(f, "Download failed: {e}"),
            RelayError::Service(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<ClientError> for RelayError {
    fn from(err: ClientError) -> Self {
        RelayError::Service(err)
    }
}
