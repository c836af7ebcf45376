//! # Configuration Module
//!
//! This module defines the startup configuration for both processes:
//! the prediction service and the Telegram bot client. Values come from
//! environment variables (optionally loaded from a `.env` file by the
//! binaries) and are handed to each component explicitly.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

// Constants for service configuration
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_REMEDIES_PATH: &str = "data/remedies.json";
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10MB limit for uploaded images

// Constants for bot configuration
pub const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:5000/predict";
pub const DEFAULT_PREDICT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the prediction HTTP service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// Path to the remedy JSON document
    pub remedies_path: PathBuf,
    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 5000))),
            remedies_path: PathBuf::from(DEFAULT_REMEDIES_PATH),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl ServiceConfig {
    /// Read the service configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// Unset keys keep their defaults; set but unparseable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("PREDICT_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("PREDICT_BIND_ADDR is not a socket address: {addr}"))?;
        }

        if let Some(path) = lookup("REMEDIES_PATH") {
            config.remedies_path = PathBuf::from(path);
        }

        if let Some(limit) = lookup("MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = limit
                .parse()
                .with_context(|| format!("MAX_UPLOAD_BYTES is not a byte count: {limit}"))?;
        }

        Ok(config)
    }
}

/// Configuration for the Telegram bot client
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot API token
    pub telegram_token: String,
    /// Full URL of the prediction endpoint
    pub predict_url: String,
    /// Upper bound for a single call to the prediction endpoint
    pub request_timeout: Duration,
}

impl BotConfig {
    /// Read the bot configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// `TELEGRAM_TOKEN` is mandatory and must not be blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = lookup("TELEGRAM_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow!("TELEGRAM_TOKEN not set in environment variables"))?;

        let predict_url = lookup("PREDICT_API").unwrap_or_else(|| DEFAULT_PREDICT_URL.to_string());

        let timeout_secs = match lookup("PREDICT_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().with_context(|| {
                format!("PREDICT_TIMEOUT_SECS is not a number of seconds: {raw}")
            })?,
            None => DEFAULT_PREDICT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(anyhow!("PREDICT_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Self {
            telegram_token,
            predict_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
