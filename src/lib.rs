//! # AgroBuddy
//!
//! Crop disease prediction: an HTTP service that classifies uploaded leaf
//! photos and attaches recommended remedies, and a Telegram bot that relays
//! user photos to that service.

pub mod bot;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod localization;
pub mod logging;
pub mod remedy_store;
pub mod server;
