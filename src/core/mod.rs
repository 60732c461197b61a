// src/core/mod.rs
//! Core services: configuration, the webhook client and response normalization

pub mod config_manager;
pub mod normalizer;
pub mod webhook_client;

pub use config_manager::{ConfigManager, WebhookConfig};
pub use normalizer::ResponseNormalizer;
pub use webhook_client::{WebhookClient, WebhookTransport};
