//! Core domain types and channel traits for the WeCom alert plugin
//!
//! This module defines the values exchanged with the alert dispatcher and the
//! trait contracts a plugin registry uses to discover and drive a channel.

use crate::params::PluginParam;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The outcome of a single alert delivery attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendResult {
    /// Whether the webhook accepted the message.
    pub succeeded: bool,
    /// Human-readable outcome or error detail.
    pub message: String,
}

impl SendResult {
    /// A successful delivery.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
        }
    }

    /// A failed delivery.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
        }
    }
}

/// An alert as handed to a channel by the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AlertInfo {
    /// Alert title
    pub title: String,
    /// Alert body, either plain text or JSON text
    pub content: String,
    /// The alert-plugin instance parameters, keyed by parameter name
    pub params: HashMap<String, String>,
}

impl AlertInfo {
    /// Creates an alert with the given plugin parameters.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        params: HashMap<String, String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            params,
        }
    }
}

// =============================================================================
// Channel Traits
// =============================================================================

/// Delivers alerts to one notification service.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    /// Delivers an alert.
    ///
    /// # Returns
    /// Always a `SendResult`; failures are reported through it rather than
    /// raised to the dispatcher.
    async fn process(&self, alert: &AlertInfo) -> SendResult;
}

/// Registry-facing entry point of a channel plugin.
pub trait AlertChannelFactory: Send + Sync {
    /// The unique plugin name shown in the registry.
    fn name(&self) -> &str;

    /// The configuration fields the plugin accepts, in display order.
    fn params(&self) -> Vec<PluginParam>;

    /// Creates a channel instance.
    fn create(&self) -> Box<dyn AlertChannel>;
}
