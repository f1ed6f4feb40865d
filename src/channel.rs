//! The WeCom implementation of [`AlertChannel`].

use crate::config::WeComConfig;
use crate::core::{AlertChannel, AlertInfo, SendResult};
use crate::sender::WeComSender;
use async_trait::async_trait;
use tracing::{instrument, warn};

/// Delivers alerts to the webhook named in each alert's plugin parameters.
#[derive(Debug, Default, Clone)]
pub struct WeComAlertChannel;

impl WeComAlertChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertChannel for WeComAlertChannel {
    #[instrument(skip_all, fields(title = %alert.title))]
    async fn process(&self, alert: &AlertInfo) -> SendResult {
        let config = match WeComConfig::from_params(&alert.params) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Invalid WeCom alert parameters");
                return SendResult::failure(e.to_string());
            }
        };

        WeComSender::new(config)
            .send(&alert.title, &alert.content)
            .await
    }
}
