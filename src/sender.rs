//! A client for sending alerts to a WeCom group robot webhook.

use crate::config::WeComConfig;
use crate::core::SendResult;
use crate::message::WeComMessage;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::task;
use tracing::{debug, info, instrument, warn};

/// The `Content-Type` the webhook expects.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The webhook's reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteResponse {
    /// `0` on success.
    pub errcode: i64,
    pub errmsg: String,
}

/// Everything that can go wrong while delivering one message.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("failed to encode WeCom message: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("HTTP request to WeCom failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("WeCom notification task failed: {0}")]
    Task(#[from] task::JoinError),
    #[error("empty response")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
    #[error("errcode {errcode}: {errmsg}")]
    Rejected { errcode: i64, errmsg: String },
}

impl From<Result<RemoteResponse, SendError>> for SendResult {
    fn from(result: Result<RemoteResponse, SendError>) -> Self {
        match result {
            Ok(_) => SendResult::success("send message success"),
            Err(SendError::EmptyResponse) => {
                SendResult::failure("send message error: empty response")
            }
            Err(SendError::MalformedResponse(_)) => {
                SendResult::failure("send message failed: malformed response")
            }
            Err(SendError::Rejected { errmsg, .. }) => {
                SendResult::failure(format!("send message error: {}", errmsg))
            }
            Err(SendError::Encode(_) | SendError::Transport(_) | SendError::Task(_)) => {
                SendResult::failure("send alert failed")
            }
        }
    }
}

/// Sends alerts to one WeCom webhook.
///
/// Every call to [`WeComSender::send`] issues exactly one HTTP request on a
/// client that lives only for that call.
#[derive(Debug, Clone)]
pub struct WeComSender {
    config: WeComConfig,
    timeout: Duration,
}

impl WeComSender {
    /// Creates a new `WeComSender`.
    pub fn new(config: WeComConfig) -> Self {
        Self {
            config,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn config(&self) -> &WeComConfig {
        &self.config
    }

    /// Formats and sends an alert, reporting the outcome as a `SendResult`.
    #[instrument(skip_all, fields(msg_type = %self.config.msg_type))]
    pub async fn send(&self, title: &str, content: &str) -> SendResult {
        let result = self.try_send(title, content).await;
        match &result {
            Ok(_) => info!("Successfully sent alert to WeCom."),
            Err(e) => warn!(error = %e, "Failed to send alert to WeCom"),
        }
        result.into()
    }

    /// Formats and sends an alert, keeping the failure cause.
    pub async fn try_send(&self, title: &str, content: &str) -> Result<RemoteResponse, SendError> {
        let message = WeComMessage::build(&self.config, title, content);
        let payload = message.to_json().map_err(SendError::Encode)?;

        let webhook_url = self.config.webhook_url.clone();
        let timeout = self.timeout;
        let body = task::spawn_blocking(move || -> Result<String, SendError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?;
            Self::send_request(&client, &webhook_url, payload)
        })
        .await??;

        check_response(&body)
    }

    /// Posts the payload in a blocking manner and returns the raw body.
    fn send_request(
        client: &reqwest::blocking::Client,
        webhook_url: &str,
        payload: String,
    ) -> Result<String, SendError> {
        info!(url = %redact_url(webhook_url), payload = %payload, "Posting message to WeCom");
        let response = client
            .post(webhook_url)
            .header(CONTENT_TYPE, JSON_UTF8)
            .body(payload)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        debug!(%status, response = %body, "WeCom webhook responded");
        Ok(body)
    }
}

/// Strips the query string (which carries the robot `key`) from a webhook URL
/// so it can be logged.
pub fn redact_url(webhook_url: &str) -> String {
    match reqwest::Url::parse(webhook_url) {
        Ok(mut url) => {
            if url.query().is_some() {
                url.set_query(Some("key=***"));
            }
            url.to_string()
        }
        Err(_) => "<invalid url>".to_string(),
    }
}

/// Interprets the webhook's reply.
pub fn check_response(body: &str) -> Result<RemoteResponse, SendError> {
    if body.trim().is_empty() {
        return Err(SendError::EmptyResponse);
    }
    let response: RemoteResponse =
        serde_json::from_str(body).map_err(SendError::MalformedResponse)?;
    if response.errcode == 0 {
        Ok(response)
    } else {
        Err(SendError::Rejected {
            errcode: response.errcode,
            errmsg: response.errmsg,
        })
    }
}
