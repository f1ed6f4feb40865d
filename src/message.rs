//! WeCom robot message payloads.
//!
//! A message serializes as `{"msgtype": <type>, <type>: <body>}`, which maps
//! directly onto an internally tagged enum.

use crate::config::WeComConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

const TEXT_TAG: &str = "[DolphinSchedulerAlert] ";
const MARKDOWN_TAG: &str = "**[DolphinSchedulerAlert]** ";

/// The WeCom message type a channel sends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Markdown,
}

impl MessageType {
    /// Resolves a configured message type. Unset or blank means `text`.
    pub fn resolve(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() || raw.eq_ignore_ascii_case("text") {
            MessageType::Text
        } else if raw.eq_ignore_ascii_case("markdown") {
            MessageType::Markdown
        } else {
            warn!(msg_type = raw, "Unknown WeCom message type, falling back to text");
            MessageType::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Markdown => "markdown",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a `text` message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextBody {
    pub content: String,
    pub mentioned_mobile_list: Vec<String>,
    pub mentioned_list: Vec<String>,
}

/// Body of a `markdown` message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkdownBody {
    pub content: String,
}

/// A complete message as posted to the webhook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "msgtype", rename_all = "lowercase")]
pub enum WeComMessage {
    Text { text: TextBody },
    Markdown { markdown: MarkdownBody },
}

impl WeComMessage {
    /// Builds the message for an alert according to the channel config.
    pub fn build(config: &WeComConfig, title: &str, content: &str) -> Self {
        match config.msg_type {
            MessageType::Text => Self::text(config, title, content),
            MessageType::Markdown => Self::markdown(config, title, content),
        }
    }

    fn text(config: &WeComConfig, title: &str, content: &str) -> Self {
        let content = format!("{}{}\n{}", TEXT_TAG, title, format_json(content));
        WeComMessage::Text {
            text: TextBody {
                content,
                mentioned_mobile_list: config.at_mobiles.clone(),
                mentioned_list: config.at_user_ids.clone(),
            },
        }
    }

    fn markdown(config: &WeComConfig, title: &str, content: &str) -> Self {
        let mut body = format!(
            "{}{}\n><font color=\"comment\">{}</font>\n\n",
            MARKDOWN_TAG,
            title,
            format_json(content)
        );
        for user_id in &config.at_user_ids {
            body.push_str("<@");
            body.push_str(user_id);
            body.push_str("> ");
        }
        WeComMessage::Markdown {
            markdown: MarkdownBody { content: body },
        }
    }

    pub fn msg_type(&self) -> MessageType {
        match self {
            WeComMessage::Text { .. } => MessageType::Text,
            WeComMessage::Markdown { .. } => MessageType::Markdown,
        }
    }

    /// The rendered message text.
    pub fn content(&self) -> &str {
        match self {
            WeComMessage::Text { text } => &text.content,
            WeComMessage::Markdown { markdown } => &markdown.content,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Pretty-prints `input` if it is a JSON object or array, otherwise returns
/// it unchanged.
pub fn format_json(input: &str) -> String {
    match serde_json::from_str::<Value>(input) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => {
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| input.to_string())
        }
        _ => input.to_string(),
    }
}
