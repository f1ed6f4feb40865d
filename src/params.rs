//! Plugin parameter descriptors.
//!
//! The registry renders these as form fields; the values a user enters come
//! back to the channel as a string map keyed by [`PluginParam::key`].

use serde::{Deserialize, Serialize};

pub const NAME_WEB_HOOK: &str = "WebHook";
pub const WEB_HOOK: &str = "$t('webhook')";

pub const NAME_MSG_TYPE: &str = "MsgType";
pub const MSG_TYPE: &str = "$t('msgType')";

pub const NAME_AT_MOBILES: &str = "AtMobiles";
pub const AT_MOBILES: &str = "$t('atMobiles')";

pub const NAME_AT_USER_IDS: &str = "AtUserIds";
pub const AT_USER_IDS: &str = "$t('atUserIds')";

/// The form control used to collect a parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Input,
    Radio,
}

/// One selectable choice of a radio parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParamOption {
    pub label: String,
    pub value: String,
    pub disabled: bool,
}

impl ParamOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            disabled: false,
        }
    }
}

/// Describes one configuration field of a plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PluginParam {
    pub key: String,
    pub display_name: String,
    pub kind: ParamKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<ParamOption>,
}

impl PluginParam {
    /// A free-text input field.
    pub fn input(key: &str, display_name: &str) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            kind: ParamKind::Input,
            required: false,
            default: None,
            options: Vec::new(),
        }
    }

    /// A single-choice field with the given options.
    pub fn radio(key: &str, display_name: &str, options: Vec<ParamOption>) -> Self {
        Self {
            kind: ParamKind::Radio,
            options,
            ..Self::input(key, display_name)
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_radio_param_serializes_camel_case() {
        let param = PluginParam::radio(
            NAME_MSG_TYPE,
            MSG_TYPE,
            vec![ParamOption::new("text", "text")],
        )
        .with_default("text");

        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(
            value,
            json!({
                "key": "MsgType",
                "displayName": "$t('msgType')",
                "kind": "radio",
                "required": false,
                "default": "text",
                "options": [{ "label": "text", "value": "text", "disabled": false }]
            })
        );
    }

    #[test]
    fn test_input_param_omits_empty_fields() {
        let param = PluginParam::input(NAME_WEB_HOOK, WEB_HOOK).required(true);
        let value = serde_json::to_value(&param).unwrap();
        assert!(value.get("default").is_none());
        assert!(value.get("options").is_none());
        assert_eq!(value["required"], true);
    }
}
