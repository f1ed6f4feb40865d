//! Registry entry point of the WeCom channel plugin.

use crate::channel::WeComAlertChannel;
use crate::config::WeComConfig;
use crate::core::{AlertChannel, AlertChannelFactory};
use crate::message::MessageType;
use crate::params::{
    ParamOption, PluginParam, AT_MOBILES, AT_USER_IDS, MSG_TYPE, NAME_AT_MOBILES,
    NAME_AT_USER_IDS, NAME_MSG_TYPE, NAME_WEB_HOOK, WEB_HOOK,
};
use crate::sender::WeComSender;

/// The name the plugin registers under.
pub const PLUGIN_NAME: &str = "WeCom";

#[derive(Debug, Default, Clone)]
pub struct WeComAlertChannelFactory;

impl WeComAlertChannelFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates a sender bound to an already validated config.
    pub fn create_sender(&self, config: WeComConfig) -> WeComSender {
        WeComSender::new(config)
    }
}

impl AlertChannelFactory for WeComAlertChannelFactory {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn params(&self) -> Vec<PluginParam> {
        let markdown = MessageType::Markdown.as_str();
        let text = MessageType::Text.as_str();

        vec![
            PluginParam::input(NAME_WEB_HOOK, WEB_HOOK).required(true),
            PluginParam::radio(
                NAME_MSG_TYPE,
                MSG_TYPE,
                vec![
                    ParamOption::new(markdown, markdown),
                    ParamOption::new(text, text),
                ],
            )
            .with_default(markdown),
            PluginParam::input(NAME_AT_MOBILES, AT_MOBILES),
            PluginParam::input(NAME_AT_USER_IDS, AT_USER_IDS),
        ]
    }

    fn create(&self) -> Box<dyn AlertChannel> {
        Box::new(WeComAlertChannel::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamKind;

    #[test]
    fn test_factory_name() {
        assert_eq!(WeComAlertChannelFactory::new().name(), "WeCom");
    }

    #[test]
    fn test_factory_params() {
        let params = WeComAlertChannelFactory::new().params();
        assert_eq!(params.len(), 4);

        let keys: Vec<&str> = params.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["WebHook", "MsgType", "AtMobiles", "AtUserIds"]);

        assert!(params[0].required);
        assert!(params[1..].iter().all(|p| !p.required));

        let msg_type = &params[1];
        assert_eq!(msg_type.kind, ParamKind::Radio);
        assert_eq!(msg_type.default.as_deref(), Some("markdown"));
        let options: Vec<&str> = msg_type.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(options, vec!["markdown", "text"]);

        assert!(serde_json::to_string(&params).is_ok());
    }

    #[test]
    fn test_create_sender_keeps_config() {
        let config = WeComConfig::new("http://localhost/hook").with_msg_type(MessageType::Markdown);
        let sender = WeComAlertChannelFactory::new().create_sender(config.clone());
        assert_eq!(sender.config(), &config);
    }
}
