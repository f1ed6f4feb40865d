//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the `wecom-alert.toml` file and environment variables.

use clap::{Parser, Subcommand};
use figment::{
    value::{Dict, Map, Tag, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Sends alerts to a WeCom group robot webhook.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The WeCom group robot webhook URL.
    #[arg(long, value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Message type: `text` or `markdown`.
    #[arg(long, value_name = "TYPE")]
    pub msg_type: Option<String>,

    /// Comma-delimited mobile numbers to mention.
    #[arg(long, value_name = "LIST")]
    pub at_mobiles: Option<String>,

    /// Comma-delimited user ids to mention.
    #[arg(long, value_name = "LIST")]
    pub at_user_ids: Option<String>,

    /// The logging level (e.g. `debug`).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send one alert and print the result as JSON.
    Send {
        /// Alert title.
        #[arg(long)]
        title: String,
        /// Alert content, plain text or JSON.
        #[arg(long)]
        content: String,
    },
    /// Print the channel's parameter descriptors as JSON.
    Params,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut wecom = Dict::new();

        if let Some(url) = &self.webhook_url {
            wecom.insert("webhook_url".into(), Value::from(url.clone()));
        }
        if let Some(msg_type) = &self.msg_type {
            wecom.insert("msg_type".into(), Value::from(msg_type.clone()));
        }
        if let Some(mobiles) = &self.at_mobiles {
            wecom.insert("at_mobiles".into(), Value::from(mobiles.clone()));
        }
        if let Some(user_ids) = &self.at_user_ids {
            wecom.insert("at_user_ids".into(), Value::from(user_ids.clone()));
        }

        let mut dict = Dict::new();
        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }
        if !wecom.is_empty() {
            dict.insert("wecom".into(), Value::Dict(Tag::Default, wecom));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
