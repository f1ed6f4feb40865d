//! WeCom Alert - sends one alert to a WeCom group robot webhook.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wecom_alert::{
    cli::{Cli, Command},
    config::Config,
    sender::redact_url,
    AlertChannelFactory, WeComAlertChannelFactory,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        tracing_subscriber::fmt().init();
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let factory = WeComAlertChannelFactory::new();

    match cli.command {
        Command::Params => {
            println!("{}", serde_json::to_string_pretty(&factory.params())?);
        }
        Command::Send { title, content } => {
            let wecom_config = config.wecom.to_wecom_config()?;
            info!("-------------------- Configuration --------------------");
            info!("Webhook URL: {}", redact_url(&wecom_config.webhook_url));
            info!("Message Type: {}", wecom_config.msg_type);
            info!("Mentioned Mobiles: {:?}", wecom_config.at_mobiles);
            info!("Mentioned User Ids: {:?}", wecom_config.at_user_ids);
            info!("Timeout: {}s", config.wecom.timeout_seconds);
            info!("-------------------------------------------------------");

            let sender = factory
                .create_sender(wecom_config)
                .with_timeout(config.wecom.timeout());
            let result = sender.send(&title, &content).await;
            println!("{}", serde_json::to_string_pretty(&result)?);

            if !result.succeeded {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
