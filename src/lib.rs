//! WeCom Alert - a WeCom group robot webhook alert channel
//!
//! This library formats alerts into WeCom robot messages, posts them to a
//! webhook and reports the outcome as a uniform `SendResult`.

pub mod channel;
pub mod cli;
pub mod config;
pub mod core;
pub mod factory;
pub mod message;
pub mod params;
pub mod sender;

// Re-export core types for convenience
pub use crate::core::*;
pub use channel::WeComAlertChannel;
pub use config::WeComConfig;
pub use factory::WeComAlertChannelFactory;
pub use message::MessageType;
pub use sender::WeComSender;
