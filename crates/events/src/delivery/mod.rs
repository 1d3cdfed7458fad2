//! Outbound delivery channels: SMTP email for notifications and webhooks
//! for content events.

pub mod email;
pub mod webhook;
