//! Notification email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport. If `SMTP_HOST`
//! is not set, [`EmailConfig::from_env`] returns `None` and notifications are
//! only written to the inbox.

use faircms_core::notification::NotificationMessage;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@fair.example.com";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Prefix for absolute links in the mail body, e.g. `https://cms.fair.example.com`.
    pub admin_base_url: Option<String>,
}

impl EmailConfig {
    /// Load from the environment. `None` when `SMTP_HOST` is unset.
    ///
    /// | Variable         | Default                     |
    /// |------------------|-----------------------------|
    /// | `SMTP_HOST`      | (disables email when unset) |
    /// | `SMTP_PORT`      | `587`                       |
    /// | `SMTP_FROM`      | `noreply@fair.example.com`  |
    /// | `SMTP_USER`      | none                        |
    /// | `SMTP_PASSWORD`  | none                        |
    /// | `ADMIN_BASE_URL` | none (links stay relative)  |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok().filter(|h| !h.trim().is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            admin_base_url: std::env::var("ADMIN_BASE_URL").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Plain-text body: the notification text followed by its link.
    pub fn render_body(&self, message: &NotificationMessage) -> String {
        let link = match &self.config.admin_base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), message.link_url),
            None => message.link_url.clone(),
        };
        format!("{}\n\n{link}", message.body)
    }

    pub async fn deliver(&self, message: &NotificationMessage) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(message.recipient_email.parse()?)
            .subject(format!("[FAQ CMS] {}", message.title))
            .header(ContentType::TEXT_PLAIN)
            .body(self.render_body(message))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(email).await?;

        tracing::info!(
            to = %message.recipient_email,
            notification_type = %message.notification_type,
            "Notification email sent"
        );
        Ok(())
    }
}
