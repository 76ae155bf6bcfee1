use anyhow::Context;
use lettre::{transport::smtp::authentication::Credentials, Message, SmtpTransport, Transport};
use log::debug;

use super::MailRelay;
use crate::config::MailSettings;

/// Delivers through the configured relay using STARTTLS and login credentials
pub struct SmtpRelay {
    settings: MailSettings,
}

impl SmtpRelay {
    pub fn new(settings: &MailSettings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    fn connect(&self) -> anyhow::Result<SmtpTransport> {
        let settings = &self.settings;
        let host = settings.smtp_server.as_deref().context("SMTP_SERVER is not set")?;
        let port = settings.smtp_port.context("SMTP_PORT is not set")?;
        let user = settings.smtp_user.clone().context("SMTP_USER is not set")?;
        let pass = settings.smtp_pass.clone().context("SMTP_PASS is not set")?;

        debug!("Connecting to {host}:{port} as {user}");
        let transport = SmtpTransport::starttls_relay(host)
            .with_context(|| format!("Failed to create SMTP transport for {host}"))?
            .port(port)
            .credentials(Credentials::new(user, pass))
            .build();
        Ok(transport)
    }
}

impl MailRelay for SmtpRelay {
    fn relay(&self, message: &Message) -> anyhow::Result<()> {
        let transport = self.connect()?;
        transport
            .send(message)
            .context("Failed to send email via SMTP")?;
        Ok(())
    }
}
