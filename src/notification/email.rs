use anyhow::Context;
use lettre::{
    message::{
        header::{ContentTransferEncoding, ContentType},
        Mailbox, MultiPart, SinglePart,
    },
    Message,
};
use log::{error, info, warn};

use super::MailRelay;
use crate::{
    config::MailSettings,
    digest::{digest_title, DigestContent},
    utils::make_single_line,
};

#[derive(Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent,
    Failed { msg: String },
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Subject and plain text body of the daily mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEmail {
    pub subject: String,
    pub body: String,
}

pub struct Notifier<M> {
    relay: M,
    from: Option<String>,
    to: Option<String>,
}

impl<M: MailRelay> Notifier<M> {
    pub fn new(relay: M, settings: &MailSettings) -> Self {
        Self {
            relay,
            from: settings.from.clone(),
            to: settings.to.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn relay(&self) -> &M {
        &self.relay
    }

    pub fn compose(&self, digest: &DigestContent) -> DigestEmail {
        let date = digest.date.format("%F");
        DigestEmail {
            subject: digest_title(digest.date),
            body: format!(
                "Hej!

Här kommer dagens IT-nyhet/tekniska läropunkt:

{}

---
Skickat automatiskt av Daily IT News Bot
Datum: {date}
",
                digest.text
            ),
        }
    }

    /// Sends the digest to the configured recipient. Failures are logged and returned, never raised
    pub fn notify(&self, digest: &DigestContent) -> DeliveryOutcome {
        info!("Sending email");
        if digest.is_fallback {
            warn!("Emailing fallback text in place of generated content");
        }
        let result = self
            .build_message(&self.compose(digest))
            .and_then(|message| self.relay.relay(&message));
        match result {
            Ok(()) => {
                info!("Email sent");
                DeliveryOutcome::Sent
            }
            Err(e) => {
                let msg = format!("{e:#}");
                error!("Failed to send email: {}", make_single_line(&msg));
                DeliveryOutcome::Failed { msg }
            }
        }
    }

    fn build_message(&self, email: &DigestEmail) -> anyhow::Result<Message> {
        let from: Mailbox = self
            .from
            .as_deref()
            .context("EMAIL_FROM is not set")?
            .parse()
            .context("Invalid from email address")?;
        let to: Mailbox = self
            .to
            .as_deref()
            .context("EMAIL_TO is not set")?
            .parse()
            .context("Invalid to email address")?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str())
            .multipart(
                MultiPart::mixed().singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .header(ContentTransferEncoding::Base64)
                        .body(email.body.clone()),
                ),
            )
            .context("Failed to build email message")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::notification::testing::{text_body, RecordingRelay};

    fn settings() -> MailSettings {
        MailSettings {
            from: Some("Digest Bot <bot@example.com>".to_string()),
            to: Some("dev@example.com".to_string()),
            ..Default::default()
        }
    }

    fn digest(text: &str) -> DigestContent {
        DigestContent::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), text.to_string())
    }

    #[test]
    fn compose_wraps_content_verbatim() {
        let notifier = Notifier::new(RecordingRelay::default(), &settings());
        let content = "**Ämne:** Ownership\n\n- borrow\n- move";

        let email = notifier.compose(&digest(content));

        assert_eq!(email.subject, "Dagens IT-nyhet - 2024-01-01");
        assert!(email.body.starts_with("Hej!\n\n"));
        assert!(email.body.contains(content));
        assert!(email.body.ends_with("Datum: 2024-01-01\n"));
    }

    #[test]
    fn sends_one_message() {
        let notifier = Notifier::new(RecordingRelay::default(), &settings());
        let content = "**Ämne:** Ownership\n\n- borrow\n- move";

        let outcome = notifier.notify(&digest(content));

        assert_eq!(outcome, DeliveryOutcome::Sent);
        let sent = notifier.relay.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Subject: Dagens IT-nyhet - 2024-01-01"));
        assert!(sent[0].contains("To: dev@example.com"));
        assert!(sent[0].contains("multipart/mixed"));
        let body = text_body(&sent[0]);
        assert_eq!(body, notifier.compose(&digest(content)).body);
        assert!(body.contains(content));
    }

    #[test]
    fn relay_failure_is_returned() {
        let relay = RecordingRelay {
            fail_with: Some("connection refused"),
            ..Default::default()
        };
        let notifier = Notifier::new(relay, &settings());

        let outcome = notifier.notify(&digest("hello"));

        assert_eq!(
            outcome,
            DeliveryOutcome::Failed {
                msg: "connection refused".to_string()
            }
        );
    }

    #[test]
    fn missing_recipient_is_a_failure() {
        let settings = MailSettings {
            to: None,
            ..settings()
        };
        let notifier = Notifier::new(RecordingRelay::default(), &settings);

        let outcome = notifier.notify(&digest("hello"));

        assert!(matches!(outcome, DeliveryOutcome::Failed { msg } if msg.contains("EMAIL_TO")));
        assert!(notifier.relay.sent.borrow().is_empty());
    }

    #[test]
    fn invalid_sender_is_a_failure() {
        let settings = MailSettings {
            from: Some("not an address".to_string()),
            ..settings()
        };
        let notifier = Notifier::new(RecordingRelay::default(), &settings);

        assert!(!notifier.notify(&digest("hello")).is_sent());
    }
}
