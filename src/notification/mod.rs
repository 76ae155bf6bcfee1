mod email;
mod smtp;

use lettre::Message;

pub use email::{DeliveryOutcome, DigestEmail, Notifier};
pub use smtp::SmtpRelay;

/// Something able to hand a finished message over for delivery
pub trait MailRelay {
    fn relay(&self, message: &Message) -> anyhow::Result<()>;
}
