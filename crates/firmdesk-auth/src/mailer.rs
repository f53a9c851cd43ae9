//! Outbound mail.

use std::sync::{Arc, Mutex};

use lettre::message::Mailbox;
use lettre::transport::smtp::SmtpTransport;
use lettre::{Message, Transport};

use crate::error::AuthError;

/// Abstraction over the outbound mail channel so the auth service can
/// be tested without an SMTP server.
pub trait Mailer: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError>;
}

impl<M: Mailer + ?Sized> Mailer for Arc<M> {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError> {
        (**self).send(to, subject, body)
    }
}

/// SMTP-backed mailer.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(host: &str, port: u16, from: &str) -> Result<Self, AuthError> {
        let from = from
            .parse::<Mailbox>()
            .map_err(|e| AuthError::Mail(format!("invalid sender address: {e}")))?;
        let transport = SmtpTransport::builder_dangerous(host).port(port).build();
        Ok(Self { transport, from })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| AuthError::Mail(format!("invalid recipient address: {e}")))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| AuthError::Mail(format!("failed to build message: {e}")))?;
        self.transport
            .send(&message)
            .map_err(|e| AuthError::Mail(format!("smtp send failed: {e}")))?;
        Ok(())
    }
}

/// A sent message captured by [`RecordingMailer`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// In-memory mailer that records messages instead of sending them.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMail> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthError> {
        let mail = SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };
        match self.sent.lock() {
            Ok(mut guard) => guard.push(mail),
            Err(poisoned) => poisoned.into_inner().push(mail),
        }
        Ok(())
    }
}
