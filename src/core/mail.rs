//! Report delivery over email
//!
//! The grading core only sees the [`EmailSender`] trait. [`SmtpSender`] is the
//! production implementation: a one-shot STARTTLS connection that
//! authenticates, sends a plaintext message and closes.

use crate::config::SmtpConfig;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::env;
use std::fmt;

/// A fully rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plaintext body
    pub body: String,
}

/// Errors raised while delivering a message
#[derive(thiserror::Error, Debug)]
pub enum MailError {
    /// The password environment variable is unset or empty
    #[error("No SMTP password found; set the `{0}` environment variable")]
    MissingCredential(String),
    /// A sender or recipient address could not be parsed
    #[error("Invalid email address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),
    /// The message could not be assembled
    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),
    /// Connecting, authenticating or sending failed
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Something that can deliver an [`OutgoingEmail`]
pub trait EmailSender {
    /// Deliver a single message
    ///
    /// # Errors
    /// Returns an error if the message cannot be delivered
    fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Result of a delivery attempt, as reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The transport accepted the message
    Sent,
    /// The transport failed; holds the error message
    Failed(String),
}

impl DeliveryStatus {
    /// Whether the message was accepted
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => write!(f, "sent"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// SMTP relay sender (STARTTLS, username/password auth)
pub struct SmtpSender {
    host: String,
    port: u16,
    username: String,
    password: String,
}

impl fmt::Debug for SmtpSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSender")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl SmtpSender {
    /// Create a sender with explicit credentials
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create a sender from configuration, reading the password from the
    /// environment variable named by `smtp.password_env`
    ///
    /// # Arguments
    /// * `config` - SMTP settings
    /// * `username` - Account to authenticate as (usually the sender address)
    ///
    /// # Errors
    /// Returns [`MailError::MissingCredential`] if the variable is unset or empty
    pub fn from_config(config: &SmtpConfig, username: &str) -> Result<Self, MailError> {
        let password = env::var(&config.password_env)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| MailError::MissingCredential(config.password_env.clone()))?;

        Ok(Self::new(&config.host, config.port, username, password))
    }

    /// Relay host
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Relay port
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

/// Build the MIME message for an outgoing email
///
/// # Errors
/// Returns an error if an address is malformed or the message cannot be built
pub fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let from: Mailbox = email.from.parse()?;
    let to: Mailbox = email.to.parse()?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())?;

    Ok(message)
}

impl EmailSender for SmtpSender {
    fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email)?;

        let transport = SmtpTransport::starttls_relay(&self.host)?
            .port(self.port)
            .credentials(Credentials::new(
                self.username.clone(),
                self.password.clone(),
            ))
            .build();

        transport.send(&message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_email() -> OutgoingEmail {
        OutgoingEmail {
            from: "teacher@example.com".to_string(),
            to: "parent@example.com".to_string(),
            subject: "Student Report for Sample".to_string(),
            body: "Report for Sample".to_string(),
        }
    }

    #[test]
    fn test_build_message_valid() {
        assert!(build_message(&sample_email()).is_ok());
    }

    #[test]
    fn test_build_message_rejects_bad_address() {
        let email = OutgoingEmail {
            to: "not an address".to_string(),
            ..sample_email()
        };
        assert!(matches!(
            build_message(&email),
            Err(MailError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_from_config_requires_password() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            sender: String::new(),
            password_env: "GRADE_REPORT_TEST_UNSET_PASSWORD".to_string(),
        };

        let err = SmtpSender::from_config(&config, "teacher@example.com").unwrap_err();
        assert!(matches!(err, MailError::MissingCredential(ref var) if var == "GRADE_REPORT_TEST_UNSET_PASSWORD"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let sender = SmtpSender::new("smtp.example.com", 587, "user", "hunter2");
        let debug = format!("{sender:?}");
        assert!(!debug.contains("hunter2"));
        assert_eq!(sender.host(), "smtp.example.com");
        assert_eq!(sender.port(), 587);
    }

    #[test]
    fn test_delivery_status_display() {
        assert!(DeliveryStatus::Sent.is_sent());
        let failed = DeliveryStatus::Failed("timeout".to_string());
        assert!(!failed.is_sent());
        assert_eq!(failed.to_string(), "failed: timeout");
    }
}
