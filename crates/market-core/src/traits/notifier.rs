//! Notifier trait (port) - outbound verification email delivery
//!
//! The core renders the message content; delivery transport lives behind
//! this trait. Delivery failures are reported but must never unwind the
//! persistence that preceded them.

use async_trait::async_trait;

use crate::error::DomainError;

/// A rendered verification email, ready for a transport to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub recipient: String,
    pub recipient_name: String,
    pub verification_url: String,
}

impl VerificationEmail {
    pub fn new(recipient: String, recipient_name: String, verification_url: String) -> Self {
        Self {
            recipient,
            recipient_name,
            verification_url,
        }
    }
}

#[async_trait]
pub trait VerificationNotifier: Send + Sync {
    /// Deliver a verification email to the recipient
    async fn send_verification(&self, email: &VerificationEmail) -> Result<(), DomainError>;
}
