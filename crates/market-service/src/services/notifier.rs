//! Verification email delivery
//!
//! The default sender for local development logs the rendered message
//! instead of delivering real email. Production deployments swap in a
//! transport-backed implementation of the same trait.

use std::sync::Arc;

use async_trait::async_trait;
use market_core::entities::User;
use market_core::traits::{VerificationEmail, VerificationNotifier};
use market_core::DomainError;
use tracing::{info, warn};

use super::context::ServiceContext;

/// Hand a rendered verification email to the notifier without blocking
/// the caller. Delivery failure never unwinds the persisted account;
/// the resend endpoint is the recovery path.
pub(crate) fn dispatch_verification(ctx: &ServiceContext, user: &User, token: &str) {
    let notifier = Arc::clone(ctx.notifier());
    let email = VerificationEmail::new(
        user.email.clone(),
        user.name.clone(),
        ctx.verification().verification_url(token, &user.email),
    );
    tokio::spawn(async move {
        if let Err(e) = notifier.send_verification(&email).await {
            warn!(error = %e, recipient = %email.recipient, "Verification email delivery failed");
        }
    });
}

/// Local dev notifier that logs the verification link instead of sending it
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VerificationNotifier for LogNotifier {
    async fn send_verification(&self, email: &VerificationEmail) -> Result<(), DomainError> {
        info!(
            recipient = %email.recipient,
            recipient_name = %email.recipient_name,
            verification_url = %email.verification_url,
            "verification email send stub"
        );
        Ok(())
    }
}
