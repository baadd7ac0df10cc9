//! Ports - traits implemented by the infrastructure layers

mod notifier;
mod repositories;

pub use notifier::{VerificationEmail, VerificationNotifier};
pub use repositories::{RepoResult, UserFilter, UserPage, UserRepository};
