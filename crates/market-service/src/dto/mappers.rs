//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Password hashes never appear on entities, so no response can leak one.

use market_core::entities::User;

use super::responses::UserResponse;

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            phone: user.phone.clone(),
            store_name: user.store_name.clone(),
            description: user.description.clone(),
            email_verified: user.is_verified(),
            store_verified: user.store_verified_at.is_some(),
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}
