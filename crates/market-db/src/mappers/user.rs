//! Conversions between database models and domain entities

use market_core::{DomainError, Role, User, UserId};

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        // The role column carries a CHECK constraint, so a parse failure
        // means the row predates the current schema.
        let role = Role::parse(&model.role).map_err(|_| {
            DomainError::InternalError(format!("unknown role '{}' in users row", model.role))
        })?;

        Ok(User {
            id: UserId::from_uuid(model.id),
            name: model.name,
            email: model.email,
            role,
            phone: model.phone,
            description: model.description,
            store_name: model.store_name,
            email_verified_at: model.email_verified_at,
            email_verification_token: model.email_verification_token,
            token_issued_at: model.token_issued_at,
            store_verified_at: model.store_verified_at,
            last_login_at: model.last_login_at,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
