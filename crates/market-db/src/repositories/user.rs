//! User repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use market_core::{RepoResult, User, UserFilter, UserId, UserPage, UserRepository};
use sqlx::PgPool;
use tracing::instrument;

use crate::models::UserModel;
use crate::repositories::error::{map_db_error, map_user_unique_violation, user_not_found};

/// PostgreSQL-backed user repository
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, password_hash, role, phone, description, store_name,
                   email_verified_at, email_verification_token, token_issued_at,
                   store_verified_at, last_login_at, is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, password_hash, role, phone, description, store_name,
                   email_verified_at, email_verification_token, token_issued_at,
                   store_verified_at, last_login_at, is_active, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let exists: bool =
            sqlx::query_scalar(r"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.to_lowercase())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, user, password_hash))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (
                id, name, email, password_hash, role, phone, description, store_name,
                email_verified_at, email_verification_token, token_issued_at,
                store_verified_at, last_login_at, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.role.as_str())
        .bind(user.phone.as_deref())
        .bind(user.description.as_deref())
        .bind(user.store_name.as_deref())
        .bind(user.email_verified_at)
        .bind(user.email_verification_token.as_deref())
        .bind(user.token_issued_at)
        .bind(user.store_verified_at)
        .bind(user.last_login_at)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_user_unique_violation)?;

        Ok(())
    }

    #[instrument(skip(self, user))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        // Verification and login stamps go through their dedicated writes,
        // so a concurrent profile save cannot clobber them.
        let result = sqlx::query(
            r"
            UPDATE users
            SET name = $2, email = $3, role = $4, phone = $5, description = $6,
                store_name = $7, is_active = $8, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(user.phone.as_deref())
        .bind(user.description.as_deref())
        .bind(user.store_name.as_deref())
        .bind(user.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_user_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> RepoResult<()> {
        let result = sqlx::query(r"DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let hash: Option<String> =
            sqlx::query_scalar(r"SELECT password_hash FROM users WHERE id = $1")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(hash)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
        let result =
            sqlx::query(r"UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.into_inner())
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> RepoResult<()> {
        let result =
            sqlx::query(r"UPDATE users SET last_login_at = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.into_inner())
                .bind(at)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn rotate_verification_token(
        &self,
        id: UserId,
        token: &str,
        issued_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET email_verification_token = $2, token_issued_at = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(token)
        .bind(issued_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn consume_verification_token(
        &self,
        id: UserId,
        token: &str,
        verified_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        // The guard clauses make this a no-op when the token was already
        // rotated or consumed by a concurrent request.
        let result = sqlx::query(
            r"
            UPDATE users
            SET email_verified_at = $3, email_verification_token = NULL,
                token_issued_at = NULL, updated_at = NOW()
            WHERE id = $1
              AND email_verification_token = $2
              AND email_verified_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(token)
        .bind(verified_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &UserFilter) -> RepoResult<UserPage> {
        let role = filter.role.map(|r| r.as_str());

        let total: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*)
            FROM users
            WHERE ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%'
                   OR COALESCE(phone, '') ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR role = $2)
              AND ($3::boolean IS NULL OR is_active = $3)
            ",
        )
        .bind(filter.search.as_deref())
        .bind(role)
        .bind(filter.active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let models = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, password_hash, role, phone, description, store_name,
                   email_verified_at, email_verification_token, token_issued_at,
                   store_verified_at, last_login_at, is_active, created_at, updated_at
            FROM users
            WHERE ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%'
                   OR COALESCE(phone, '') ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR role = $2)
              AND ($3::boolean IS NULL OR is_active = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            ",
        )
        .bind(filter.search.as_deref())
        .bind(role)
        .bind(filter.active)
        .bind(filter.per_page.max(1))
        .bind(filter.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let users = models
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UserPage {
            users,
            total,
            page: filter.page.max(1),
            per_page: filter.per_page.max(1),
        })
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: UserId, active: bool) -> RepoResult<()> {
        let result =
            sqlx::query(r"UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.into_inner())
                .bind(active)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}
