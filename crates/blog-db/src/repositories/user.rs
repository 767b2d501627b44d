//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use blog_core::traits::{RepoResult, UserRepository};
use blog_core::{DomainError, Id, ListWindow, NewUser, User, UserChanges};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, password_hash, profile_picture, is_admin,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, password_hash, profile_picture, is_admin,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_many(&self, ids: &[Id]) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, password_hash, profile_picture, is_admin,
                   created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            ",
        )
        .bind(raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (username, email, password_hash, profile_picture)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, profile_picture, is_admin,
                      created_at, updated_at
            ",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.profile_picture_or_default())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(User::from(result))
    }

    #[instrument(skip(self, changes), fields(fields_changed = !changes.is_empty()))]
    async fn update(&self, id: Id, changes: &UserChanges) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET username        = COALESCE($2, username),
                email           = COALESCE($3, email),
                profile_picture = COALESCE($4, profile_picture),
                password_hash   = COALESCE($5, password_hash),
                updated_at      = NOW()
            WHERE id = $1
            RETURNING id, username, email, password_hash, profile_picture, is_admin,
                      created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(changes.username.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.profile_picture.as_deref())
        .bind(changes.password_hash.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        result.map(User::from).ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM users WHERE id = $1
            ",
        )
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
    async fn get_password_hash(&self, id: Id) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn list(&self, window: &ListWindow) -> RepoResult<Vec<User>> {
        // Direction comes from a closed enum, never from user text
        let sql = format!(
            r"
            SELECT id, username, email, password_hash, profile_picture, is_admin,
                   created_at, updated_at
            FROM users
            ORDER BY created_at {dir}, id {dir}
            OFFSET $1 LIMIT $2
            ",
            dir = window.direction.as_sql()
        );

        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(window.start_index)
            .bind(window.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
