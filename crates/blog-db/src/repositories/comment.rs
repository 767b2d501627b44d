//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use blog_core::traits::{CommentRepository, RepoResult};
use blog_core::{Comment, DomainError, Id, ListWindow, NewComment};

use crate::models::CommentModel;

use super::error::{comment_not_found, map_db_error, map_foreign_key_constraint};

/// Postgres default name of the `comments.user_id` foreign key
const USER_FOREIGN_KEY: &str = "comments_user_id_fkey";

/// Which parent row was missing when inserting `comment` failed
fn missing_parent(constraint: Option<&str>, comment: &NewComment) -> DomainError {
    match constraint {
        Some(USER_FOREIGN_KEY) => DomainError::UserNotFound(comment.user_id),
        _ => DomainError::PostNotFound(comment.post_id),
    }
}

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, user_id, text, likes, number_of_likes, created_at, updated_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment), fields(post_id = %comment.post_id, user_id = %comment.user_id))]
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            INSERT INTO comments (post_id, user_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, text, likes, number_of_likes, created_at, updated_at
            ",
        )
        .bind(comment.post_id.into_inner())
        .bind(comment.user_id.into_inner())
        .bind(&comment.text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_constraint(e, |constraint| missing_parent(constraint, comment))
        })?;

        Ok(Comment::from(result))
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: Id) -> RepoResult<Vec<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, user_id, text, likes, number_of_likes, created_at, updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn toggle_like(&self, id: Id, user_id: Id) -> RepoResult<Comment> {
        // Membership test, array change and counter run against the same row
        // version under the row lock, so concurrent toggles serialize.
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            UPDATE comments
            SET likes = CASE
                    WHEN $2 = ANY(likes) THEN array_remove(likes, $2)
                    ELSE array_append(likes, $2)
                END,
                number_of_likes = CASE
                    WHEN $2 = ANY(likes) THEN cardinality(array_remove(likes, $2))
                    ELSE cardinality(likes) + 1
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, post_id, user_id, text, likes, number_of_likes, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Comment::from).ok_or_else(|| comment_not_found(id))
    }

    #[instrument(skip(self, text))]
    async fn update_text(&self, id: Id, text: &str) -> RepoResult<Comment> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            UPDATE comments
            SET text = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, post_id, user_id, text, likes, number_of_likes, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Comment::from).ok_or_else(|| comment_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, window: &ListWindow) -> RepoResult<Vec<Comment>> {
        let sql = format!(
            r"
            SELECT id, post_id, user_id, text, likes, number_of_likes, created_at, updated_at
            FROM comments
            ORDER BY created_at {dir}, id {dir}
            OFFSET $1 LIMIT $2
            ",
            dir = window.direction.as_sql()
        );

        let result = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(window.start_index)
            .bind(window.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
