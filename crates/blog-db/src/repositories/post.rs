//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use blog_core::traits::{PostFilter, PostRepository, RepoResult};
use blog_core::{Id, ListWindow, NewPost, Post, PostChanges};

use crate::models::PostModel;

use super::error::{
    escape_like, map_db_error, map_foreign_key_violation, post_not_found, user_not_found,
};

const POST_COLUMNS: &str =
    "id, author_id, title, slug, content, category, image, created_at, updated_at";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause for a post filter
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
    builder.push(" WHERE TRUE");

    if let Some(author_id) = filter.author_id {
        builder.push(" AND author_id = ").push_bind(author_id.into_inner());
    }
    if let Some(post_id) = filter.post_id {
        builder.push(" AND id = ").push_bind(post_id.into_inner());
    }
    if let Some(category) = &filter.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(slug) = &filter.slug {
        builder.push(" AND slug = ").push_bind(slug.clone());
    }
    if let Some(term) = &filter.search_term {
        let pattern = format!("%{}%", escape_like(term));
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR content ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, author_id, title, slug, content, category, image, created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self, post), fields(author_id = %post.author_id, slug = %post.slug))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            INSERT INTO posts (author_id, title, slug, content, category, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, author_id, title, slug, content, category, image, created_at, updated_at
            ",
        )
        .bind(post.author_id.into_inner())
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(&post.category)
        .bind(post.image.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || user_not_found(post.author_id)))?;

        Ok(Post::from(result))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Id, changes: &PostChanges) -> RepoResult<Post> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            UPDATE posts
            SET title      = COALESCE($2, title),
                slug       = COALESCE($3, slug),
                content    = COALESCE($4, content),
                category   = COALESCE($5, category),
                image      = COALESCE($6, image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, author_id, title, slug, content, category, image, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(changes.title.as_deref())
        .bind(changes.slug.as_deref())
        .bind(changes.content.as_deref())
        .bind(changes.category.as_deref())
        .bind(changes.image.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Post::from).ok_or_else(|| post_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, filter: &PostFilter, window: &ListWindow) -> RepoResult<Vec<Post>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder.push(POST_COLUMNS).push(" FROM posts");
        push_filter(&mut builder, filter);

        let dir = window.direction.as_sql();
        builder
            .push(" ORDER BY updated_at ")
            .push(dir)
            .push(", id ")
            .push(dir)
            .push(" OFFSET ")
            .push_bind(window.start_index)
            .push(" LIMIT ")
            .push_bind(window.limit);

        let result = builder
            .build_query_as::<PostModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
