//! Post service
//!
//! Admin authoring plus the public, filterable listing.

use blog_core::entities::{NewPost, PostChanges};
use blog_core::{last_month_cutoff, Id, Identity, ListPage, ListWindow, PostFilter};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreatePostRequest, PostResponse, PostsPage, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::guard::{authorize, Action};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a post authored by the caller
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        identity: &Identity,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;
        authorize(identity, Action::CreatePost)?;

        let draft = NewPost::new(identity.user_id, request.title, request.content)
            .with_category(request.category)
            .with_image(request.image);

        let post = self.ctx.post_repo().create(&draft).await?;

        info!(post_id = %post.id, slug = %post.slug, "Post created");

        Ok(PostResponse::from(post))
    }

    /// Filtered page of posts with the dashboard counters
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        filter: PostFilter,
        window: ListWindow,
    ) -> ServiceResult<PostsPage> {
        let repo = self.ctx.post_repo();
        let (items, total, last_month) = tokio::try_join!(
            repo.find(&filter, &window),
            repo.count(),
            repo.count_created_since(last_month_cutoff(Utc::now())),
        )?;

        Ok(PostsPage::from(ListPage {
            items,
            total,
            last_month,
        }))
    }

    /// Replace the fields present in the request
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        identity: &Identity,
        post_id: Id,
        user_id: Id,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        authorize(identity, Action::UpdatePost { user_id })?;

        let mut changes = PostChanges {
            content: request.content.filter(|c| !c.is_empty()),
            category: request.category.filter(|c| !c.trim().is_empty()),
            image: request.image.filter(|i| !i.trim().is_empty()),
            ..Default::default()
        };
        if let Some(title) = request.title.filter(|t| !t.is_empty()) {
            changes.set_title(title);
        }

        let post = self.ctx.post_repo().update(post_id, &changes).await?;

        info!(post_id = %post_id, "Post updated");

        Ok(PostResponse::from(post))
    }

    /// Delete a post with its comments
    #[instrument(skip(self))]
    pub async fn delete_post(
        &self,
        identity: &Identity,
        post_id: Id,
        user_id: Id,
    ) -> ServiceResult<()> {
        authorize(identity, Action::DeletePost { user_id })?;

        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, "Post deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestBackend;
    use blog_core::SortDirection;

    fn create_request(title: &str, content: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            content: content.to_string(),
            category: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_post_requires_admin() {
        let backend = TestBackend::new();
        let ctx = backend.context();

        let err = PostService::new(&ctx)
            .create_post(
                &Identity::new(Id::new(1), false),
                create_request("Hello", "World"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 403);
        assert_eq!(err.to_string(), "You are not allowed to create a post");
    }

    #[tokio::test]
    async fn test_create_post_derives_slug_and_defaults() {
        let backend = TestBackend::new();
        let admin = backend.seed_admin("admin123", "admin@x.com", "secret1");
        let ctx = backend.context();

        let post = PostService::new(&ctx)
            .create_post(&admin.identity(), create_request("Hello  Rust World!", "body"))
            .await
            .unwrap();

        assert_eq!(post.slug, "hello-rust-world");
        assert_eq!(post.category, "general");
        assert_eq!(post.user_id, admin.id);
        assert_eq!(post.image, None);
    }

    #[tokio::test]
    async fn test_create_post_missing_content() {
        let backend = TestBackend::new();
        let admin = backend.seed_admin("admin123", "admin@x.com", "secret1");
        let ctx = backend.context();

        let err = PostService::new(&ctx)
            .create_post(&admin.identity(), create_request("Title", ""))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Please provide all required fields");
    }

    #[tokio::test]
    async fn test_list_posts_filters_and_totals() {
        let backend = TestBackend::new();
        let admin = backend.seed_admin("admin123", "admin@x.com", "secret1");
        let ctx = backend.context();
        let service = PostService::new(&ctx);

        for (title, category) in [("Rust Ownership", "rust"), ("Go Channels", "go"), ("Rust Traits", "rust")] {
            let mut request = create_request(title, "text");
            request.category = Some(category.to_string());
            service.create_post(&admin.identity(), request).await.unwrap();
        }

        let filter = PostFilter {
            category: Some("rust".to_string()),
            ..Default::default()
        };
        let page = service
            .list_posts(filter, ListWindow::new(0, 1, SortDirection::Desc))
            .await
            .unwrap();
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.total_posts, 3);
        assert_eq!(page.last_month_posts, 3);

        let filter = PostFilter {
            search_term: Some("CHANNELS".to_string()),
            ..Default::default()
        };
        let page = service.list_posts(filter, ListWindow::default()).await.unwrap();
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].slug, "go-channels");
    }

    #[tokio::test]
    async fn test_update_post_rederives_slug() {
        let backend = TestBackend::new();
        let admin = backend.seed_admin("admin123", "admin@x.com", "secret1");
        let ctx = backend.context();
        let service = PostService::new(&ctx);

        let post = service
            .create_post(&admin.identity(), create_request("Old Title", "text"))
            .await
            .unwrap();

        let updated = service
            .update_post(
                &admin.identity(),
                post.id,
                admin.id,
                UpdatePostRequest {
                    title: Some("New Title".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "New Title");
        assert_eq!(updated.slug, "new-title");
        assert_eq!(updated.content, "text");
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let backend = TestBackend::new();
        let admin = backend.seed_admin("admin123", "admin@x.com", "secret1");
        let ctx = backend.context();

        let err = PostService::new(&ctx)
            .update_post(
                &admin.identity(),
                Id::new(404),
                admin.id,
                UpdatePostRequest::default(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Post not found");
    }

    #[tokio::test]
    async fn test_delete_post_with_mismatched_path_user() {
        let backend = TestBackend::new();
        let admin = backend.seed_admin("admin123", "admin@x.com", "secret1");
        let ctx = backend.context();
        let service = PostService::new(&ctx);

        let post = service
            .create_post(&admin.identity(), create_request("Doomed", "text"))
            .await
            .unwrap();

        let err = service
            .delete_post(&admin.identity(), post.id, Id::new(12345))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.to_string(), "You are not allowed to delete this post");

        service
            .delete_post(&admin.identity(), post.id, admin.id)
            .await
            .unwrap();
        assert_eq!(backend.post_count(), 0);
    }

    #[tokio::test]
    async fn test_update_post_ignores_blank_category_and_image() {
        let backend = TestBackend::new();
        let admin = backend.seed_admin("admin123", "admin@x.com", "secret1");
        let ctx = backend.context();
        let service = PostService::new(&ctx);

        let mut request = create_request("Pictured", "text");
        request.category = Some("rust".to_string());
        request.image = Some("https://img.example/cover.png".to_string());
        let post = service.create_post(&admin.identity(), request).await.unwrap();

        let updated = service
            .update_post(
                &admin.identity(),
                post.id,
                admin.id,
                UpdatePostRequest {
                    category: Some(String::new()),
                    image: Some("  ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.category, "rust");
        assert_eq!(
            updated.image.as_deref(),
            Some("https://img.example/cover.png")
        );
    }

    #[tokio::test]
    async fn test_create_post_validates_before_authorizing() {
        let backend = TestBackend::new();
        let ctx = backend.context();

        let err = PostService::new(&ctx)
            .create_post(&Identity::new(Id::new(1), false), create_request("", ""))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Please provide all required fields");
    }

    #[tokio::test]
    async fn test_list_posts_totals_ignore_window() {
        let backend = TestBackend::new();
        let admin = backend.seed_admin("admin123", "admin@x.com", "secret1");
        for title in ["One", "Two", "Three"] {
            backend.seed_post(admin.id, title);
        }
        let ctx = backend.context();
        let service = PostService::new(&ctx);

        let first = service
            .list_posts(PostFilter::default(), ListWindow::new(0, 1, SortDirection::Asc))
            .await
            .unwrap();
        let second = service
            .list_posts(PostFilter::default(), ListWindow::new(1, 1, SortDirection::Asc))
            .await
            .unwrap();

        assert_eq!(first.posts.len(), 1);
        assert_eq!(second.posts.len(), 1);
        assert_ne!(first.posts[0].id, second.posts[0].id);
        assert_eq!(first.total_posts, second.total_posts);
        assert_eq!(first.last_month_posts, second.last_month_posts);
        assert_eq!(second.total_posts, 3);
    }
}
