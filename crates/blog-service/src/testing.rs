//! In-memory repositories for tests
//!
//! [`InMemoryStore`] implements every repository trait over one locked map
//! set, so deleting a user or post cascades like the relational schema does.
//! [`TestBackend`] wraps a store and hands out service contexts.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use blog_common::{hash_password, JwtService};
use blog_core::entities::{
    Comment, NewComment, NewPost, NewUser, Post, PostChanges, User, UserChanges,
};
use blog_core::traits::{CommentRepository, PostFilter, PostRepository, UserRepository};
use blog_core::{DomainError, Id, ListWindow, RepoResult, SortDirection};
use chrono::{DateTime, Utc};

use crate::services::ServiceContext;

/// Session secret used by [`TestBackend::context`]
pub const TEST_JWT_SECRET: &str = "test-secret-key-that-is-long-enough";

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<Id, (User, String)>,
    posts: BTreeMap<Id, Post>,
    comments: BTreeMap<Id, Comment>,
}

impl State {
    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        Id::new(self.next_id)
    }
}

/// Users, posts and comments held in memory
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test must not poison the others sharing the store
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Order by timestamp in the window's direction, ties broken by id
fn ordered<T>(
    items: &mut [T],
    direction: SortDirection,
    key: impl Fn(&T) -> (DateTime<Utc>, Id),
) {
    items.sort_by(|a, b| {
        let ord: Ordering = key(a).cmp(&key(b));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

fn window_of<T>(items: Vec<T>, window: &ListWindow) -> Vec<T> {
    items
        .into_iter()
        .skip(window.start_index as usize)
        .take(window.limit as usize)
        .collect()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<User>> {
        Ok(self.lock().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn find_many(&self, ids: &[Id]) -> RepoResult<Vec<User>> {
        let state = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).map(|(u, _)| u.clone()))
            .collect())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.lock().users.values().any(|(u, _)| u.email == email))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut state = self.lock();
        if state.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let created = User {
            id: state.next_id(),
            username: user.username.clone(),
            email: user.email.clone(),
            profile_picture: user.profile_picture_or_default().to_string(),
            is_admin: false,
            created_at: now,
            updated_at: now,
        };
        state
            .users
            .insert(created.id, (created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn update(&self, id: Id, changes: &UserChanges) -> RepoResult<User> {
        let mut state = self.lock();
        if let Some(email) = &changes.email {
            if state
                .users
                .values()
                .any(|(u, _)| u.id != id && u.email == *email)
            {
                return Err(DomainError::EmailAlreadyExists);
            }
        }

        let (user, hash) = state
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        if let Some(username) = &changes.username {
            user.username.clone_from(username);
        }
        if let Some(email) = &changes.email {
            user.email.clone_from(email);
        }
        if let Some(picture) = &changes.profile_picture {
            user.profile_picture.clone_from(picture);
        }
        if let Some(new_hash) = &changes.password_hash {
            hash.clone_from(new_hash);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.lock();
        if state.users.remove(&id).is_none() {
            return Err(DomainError::UserNotFound(id));
        }
        state.posts.retain(|_, p| p.author_id != id);
        let State {
            posts, comments, ..
        } = &mut *state;
        comments.retain(|_, c| c.user_id != id && posts.contains_key(&c.post_id));
        Ok(())
    }

    async fn get_password_hash(&self, id: Id) -> RepoResult<Option<String>> {
        Ok(self.lock().users.get(&id).map(|(_, h)| h.clone()))
    }

    async fn list(&self, window: &ListWindow) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self.lock().users.values().map(|(u, _)| u.clone()).collect();
        ordered(&mut users, window.direction, |u| (u.created_at, u.id));
        Ok(window_of(users, window))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.lock().users.len() as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        Ok(self
            .lock()
            .users
            .values()
            .filter(|(u, _)| u.created_at >= since)
            .count() as i64)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Post>> {
        Ok(self.lock().posts.get(&id).cloned())
    }

    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let mut state = self.lock();
        if !state.users.contains_key(&post.author_id) {
            return Err(DomainError::UserNotFound(post.author_id));
        }

        let now = Utc::now();
        let created = Post {
            id: state.next_id(),
            author_id: post.author_id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            category: post.category.clone(),
            image: post.image.clone(),
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: Id, changes: &PostChanges) -> RepoResult<Post> {
        let mut state = self.lock();
        let post = state
            .posts
            .get_mut(&id)
            .ok_or(DomainError::PostNotFound(id))?;
        if let Some(title) = &changes.title {
            post.title.clone_from(title);
        }
        if let Some(slug) = &changes.slug {
            post.slug.clone_from(slug);
        }
        if let Some(content) = &changes.content {
            post.content.clone_from(content);
        }
        if let Some(category) = &changes.category {
            post.category.clone_from(category);
        }
        if let Some(image) = &changes.image {
            post.image = Some(image.clone());
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.lock();
        if state.posts.remove(&id).is_none() {
            return Err(DomainError::PostNotFound(id));
        }
        state.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }

    async fn find(&self, filter: &PostFilter, window: &ListWindow) -> RepoResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .lock()
            .posts
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        ordered(&mut posts, window.direction, |p| (p.updated_at, p.id));
        Ok(window_of(posts, window))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.lock().posts.len() as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        Ok(self
            .lock()
            .posts
            .values()
            .filter(|p| p.created_at >= since)
            .count() as i64)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Comment>> {
        Ok(self.lock().comments.get(&id).cloned())
    }

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let mut state = self.lock();
        if !state.posts.contains_key(&comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        if !state.users.contains_key(&comment.user_id) {
            return Err(DomainError::UserNotFound(comment.user_id));
        }

        let now = Utc::now();
        let created = Comment {
            id: state.next_id(),
            post_id: comment.post_id,
            user_id: comment.user_id,
            text: comment.text.clone(),
            likes: Vec::new(),
            number_of_likes: 0,
            created_at: now,
            updated_at: now,
        };
        state.comments.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_post(&self, post_id: Id) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .lock()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        ordered(&mut comments, SortDirection::Desc, |c| (c.created_at, c.id));
        Ok(comments)
    }

    async fn toggle_like(&self, id: Id, user_id: Id) -> RepoResult<Comment> {
        let mut state = self.lock();
        let comment = state
            .comments
            .get_mut(&id)
            .ok_or(DomainError::CommentNotFound(id))?;
        comment.toggle_like(user_id);
        Ok(comment.clone())
    }

    async fn update_text(&self, id: Id, text: &str) -> RepoResult<Comment> {
        let mut state = self.lock();
        let comment = state
            .comments
            .get_mut(&id)
            .ok_or(DomainError::CommentNotFound(id))?;
        comment.text = text.to_string();
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        self.lock()
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::CommentNotFound(id))
    }

    async fn list(&self, window: &ListWindow) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self.lock().comments.values().cloned().collect();
        ordered(&mut comments, window.direction, |c| (c.created_at, c.id));
        Ok(window_of(comments, window))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.lock().comments.len() as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        Ok(self
            .lock()
            .comments
            .values()
            .filter(|c| c.created_at >= since)
            .count() as i64)
    }
}

/// A store plus the session service, with seeding helpers
#[derive(Clone)]
pub struct TestBackend {
    store: Arc<InMemoryStore>,
    jwt_service: Arc<JwtService>,
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBackend {
    /// Empty backend signing sessions with [`TEST_JWT_SECRET`]
    pub fn new() -> Self {
        Self::with_secret(TEST_JWT_SECRET)
    }

    pub fn with_secret(secret: &str) -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            jwt_service: Arc::new(JwtService::new(secret, None)),
        }
    }

    pub fn store(&self) -> Arc<InMemoryStore> {
        Arc::clone(&self.store)
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Service context backed by this store
    pub fn context(&self) -> ServiceContext {
        ServiceContext::new(
            self.store(),
            self.store(),
            self.store(),
            Arc::clone(&self.jwt_service),
        )
    }

    /// Insert an account directly, bypassing the services
    pub fn seed_user(&self, username: &str, email: &str, password: &str) -> User {
        let hash = hash_password(password).expect("hash password");
        let mut state = self.store.lock();
        let now = Utc::now();
        let user = User {
            id: state.next_id(),
            username: username.to_string(),
            email: email.to_string(),
            profile_picture: blog_core::DEFAULT_PROFILE_PICTURE.to_string(),
            is_admin: false,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, (user.clone(), hash));
        user
    }

    pub fn seed_admin(&self, username: &str, email: &str, password: &str) -> User {
        let user = self.seed_user(username, email, password);
        self.promote_to_admin(user.id);
        User {
            is_admin: true,
            ..user
        }
    }

    /// Insert a post with generated content
    pub fn seed_post(&self, author_id: Id, title: &str) -> Post {
        let draft = NewPost::new(author_id, title, format!("Content of {title}"));
        let mut state = self.store.lock();
        let now = Utc::now();
        let post = Post {
            id: state.next_id(),
            author_id,
            title: draft.title,
            slug: draft.slug,
            content: draft.content,
            category: draft.category,
            image: None,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(post.id, post.clone());
        post
    }

    /// Grant the admin flag; sessions issued afterwards carry it
    pub fn promote_to_admin(&self, user_id: Id) {
        if let Some((user, _)) = self.store.lock().users.get_mut(&user_id) {
            user.is_admin = true;
        }
    }

    pub fn password_hash(&self, user_id: Id) -> Option<String> {
        self.store.lock().users.get(&user_id).map(|(_, h)| h.clone())
    }

    pub fn user_count(&self) -> usize {
        self.store.lock().users.len()
    }

    pub fn post_count(&self) -> usize {
        self.store.lock().posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.store.lock().comments.len()
    }
}
