//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p blog-integration-tests --test api_tests

use blog_integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestClient, TestServer,
};
use reqwest::StatusCode;

/// Sign up and sign in on the given client, returning the account
async fn signed_in(client: &TestClient) -> (SignupRequest, UserResponse) {
    let signup = SignupRequest::unique();
    let response = client.post("/api/auth/signup", &signup).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = client
        .post("/api/auth/signin", &SigninRequest::from_signup(&signup))
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    (signup, user)
}

/// Sign in a fresh account, promote it and sign in again
async fn signed_in_admin(server: &TestServer, client: &TestClient) -> UserResponse {
    let (signup, user) = signed_in(client).await;
    server.promote_to_admin(user.id).await.unwrap();

    let response = client
        .post("/api/auth/signin", &SigninRequest::from_signup(&signup))
        .await
        .unwrap();
    let admin: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(admin.is_admin);
    admin
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let response = client.get("/api/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let response = client.get("/api/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_signup() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let request = SignupRequest::unique();

    let response = client.post("/api/auth/signup", &request).await.unwrap();
    let body: SignupResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(body.user.username, request.username);
    assert_eq!(body.user.email, request.email);
    assert!(!body.message.is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let request = SignupRequest::unique();

    client.post("/api/auth/signup", &request).await.unwrap();

    let response = client.post("/api/auth/signup", &request).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(!error.success);
    assert_eq!(error.message, "User already exists");
}

#[tokio::test]
async fn test_signin_sets_session_cookie() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let signup = SignupRequest::unique();
    client.post("/api/auth/signup", &signup).await.unwrap();

    let response = client
        .post("/api/auth/signin", &SigninRequest::from_signup(&signup))
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
        .expect("session cookie");
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));

    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.username, signup.username);
    assert!(!user.is_admin);
}

#[tokio::test]
async fn test_signin_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let unknown = SigninRequest {
        email: format!("nobody{}@example.com", unique_suffix()),
        password: "wrongpass".to_string(),
    };
    let response = client.post("/api/auth/signin", &unknown).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let signup = SignupRequest::unique();
    client.post("/api/auth/signup", &signup).await.unwrap();
    let wrong = SigninRequest {
        email: signup.email.clone(),
        password: "wrongpass".to_string(),
    };
    let response = client.post("/api/auth/signin", &wrong).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.message, "Invalid password");
}

#[tokio::test]
async fn test_google_signin_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let request = GoogleRequest::unique();

    let response = client.post("/api/auth/google", &request).await.unwrap();
    let first: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.email, request.email);
    assert!(first.username.starts_with("testperson"));

    let response = client.post("/api/auth/google", &request).await.unwrap();
    let second: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_signout_ends_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let (_, user) = signed_in(&client).await;

    let response = client.post_empty("/api/user/signout").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = client
        .delete(&format!("/api/user/delete/{}", user.id))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.message, "Unauthorized");
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_api_test_route() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let response = client.get("/api/user/test").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "API is working!");
}

#[tokio::test]
async fn test_update_own_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let (_, user) = signed_in(&client).await;

    let new_name = format!("renamed{}", unique_suffix());
    let response = client
        .put(
            &format!("/api/user/update/{}", user.id),
            &serde_json::json!({ "username": new_name }),
        )
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.username, new_name);

    let response = client.get(&format!("/api/user/{}", user.id)).await.unwrap();
    let fetched: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.username, new_name);
}

#[tokio::test]
async fn test_update_other_user_forbidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.client().unwrap();
    let bob = server.client().unwrap();
    let (_, alice_user) = signed_in(&alice).await;
    signed_in(&bob).await;

    let response = bob
        .put(
            &format!("/api/user/update/{}", alice_user.id),
            &serde_json::json!({ "username": "hijacked" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_list_users_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    signed_in(&client).await;

    let response = client.get("/api/user/getusers").await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    signed_in_admin(&server, &client).await;
    let response = client.get("/api/user/getusers?limit=2").await.unwrap();
    let page: UsersPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.users.len() <= 2);
    assert!(page.total_users >= 2);
    assert!(page.last_month_users >= 1);
}

#[tokio::test]
async fn test_delete_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let (_, user) = signed_in(&client).await;

    let response = client
        .delete(&format!("/api/user/delete/{}", user.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = client.get(&format!("/api/user/{}", user.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    signed_in(&client).await;

    let response = client
        .post("/api/post/create", &CreatePostRequest::unique())
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.status_code, 403);
}

#[tokio::test]
async fn test_post_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let admin = signed_in_admin(&server, &client).await;

    let request = CreatePostRequest::unique();
    let response = client.post("/api/post/create", &request).await.unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(post.user_id, admin.id);
    assert_eq!(post.title, request.title);
    assert!(post.slug.starts_with("test-post-"));

    let response = client
        .get(&format!("/api/post/getposts?slug={}", post.slug))
        .await
        .unwrap();
    let page: PostsPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.posts[0].id, post.id);
    assert!(page.total_posts >= 1);

    let response = client
        .put(
            &format!("/api/post/updatepost/{}/{}", post.id, admin.id),
            &serde_json::json!({ "title": "Renamed Post", "content": "" }),
        )
        .await
        .unwrap();
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Renamed Post");
    assert_eq!(updated.slug, "renamed-post");
    assert_eq!(updated.content, request.content);

    let response = client
        .delete(&format!("/api/post/deletepost/{}/{}", post.id, admin.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = client
        .get(&format!("/api/post/getposts?postId={}", post.id))
        .await
        .unwrap();
    let page: PostsPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.posts.is_empty());
}

#[tokio::test]
async fn test_post_mutation_with_foreign_path_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin_client = server.client().unwrap();
    let other_client = server.client().unwrap();
    signed_in_admin(&server, &admin_client).await;
    let (_, other) = signed_in(&other_client).await;

    let response = admin_client
        .post("/api/post/create", &CreatePostRequest::unique())
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = admin_client
        .delete(&format!("/api/post/deletepost/{}/{}", post.id, other.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_get_posts_is_public() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let response = client
        .get("/api/post/getposts?order=asc&limit=3")
        .await
        .unwrap();
    let page: PostsPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.posts.len() <= 3);
    assert!(page.last_month_posts <= page.total_posts);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin_client = server.client().unwrap();
    let reader_client = server.client().unwrap();
    signed_in_admin(&server, &admin_client).await;
    let (_, reader) = signed_in(&reader_client).await;

    let response = admin_client
        .post("/api/post/create", &CreatePostRequest::unique())
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let request = CreateCommentRequest {
        content: "Nice post".to_string(),
        post_id: post.id,
        user_id: reader.id,
    };
    let response = reader_client
        .post("/api/comment/create", &request)
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comment.text, "Nice post");
    assert_eq!(comment.number_of_likes, 0);

    let like_path = format!("/api/comment/likeComment/{}", comment.id);
    let response = reader_client.put_empty(&like_path).await.unwrap();
    let liked: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.likes, vec![reader.id]);
    assert_eq!(liked.number_of_likes, 1);

    let response = reader_client.put_empty(&like_path).await.unwrap();
    let unliked: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(unliked.likes.is_empty());

    let response = reader_client
        .get(&format!("/api/comment/getPostComments/{}", post.id))
        .await
        .unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].user.as_ref().map(|u| u.id), Some(reader.id));

    let response = reader_client
        .put(
            &format!("/api/comment/editComment/{}", comment.id),
            &serde_json::json!({ "content": "Edited" }),
        )
        .await
        .unwrap();
    let edited: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.text, "Edited");

    let response = admin_client
        .delete(&format!("/api/comment/deleteComment/{}", comment.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_comment_for_someone_else_forbidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin_client = server.client().unwrap();
    let reader_client = server.client().unwrap();
    let admin = signed_in_admin(&server, &admin_client).await;
    signed_in(&reader_client).await;

    let response = admin_client
        .post("/api/post/create", &CreatePostRequest::unique())
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let request = CreateCommentRequest {
        content: "Impersonation".to_string(),
        post_id: post.id,
        user_id: admin.id,
    };
    let response = reader_client
        .post("/api/comment/create", &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Error Shape Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_route() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let response = client.get("/api/does-not-exist").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert!(!error.success);
    assert_eq!(error.status_code, 404);
}
