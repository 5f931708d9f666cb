//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL (REDIS_URL optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Register a fresh account and sign in
async fn signed_in(server: &TestServer) -> (RegisterRequest, LoginResponse) {
    let register = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &register).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    (register, login)
}

async fn create_link(server: &TestServer, token: &str, request: &LinkRequest) -> LinkResponse {
    let response = server.post_auth("/api/links", token, request).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
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
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let created: CreatedUserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.user.username, request.username);
    assert_eq!(created.user.email, request.email);
    assert_eq!(created.user.role, "user");
    assert!(created.user.is_active);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    // First registration
    server.post("/api/auth/register", &request).await.unwrap();

    // Second registration with same email
    let response = server.post("/api/auth/register", &request).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(!error.message.is_empty());
}

#[tokio::test]
async fn test_register_missing_fields() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/auth/register", &json!({"email": "x@example.com"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, login) = signed_in(&server).await;

    assert_eq!(login.user.username, register.username);
    assert!(!login.token.is_empty());
    assert!(login.expires_in > 0);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_cookie_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register = RegisterRequest::unique();
    server.post("/api/auth/register", &register).await.unwrap();

    let client = server.cookie_client().unwrap();
    let url = |path: &str| format!("{}{}", server.base_url(), path);

    let response = client
        .post(url("/api/auth/login"))
        .json(&LoginRequest::from_register(&register))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The cookie alone authenticates
    let response = client.get(url("/api/auth/session")).send().await.unwrap();
    let claims: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(claims["username"], register.username.as_str());

    let response = client.post(url("/api/auth/logout")).send().await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = client.get(url("/api/auth/session")).send().await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_providers_include_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/auth/providers").await.unwrap();
    let providers: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(providers.iter().any(|p| p["id"] == "credentials"));
}

#[tokio::test]
async fn test_unauthorized_access() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/links").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.code, "UNAUTHORIZED");

    let response = server.get_auth("/api/profile", "invalid_token").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Link Tests
// ============================================================================

#[tokio::test]
async fn test_link_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = signed_in(&server).await;
    let token = &login.token;

    let first = create_link(&server, token, &LinkRequest::new("First")).await;
    let second = create_link(&server, token, &LinkRequest::new("Second")).await;
    assert_eq!(first.order, 0);
    assert_eq!(second.order, 1);
    assert!(first.is_active);
    assert_eq!(first.user_id, login.user.id);

    let response = server
        .put_auth(
            &format!("/api/links/{}", first.id),
            token,
            &LinkRequest::new("Renamed"),
        )
        .await
        .unwrap();
    let updated: LinkResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.order, 0);

    let response = server
        .delete_auth(&format!("/api/links/{}", second.id), token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], true);

    let response = server.get_auth("/api/links", token).await.unwrap();
    let links: Vec<LinkResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].title, "Renamed");
}

#[tokio::test]
async fn test_link_invalid_url() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = signed_in(&server).await;

    let request = LinkRequest {
        title: "Broken".to_string(),
        url: "not a url".to_string(),
        is_active: None,
    };
    let response = server
        .post_auth("/api/links", &login.token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_reorder_links() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = signed_in(&server).await;
    let token = &login.token;

    let a = create_link(&server, token, &LinkRequest::new("Alpha")).await;
    let b = create_link(&server, token, &LinkRequest::new("Beta")).await;
    let c = create_link(&server, token, &LinkRequest::new("Gamma")).await;

    let response = server
        .put_auth(
            "/api/links/reorder",
            token,
            &ReorderRequest::sequence(&[&c.id, &a.id, &b.id]),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/links", token).await.unwrap();
    let links: Vec<LinkResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let titles: Vec<&str> = links.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Gamma", "Alpha", "Beta"]);
}

#[tokio::test]
async fn test_reorder_foreign_link_changes_nothing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signed_in(&server).await;
    let (_, other) = signed_in(&server).await;

    let mine = create_link(&server, &owner.token, &LinkRequest::new("Mine")).await;
    let theirs = create_link(&server, &other.token, &LinkRequest::new("Theirs")).await;

    let response = server
        .put_auth(
            "/api/links/reorder",
            &owner.token,
            &ReorderRequest {
                links: vec![
                    LinkOrder {
                        id: mine.id.clone(),
                        order: 5,
                    },
                    LinkOrder {
                        id: theirs.id.clone(),
                        order: 0,
                    },
                ],
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth("/api/links", &owner.token).await.unwrap();
    let links: Vec<LinkResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(links[0].order, 0);
}

#[tokio::test]
async fn test_foreign_link_delete_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signed_in(&server).await;
    let (_, other) = signed_in(&server).await;

    let link = create_link(&server, &owner.token, &LinkRequest::new("Mine")).await;
    let response = server
        .delete_auth(&format!("/api/links/{}", link.id), &other.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth("/api/links", &owner.token).await.unwrap();
    let links: Vec<LinkResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(links.len(), 1);
}

// ============================================================================
// Profile and Public Page Tests
// ============================================================================

#[tokio::test]
async fn test_profile_update_and_conflict() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = signed_in(&server).await;
    let (other, _) = signed_in(&server).await;

    let response = server
        .put_auth(
            "/api/profile",
            &login.token,
            &json!({"username": other.username}),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.message, "Username already taken");

    let response = server
        .put_auth(
            "/api/profile",
            &login.token,
            &json!({"bio": "Hello there", "name": "Display Name"}),
        )
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.bio.as_deref(), Some("Hello there"));
    assert_eq!(profile.name, "Display Name");
}

#[tokio::test]
async fn test_public_page_reflects_writes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, login) = signed_in(&server).await;
    let token = &login.token;
    let public_path = format!("/api/public/{}", register.username);

    create_link(&server, token, &LinkRequest::new("Visible")).await;
    create_link(&server, token, &LinkRequest::new("Hidden").inactive()).await;

    let response = server.get(&public_path).await.unwrap();
    let page: PublicPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.username, register.username);
    assert_eq!(page.links.len(), 1);
    assert_eq!(page.links[0].title, "Visible");

    // A write after the page was served must show on the next read
    let response = server
        .put_auth("/api/theme", token, &json!({"theme": "dark"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    create_link(&server, token, &LinkRequest::new("Later")).await;

    let response = server.get(&public_path).await.unwrap();
    let page: PublicPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.theme, "dark");
    assert_eq!(page.links.len(), 2);
}

#[tokio::test]
async fn test_rename_moves_public_page() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, login) = signed_in(&server).await;
    let old_path = format!("/api/public/{}", register.username);

    let response = server.get(&old_path).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let new_username = format!("renamed_{}", unique_suffix());
    let response = server
        .put_auth(
            "/api/profile",
            &login.token,
            &json!({"username": new_username}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&old_path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get(&format!("/api/public/{new_username}"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_public_page_unknown_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get(&format!("/api/public/nobody_{}", unique_suffix()))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_record_view() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, _) = signed_in(&server).await;

    let response = server
        .client
        .post(format!(
            "{}/api/views/{}",
            server.base_url(),
            register.username
        ))
        .header("x-forwarded-for", "203.0.113.9")
        .json(&json!({"referer": "https://example.org"}))
        .send()
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_delete_account() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, login) = signed_in(&server).await;
    create_link(&server, &login.token, &LinkRequest::new("Doomed")).await;

    let response = server.delete_auth("/api/account", &login.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/api/public/{}", register.username))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_requires_admin_role() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, login) = signed_in(&server).await;

    let response = server
        .get_auth("/api/admin/users", &login.token)
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert!(!error.message.is_empty());
}

#[tokio::test]
async fn test_admin_user_management() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, _) = signed_in(&server).await;
    server.promote_to_admin(&admin.username).await.unwrap();

    // Sign in again so the session carries the new role
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&admin))
        .await
        .unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let token = &login.token;
    assert_eq!(login.user.role, "admin");

    let (target, target_login) = signed_in(&server).await;
    create_link(&server, &target_login.token, &LinkRequest::new("One")).await;

    let response = server
        .get_auth(
            &format!("/api/admin/users?search={}&limit=5", target.email),
            token,
        )
        .await
        .unwrap();
    let list: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.pagination.total, 1);
    assert_eq!(list.pagination.limit, 5);
    assert_eq!(list.users[0].username, target.username);
    assert_eq!(list.users[0].count.links, 1);

    let target_path = format!("/api/admin/users/{}", target_login.user.id);
    let response = server
        .put_auth(&target_path, token, &json!({"isActive": false}))
        .await
        .unwrap();
    let updated: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated["isActive"], false);

    let response = server.get_auth(&target_path, token).await.unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail["username"], target.username.as_str());
    assert_eq!(detail["links"].as_array().map(Vec::len), Some(1));

    let response = server
        .delete_auth(&format!("/api/admin/users/{}", login.user.id), token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.delete_auth(&target_path, token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "User deleted successfully");

    let response = server.get_auth(&target_path, token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth("/api/admin/stats", token).await.unwrap();
    let stats: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(stats["overview"]["totalUsers"].as_i64().unwrap_or(0) >= 1);
    assert!(stats["dailyStats"].is_array());
}
