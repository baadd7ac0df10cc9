//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, login, seed_repository,
    seed_unverified, seed_verified, TestServer, SEED_PASSWORD,
};
use market_core::{Role, UserRepository};
use reqwest::StatusCode;

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
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_buyer_starts_unverified() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::buyer();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let body: UserMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(body.success);
    assert!(body.message.contains("verify"));
    assert_eq!(body.user.email, request.email.to_lowercase());
    assert_eq!(body.user.role, "buyer");
    assert!(!body.user.email_verified);
}

#[tokio::test]
async fn test_register_seller_requires_store_name() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest {
        store_name: None,
        ..RegisterRequest::seller()
    };

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    assert!(!error.success);
    assert_eq!(error.error_code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::buyer();

    // First registration
    let response = server.post("/api/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Second registration with same email
    let response = server.post("/api/auth/register", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(error.error_code, "EMAIL_ALREADY_EXISTS");
}

// ============================================================================
// Verification Tests
// ============================================================================

#[tokio::test]
async fn test_login_rejected_until_verified() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::buyer();
    let response = server
        .post("/api/auth/register", &register_req)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();

    assert_eq!(error.error_code, "EMAIL_NOT_VERIFIED");
}

#[tokio::test]
async fn test_register_verify_login_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");

    // Register through the API
    let register_req = RegisterRequest::buyer();
    let response = server
        .post("/api/auth/register", &register_req)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Read the issued token straight from the database, standing in for
    // the email the user would normally receive
    let user = repo
        .find_by_email(&register_req.email)
        .await
        .expect("Lookup failed")
        .expect("Registered user missing");
    let token = user
        .email_verification_token
        .expect("No verification token issued");

    // Verify
    let verify_req = VerifyEmailRequest {
        token,
        email: register_req.email.clone(),
    };
    let response = server
        .post("/api/auth/verify-email", &verify_req)
        .await
        .unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.message.contains("verified"));

    // Login now succeeds
    let token = login(&server, &register_req.email, &register_req.password)
        .await
        .expect("Login after verification failed");

    // And the token works
    let response = server.get_auth("/api/auth/me", &token).await.unwrap();
    let me: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.user.email, register_req.email.to_lowercase());
    assert!(me.user.email_verified);
    assert!(me.user.last_login_at.is_some(), "login should be recorded");
}

#[tokio::test]
async fn test_verify_email_wrong_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let (user, _token) = seed_unverified(&repo).await.expect("Seed failed");

    let verify_req = VerifyEmailRequest {
        token: "not-the-token".to_string(),
        email: user.email.clone(),
    };
    let response = server
        .post("/api/auth/verify-email", &verify_req)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(error.error_code, "INVALID_VERIFICATION_TOKEN");
}

#[tokio::test]
async fn test_verify_email_unknown_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Unknown email reads exactly like a bad token, so the endpoint
    // cannot be used to probe which addresses exist
    let verify_req = VerifyEmailRequest {
        token: "anything".to_string(),
        email: format!("nobody-{}@campus.edu", unique_suffix()),
    };
    let response = server
        .post("/api/auth/verify-email", &verify_req)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(error.error_code, "INVALID_VERIFICATION_TOKEN");
}

#[tokio::test]
async fn test_resend_throttled_right_after_register() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::buyer();
    let response = server
        .post("/api/auth/register", &register_req)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Registration just issued a token, so the cooldown is still running
    let resend_req = ResendVerificationRequest {
        email: register_req.email.clone(),
    };
    let response = server
        .post("/api/auth/resend-verification-email", &resend_req)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::TOO_MANY_REQUESTS)
        .await
        .unwrap();

    assert_eq!(error.error_code, "RESEND_THROTTLED");
}

#[tokio::test]
async fn test_resend_unknown_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let resend_req = ResendVerificationRequest {
        email: format!("nobody-{}@campus.edu", unique_suffix()),
    };
    let response = server
        .post("/api/auth/resend-verification-email", &resend_req)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(error.error_code, "EMAIL_NOT_FOUND");
}

// ============================================================================
// Login and Session Tests
// ============================================================================

#[tokio::test]
async fn test_login_wrong_password_matches_unknown_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let user = seed_verified(&repo, Role::Buyer).await.expect("Seed failed");

    let wrong_password = LoginRequest {
        email: user.email.clone(),
        password: "WrongPass123".to_string(),
    };
    let response = server.post("/api/auth/login", &wrong_password).await.unwrap();
    let wrong_pw: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    let unknown_email = LoginRequest {
        email: format!("nobody-{}@campus.edu", unique_suffix()),
        password: "WrongPass123".to_string(),
    };
    let response = server.post("/api/auth/login", &unknown_email).await.unwrap();
    let unknown: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    // Identical bodies, so the response cannot reveal which emails exist
    assert_eq!(wrong_pw.error_code, "INVALID_CREDENTIALS");
    assert_eq!(wrong_pw.error_code, unknown.error_code);
    assert_eq!(wrong_pw.message, unknown.message);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let user = seed_verified(&repo, Role::Buyer).await.expect("Seed failed");

    let token = login(&server, &user.email, SEED_PASSWORD)
        .await
        .expect("Login failed");
    let second_token = login(&server, &user.email, SEED_PASSWORD)
        .await
        .expect("Second login failed");

    // Token works before logout
    let response = server.get_auth("/api/auth/me", &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Logout
    let response = server
        .post_auth("/api/auth/logout", &token, &())
        .await
        .unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);

    // Token is dead afterwards
    let response = server.get_auth("/api/auth/me", &token).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(error.error_code, "INVALID_TOKEN");

    // Only the presented token; the other session stays live
    let response = server.get_auth("/api/auth/me", &second_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_me_requires_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // No Authorization header
    let response = server.get("/api/auth/me").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(error.error_code, "MISSING_AUTHORIZATION");

    // Wrong scheme
    let url = format!("{}/api/auth/me", server.base_url());
    let response = server
        .client
        .get(&url)
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(error.error_code, "INVALID_AUTHORIZATION_FORMAT");
}

#[tokio::test]
async fn test_update_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let user = seed_verified(&repo, Role::Buyer).await.expect("Seed failed");
    let token = login(&server, &user.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    // Partial update
    let update = UpdateProfileRequest {
        name: Some("Renamed Buyer".to_string()),
        description: Some("I buy textbooks".to_string()),
        ..UpdateProfileRequest::default()
    };
    let response = server
        .put_auth("/api/auth/profile", &token, &update)
        .await
        .unwrap();
    let body: UserMessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.user.name, "Renamed Buyer");
    assert_eq!(body.user.description.as_deref(), Some("I buy textbooks"));
    assert!(body.user.email_verified);

    // Buyers cannot set a store name
    let update = UpdateProfileRequest {
        store_name: Some("Sneaky Store".to_string()),
        ..UpdateProfileRequest::default()
    };
    let response = server
        .put_auth("/api/auth/profile", &token, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}

// ============================================================================
// Role Gate Tests
// ============================================================================

#[tokio::test]
async fn test_dashboards_enforce_roles() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let buyer = seed_verified(&repo, Role::Buyer).await.expect("Seed failed");
    let token = login(&server, &buyer.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    // Any verified account can reach /account
    let response = server.get_auth("/api/account", &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Buyer dashboard is open to buyers
    let response = server.get_auth("/api/buyer/dashboard", &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Seller dashboard is not
    let response = server
        .get_auth("/api/seller/dashboard", &token)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error_code, "NOT_A_SELLER");
}

#[tokio::test]
async fn test_admin_surface_requires_admin_role() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let buyer = seed_verified(&repo, Role::Buyer).await.expect("Seed failed");
    let token = login(&server, &buyer.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    let response = server.get_auth("/api/admin/users", &token).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error_code, "NOT_AN_ADMIN");
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_list_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let admin = seed_verified(&repo, Role::Admin).await.expect("Seed failed");
    seed_verified(&repo, Role::Seller).await.expect("Seed failed");
    let token = login(&server, &admin.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    // Unfiltered listing
    let response = server.get_auth("/api/admin/users", &token).await.unwrap();
    let body: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);
    assert!(!body.users.is_empty());
    assert_eq!(body.pagination.page, 1);
    assert!(body.pagination.total >= body.users.len() as i64);

    // Role filter only returns sellers
    let response = server
        .get_auth("/api/admin/users?role=seller&status=active", &token)
        .await
        .unwrap();
    let body: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.users.is_empty());
    assert!(body.users.iter().all(|u| u.role == "seller"));
}

#[tokio::test]
async fn test_admin_create_user_can_login_immediately() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let admin = seed_verified(&repo, Role::Admin).await.expect("Seed failed");
    let token = login(&server, &admin.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    let create_req = AdminCreateUserRequest::verified_buyer();
    let response = server
        .post_auth("/api/admin/users", &token, &create_req)
        .await
        .unwrap();
    let body: UserMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(body.user.email_verified);

    // Pre-verified accounts skip the verification gate entirely
    let user_token = login(&server, &create_req.email, &create_req.password)
        .await
        .expect("Created user could not login");
    assert!(!user_token.is_empty());
}

#[tokio::test]
async fn test_admin_get_and_update_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let admin = seed_verified(&repo, Role::Admin).await.expect("Seed failed");
    let token = login(&server, &admin.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    let create_req = AdminCreateUserRequest::verified_buyer();
    let response = server
        .post_auth("/api/admin/users", &token, &create_req)
        .await
        .unwrap();
    let created: UserMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Fetch
    let response = server
        .get_auth(&format!("/api/admin/users/{}", created.user.id), &token)
        .await
        .unwrap();
    let fetched: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.user.id, created.user.id);

    // Update name only; verification state must survive
    let update_req = AdminUpdateUserRequest {
        name: Some("Adjusted Name".to_string()),
        ..AdminUpdateUserRequest::default()
    };
    let response = server
        .put_auth(
            &format!("/api/admin/users/{}", created.user.id),
            &token,
            &update_req,
        )
        .await
        .unwrap();
    let updated: UserMessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.user.name, "Adjusted Name");
    assert!(updated.user.email_verified);
}

#[tokio::test]
async fn test_admin_toggle_status_blocks_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let admin = seed_verified(&repo, Role::Admin).await.expect("Seed failed");
    let token = login(&server, &admin.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    let create_req = AdminCreateUserRequest::verified_buyer();
    let response = server
        .post_auth("/api/admin/users", &token, &create_req)
        .await
        .unwrap();
    let created: UserMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Deactivate
    let response = server
        .patch_auth(
            &format!("/api/admin/users/{}/toggle-status", created.user.id),
            &token,
            &(),
        )
        .await
        .unwrap();
    let body: UserMessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.message.contains("deactivated"));

    // Deactivated accounts cannot login
    let login_req = LoginRequest {
        email: create_req.email.clone(),
        password: create_req.password.clone(),
    };
    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(error.error_code, "ACCOUNT_DEACTIVATED");

    // Reactivate and login again
    let response = server
        .patch_auth(
            &format!("/api/admin/users/{}/toggle-status", created.user.id),
            &token,
            &(),
        )
        .await
        .unwrap();
    let body: UserMessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.message.contains("activated"));

    login(&server, &create_req.email, &create_req.password)
        .await
        .expect("Reactivated user could not login");
}

#[tokio::test]
async fn test_deactivation_cuts_off_live_sessions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let admin = seed_verified(&repo, Role::Admin).await.expect("Seed failed");
    let admin_token = login(&server, &admin.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    let create_req = AdminCreateUserRequest::verified_buyer();
    let response = server
        .post_auth("/api/admin/users", &admin_token, &create_req)
        .await
        .unwrap();
    let created: UserMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let user_token = login(&server, &create_req.email, &create_req.password)
        .await
        .expect("Login failed");
    let response = server.get_auth("/api/auth/me", &user_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Deactivation revokes the user's sessions, not just future logins
    let response = server
        .patch_auth(
            &format!("/api/admin/users/{}/toggle-status", created.user.id),
            &admin_token,
            &(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/auth/me", &user_token).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(error.error_code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_admin_delete_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let admin = seed_verified(&repo, Role::Admin).await.expect("Seed failed");
    let token = login(&server, &admin.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    let create_req = AdminCreateUserRequest::verified_buyer();
    let response = server
        .post_auth("/api/admin/users", &token, &create_req)
        .await
        .unwrap();
    let created: UserMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Delete
    let response = server
        .delete_auth(&format!("/api/admin/users/{}", created.user.id), &token)
        .await
        .unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);

    // Verify deleted
    let response = server
        .get_auth(&format!("/api/admin/users/{}", created.user.id), &token)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error_code, "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let admin = seed_verified(&repo, Role::Admin).await.expect("Seed failed");
    let token = login(&server, &admin.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    let response = server
        .delete_auth(&format!("/api/admin/users/{}", admin.id), &token)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert!(error.message.contains("own account"));
}

#[tokio::test]
async fn test_admin_invalid_user_id_format() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let repo = seed_repository().await.expect("Failed to open repository");
    let admin = seed_verified(&repo, Role::Admin).await.expect("Seed failed");
    let token = login(&server, &admin.email, SEED_PASSWORD)
        .await
        .expect("Login failed");

    let response = server
        .get_auth("/api/admin/users/not-a-uuid", &token)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error_code, "INVALID_PATH_PARAMETER");
}
