mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_user, get_auth, post_json, post_json_auth, put_json_auth,
    user_with_token, ADMIN_ROLE_ID, CUSTOMER_ROLE_ID, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_customer_and_signs_in(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        json!({
            "email": "  New.User@Example.com ",
            "password": "long-enough-password",
            "full_name": "New User",
            "phone_number": "+91 98765-43210",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "new.user@example.com");
    assert_eq!(json["user"]["role"], "customer");
    assert_eq!(json["expires_in"], 15 * 60);

    let token = json["access_token"].as_str().unwrap();
    let me = body_json(get_auth(app, "/api/v1/auth/me", token).await).await;
    assert_eq!(me["phone_number"], "+919876543210");
    assert_eq!(me["is_active"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_duplicate_email(pool: PgPool) {
    create_user(&pool, "taken@example.com", CUSTOMER_ROLE_ID).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": "TAKEN@example.com",
            "password": "long-enough-password",
            "full_name": "Someone",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password_and_bad_email(pool: PgPool) {
    let app = build_test_app(pool);

    let short = post_json(
        app.clone(),
        "/api/v1/auth/register",
        json!({ "email": "a@example.com", "password": "short", "full_name": "A" }),
    )
    .await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);

    let bad_email = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "email": "nope", "password": "long-enough-password", "full_name": "A" }),
    )
    .await;
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);
    let json = body_json(bad_email).await;
    assert!(json["error"].as_str().unwrap().contains("email"));
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_401(pool: PgPool) {
    create_user(&pool, "asha@example.com", CUSTOMER_ROLE_ID).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "asha@example.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_role_name(pool: PgPool) {
    create_user(&pool, "boss@example.com", ADMIN_ROLE_ID).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "boss@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "admin");
    assert!(json["refresh_token"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_token_is_single_use(pool: PgPool) {
    create_user(&pool, "asha@example.com", CUSTOMER_ROLE_ID).await;
    let app = build_test_app(pool);

    let login = body_json(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "asha@example.com", "password": TEST_PASSWORD }),
        )
        .await,
    )
    .await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    let first = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    create_user(&pool, "asha@example.com", CUSTOMER_ROLE_ID).await;
    let app = build_test_app(pool);

    let login = body_json(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "asha@example.com", "password": TEST_PASSWORD }),
        )
        .await,
    )
    .await;
    let access = login["access_token"].as_str().unwrap();
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let logout = post_json_auth(app.clone(), "/api/v1/auth/logout", json!({}), access).await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    let refresh = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Admin user management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn customer_cannot_reach_admin_routes(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, token) = user_with_token(&app, &pool, "asha@example.com", CUSTOMER_ROLE_ID).await;

    let response = get_auth(app, "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_user_cannot_log_in(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, admin_token) = user_with_token(&app, &pool, "boss@example.com", ADMIN_ROLE_ID).await;
    let customer = create_user(&pool, "asha@example.com", CUSTOMER_ROLE_ID).await;

    let update = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}", customer.id),
        json!({ "is_active": false }),
        &admin_token,
    )
    .await;
    assert_eq!(update.status(), StatusCode::OK);

    let login = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "asha@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_cannot_deactivate_self(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (admin, token) = user_with_token(&app, &pool, "boss@example.com", ADMIN_ROLE_ID).await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/users/{}", admin.id),
        json!({ "is_active": false }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
