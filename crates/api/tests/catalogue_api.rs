mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get, post_json_auth, put_json_auth, seed_catalogue,
    user_with_token, ADMIN_ROLE_ID, CUSTOMER_ROLE_ID, VENDOR_ROLE_ID,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Destinations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_destination_with_derived_slug(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, token) = user_with_token(&app, &pool, "boss@example.com", ADMIN_ROLE_ID).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/destinations",
        json!({ "name": "Rishikesh & Around", "country": "India" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["slug"], "rishikesh-around");

    let by_slug = get(app, "/api/v1/destinations/by-slug/rishikesh-around").await;
    assert_eq!(by_slug.status(), StatusCode::OK);
    let json = body_json(by_slug).await;
    assert_eq!(json["name"], "Rishikesh & Around");
    assert!(json["experiences"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_destination_slug_is_409(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, token) = user_with_token(&app, &pool, "boss@example.com", ADMIN_ROLE_ID).await;

    let body = json!({ "name": "Goa" });
    let first = post_json_auth(
        app.clone(),
        "/api/v1/admin/destinations",
        body.clone(),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = post_json_auth(app, "/api/v1/admin/destinations", body, &token).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vendor_cannot_create_destination(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, token) = user_with_token(&app, &pool, "vendor@example.com", VENDOR_ROLE_ID).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/destinations",
        json!({ "name": "Goa" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Experiences and activities
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn vendor_builds_experience_activity_and_slots(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (vendor, token) = user_with_token(&app, &pool, "vendor@example.com", VENDOR_ROLE_ID).await;

    let experience = post_json_auth(
        app.clone(),
        "/api/v1/experiences",
        json!({ "title": "Bungee at Mohan Chatti", "price": 350_000, "category": "adventure" }),
        &token,
    )
    .await;
    assert_eq!(experience.status(), StatusCode::CREATED);
    let experience = body_json(experience).await;
    assert_eq!(experience["vendor_id"], vendor.id);
    let experience_id = experience["id"].as_i64().unwrap();

    let activity = post_json_auth(
        app.clone(),
        &format!("/api/v1/experiences/{experience_id}/activities"),
        json!({ "name": "Single jump", "price": 350_000, "discounted_price": 320_000 }),
        &token,
    )
    .await;
    assert_eq!(activity.status(), StatusCode::CREATED);
    let activity_id = body_json(activity).await["id"].as_i64().unwrap();

    let slot = post_json_auth(
        app.clone(),
        &format!("/api/v1/activities/{activity_id}/time-slots"),
        json!({ "start_time": "09:00:00", "end_time": "10:00:00", "capacity": 6 }),
        &token,
    )
    .await;
    assert_eq!(slot.status(), StatusCode::CREATED);

    let detail = get(app.clone(), &format!("/api/v1/experiences/{experience_id}")).await;
    let detail = body_json(detail).await;
    assert_eq!(detail["title"], "Bungee at Mohan Chatti");
    assert_eq!(detail["activities"].as_array().unwrap().len(), 1);

    let slots = get(app, &format!("/api/v1/activities/{activity_id}/time-slots")).await;
    let slots = body_json(slots).await;
    assert_eq!(slots["data"].as_array().unwrap().len(), 1);
    assert_eq!(slots["data"][0]["capacity"], 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn activity_price_above_ceiling_is_400(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (vendor, token) = user_with_token(&app, &pool, "vendor@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, vendor.id).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/experiences/{}/activities", catalogue.experience.id),
        json!({ "name": "Gold jump", "price": 100_000_000_000_000_000_i64 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let response = put_json_auth(
        app,
        &format!("/api/v1/activities/{}", catalogue.activity.id),
        json!({ "price": 100_000_000_001_i64 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn customer_cannot_create_experience(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_, token) = user_with_token(&app, &pool, "asha@example.com", CUSTOMER_ROLE_ID).await;

    let response = post_json_auth(
        app,
        "/api/v1/experiences",
        json!({ "title": "Nope", "price": 100 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_vendor_cannot_edit_experience(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (owner, _) = user_with_token(&app, &pool, "owner@example.com", VENDOR_ROLE_ID).await;
    let (_, rival_token) = user_with_token(&app, &pool, "rival@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, owner.id).await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/experiences/{}", catalogue.experience.id),
        json!({ "title": "Hijacked" }),
        &rival_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_experience_leaves_public_catalogue(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (owner, token) = user_with_token(&app, &pool, "owner@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, owner.id).await;
    let uri = format!("/api/v1/experiences/{}", catalogue.experience.id);

    let listed = body_json(get(app.clone(), "/api/v1/experiences").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(get(app.clone(), &uri).await.status(), StatusCode::NOT_FOUND);
    let listed = body_json(get(app, "/api/v1/experiences").await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn experience_search_filters_by_title(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (owner, _) = user_with_token(&app, &pool, "owner@example.com", VENDOR_ROLE_ID).await;
    seed_catalogue(&pool, owner.id).await;

    let hit = body_json(get(app.clone(), "/api/v1/experiences?search=raft").await).await;
    assert_eq!(hit["data"].as_array().unwrap().len(), 1);
    let miss = body_json(get(app, "/api/v1/experiences?search=skydiving").await).await;
    assert!(miss["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Time slots
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn slot_window_must_end_after_start(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (owner, token) = user_with_token(&app, &pool, "owner@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, owner.id).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/activities/{}/time-slots", catalogue.activity.id),
        json!({ "start_time": "12:00:00", "end_time": "11:00:00", "capacity": 5 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slot_capacity_update_is_validated(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (owner, token) = user_with_token(&app, &pool, "owner@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, owner.id).await;
    let uri = format!("/api/v1/time-slots/{}", catalogue.morning.id);

    let zero = put_json_auth(app.clone(), &uri, json!({ "capacity": 0 }), &token).await;
    assert_eq!(zero.status(), StatusCode::BAD_REQUEST);

    let ok = put_json_auth(app, &uri, json!({ "capacity": 12 }), &token).await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["capacity"], 12);
}
