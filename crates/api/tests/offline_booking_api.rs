mod common;

use axum::http::StatusCode;
use common::{
    body_json, contact_json, future_date, get, get_auth, post_json_auth, seed_catalogue,
    user_with_token, Catalogue, ADMIN_ROLE_ID, CUSTOMER_ROLE_ID, UNIT_PRICE, VENDOR_ROLE_ID,
};
use serde_json::{json, Value};
use sqlx::PgPool;

fn offline_body(catalogue: &Catalogue, slot_id: i64, participants: i32) -> Value {
    json!({
        "experience_id": catalogue.experience.id,
        "activity_id": catalogue.activity.id,
        "booking_date": future_date(3),
        "time_slot_id": slot_id,
        "participants": participants,
        "contact": contact_json(),
        "note": "Paid cash at the counter",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vendor_books_walk_in_customer_at_list_price(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (vendor, token) = user_with_token(&app, &pool, "vendor@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, vendor.id).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/vendor/bookings",
        offline_body(&catalogue, catalogue.morning.id, 2),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let booking = body_json(response).await;
    assert_eq!(booking["is_offline"], true);
    assert_eq!(booking["user_id"], Value::Null);
    assert_eq!(booking["created_by"], vendor.id);
    assert_eq!(booking["total_amount"], UNIT_PRICE * 2);
    assert_eq!(booking["discount_amount"], 0);
    assert_eq!(booking["participants"].as_array().unwrap().len(), 1);

    let listed = body_json(get_auth(app, "/api/v1/vendor/bookings", &token).await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn amount_collected_overrides_total(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (vendor, token) = user_with_token(&app, &pool, "vendor@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, vendor.id).await;

    let mut body = offline_body(&catalogue, catalogue.morning.id, 2);
    body["amount_collected"] = json!(250_000);
    let response = post_json_auth(app.clone(), "/api/v1/vendor/bookings", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let booking = body_json(response).await;
    assert_eq!(booking["subtotal_amount"], UNIT_PRICE * 2);
    assert_eq!(booking["discount_amount"], UNIT_PRICE * 2 - 250_000);
    assert_eq!(booking["total_amount"], 250_000);

    let mut negative = offline_body(&catalogue, catalogue.morning.id, 1);
    negative["amount_collected"] = json!(-1);
    let response = post_json_auth(app, "/api/v1/vendor/bookings", negative, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn offline_bookings_share_slot_capacity(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (vendor, token) = user_with_token(&app, &pool, "vendor@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, vendor.id).await;

    let first = post_json_auth(
        app.clone(),
        "/api/v1/vendor/bookings",
        offline_body(&catalogue, catalogue.afternoon.id, 3),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_auth(
        app.clone(),
        "/api/v1/vendor/bookings",
        offline_body(&catalogue, catalogue.afternoon.id, 2),
        &token,
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let availability = body_json(
        get(
            app,
            &format!(
                "/api/v1/activities/{}/availability?date={}",
                catalogue.activity.id,
                future_date(3)
            ),
        )
        .await,
    )
    .await;
    assert_eq!(availability["slots"][1]["available"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vendor_cannot_book_foreign_experience(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (owner, _) = user_with_token(&app, &pool, "owner@example.com", VENDOR_ROLE_ID).await;
    let (_, rival_token) = user_with_token(&app, &pool, "rival@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, owner.id).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/vendor/bookings",
        offline_body(&catalogue, catalogue.morning.id, 1),
        &rival_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let listed = body_json(get_auth(app, "/api/v1/vendor/bookings", &rival_token).await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_books_any_experience_and_sees_all(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (owner, _) = user_with_token(&app, &pool, "owner@example.com", VENDOR_ROLE_ID).await;
    let (_, admin_token) = user_with_token(&app, &pool, "boss@example.com", ADMIN_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, owner.id).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/vendor/bookings",
        offline_body(&catalogue, catalogue.morning.id, 1),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let listed = body_json(get_auth(app, "/api/v1/vendor/bookings", &admin_token).await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn customer_cannot_use_vendor_desk(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (owner, _) = user_with_token(&app, &pool, "owner@example.com", VENDOR_ROLE_ID).await;
    let (_, token) = user_with_token(&app, &pool, "asha@example.com", CUSTOMER_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, owner.id).await;

    let response = post_json_auth(
        app,
        "/api/v1/vendor/bookings",
        offline_body(&catalogue, catalogue.morning.id, 1),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_in_lookup_by_reference(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (owner, token) = user_with_token(&app, &pool, "owner@example.com", VENDOR_ROLE_ID).await;
    let (_, rival_token) = user_with_token(&app, &pool, "rival@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, owner.id).await;

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/vendor/bookings",
            offline_body(&catalogue, catalogue.morning.id, 1),
            &token,
        )
        .await,
    )
    .await;
    let reference = created["reference"].as_str().unwrap();
    let uri = format!("/api/v1/vendor/bookings/by-reference/{}", reference.to_lowercase());

    let found = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(found.status(), StatusCode::OK);
    let found = body_json(found).await;
    assert_eq!(found["id"], created["id"]);
    assert_eq!(found["participants"].as_array().unwrap().len(), 1);

    let hidden = get_auth(app, &uri, &rival_token).await;
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);
}
