mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_user, future_date, get, insert_confirmed_booking, past_date,
    seed_catalogue, VENDOR_ROLE_ID,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_day_offers_full_capacity(pool: PgPool) {
    let vendor = create_user(&pool, "vendor@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, vendor.id).await;
    let app = build_test_app(pool);
    let date = future_date(10);

    let response = get(
        app,
        &format!("/api/v1/activities/{}/availability?date={date}", catalogue.activity.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["participants"], 1);
    assert_eq!(json["date_bookable"], true);
    let slots = json["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["slot_id"], catalogue.morning.id);
    assert_eq!(slots[0]["available"], 10);
    assert_eq!(slots[0]["selectable"], true);
    assert_eq!(slots[1]["available"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn party_larger_than_remaining_spots_is_not_selectable(pool: PgPool) {
    let vendor = create_user(&pool, "vendor@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, vendor.id).await;
    let date = future_date(10);
    insert_confirmed_booking(&pool, &catalogue, catalogue.afternoon.id, date, 3, None).await;
    let app = build_test_app(pool);

    let json = body_json(
        get(
            app,
            &format!(
                "/api/v1/activities/{}/availability?date={date}&participants=2",
                catalogue.activity.id
            ),
        )
        .await,
    )
    .await;

    let afternoon = &json["slots"][1];
    assert_eq!(afternoon["booked"], 3);
    assert_eq!(afternoon["available"], 1);
    assert_eq!(afternoon["selectable"], false);
    assert_eq!(json["slots"][0]["selectable"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bookings_on_other_dates_do_not_count(pool: PgPool) {
    let vendor = create_user(&pool, "vendor@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, vendor.id).await;
    insert_confirmed_booking(&pool, &catalogue, catalogue.afternoon.id, future_date(11), 4, None)
        .await;
    let app = build_test_app(pool);

    let json = body_json(
        get(
            app,
            &format!(
                "/api/v1/activities/{}/availability?date={}",
                catalogue.activity.id,
                future_date(10)
            ),
        )
        .await,
    )
    .await;
    assert_eq!(json["slots"][1]["available"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn past_date_disables_every_slot(pool: PgPool) {
    let vendor = create_user(&pool, "vendor@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, vendor.id).await;
    let app = build_test_app(pool);

    let json = body_json(
        get(
            app,
            &format!(
                "/api/v1/activities/{}/availability?date={}",
                catalogue.activity.id,
                past_date(3)
            ),
        )
        .await,
    )
    .await;

    assert_eq!(json["date_bookable"], false);
    for slot in json["slots"].as_array().unwrap() {
        assert_eq!(slot["selectable"], false);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_party_size_is_400(pool: PgPool) {
    let vendor = create_user(&pool, "vendor@example.com", VENDOR_ROLE_ID).await;
    let catalogue = seed_catalogue(&pool, vendor.id).await;
    let app = build_test_app(pool);
    let base = format!(
        "/api/v1/activities/{}/availability?date={}",
        catalogue.activity.id,
        future_date(10)
    );

    let zero = get(app.clone(), &format!("{base}&participants=0")).await;
    assert_eq!(zero.status(), StatusCode::BAD_REQUEST);
    let huge = get(app, &format!("{base}&participants=51")).await;
    assert_eq!(huge.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_activity_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/activities/424242/availability?date={}", future_date(1)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
