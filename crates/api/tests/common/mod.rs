#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use bucketlist_api::auth::jwt::JwtConfig;
use bucketlist_api::auth::password::hash_password;
use bucketlist_api::config::{ServerConfig, DEFAULT_BOOKING_UTC_OFFSET_MINUTES};
use bucketlist_api::payments::{GatewayOrder, PaymentError, PaymentGateway};
use bucketlist_api::router::build_app_router;
use bucketlist_api::state::AppState;
use bucketlist_core::payment_signature::{compute_checkout_signature, verify_checkout_signature};
use bucketlist_core::types::{DbId, MinorAmount};
use bucketlist_core::booking::generate_booking_reference;
use bucketlist_core::participant::ParticipantDetails;
use bucketlist_db::models::activity::{Activity, CreateActivity};
use bucketlist_db::models::booking::{Booking, BookingInsertOutcome, NewBooking};
use bucketlist_db::models::experience::{CreateExperience, Experience};
use bucketlist_db::models::time_slot::{CreateTimeSlot, TimeSlot};
use bucketlist_db::models::user::{CreateUser, User};
use bucketlist_db::repositories::{
    ActivityRepo, BookingRepo, ExperienceRepo, TimeSlotRepo, UserRepo,
};
use bucketlist_events::EventBus;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const ADMIN_ROLE_ID: DbId = 1;
pub const VENDOR_ROLE_ID: DbId = 2;
pub const CUSTOMER_ROLE_ID: DbId = 3;

pub const TEST_PASSWORD: &str = "test_password_123!";
pub const TEST_KEY_SECRET: &str = "rzp_test_secret";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        booking_utc_offset_minutes: DEFAULT_BOOKING_UTC_OFFSET_MINUTES,
        jwt: JwtConfig {
            secret: "test-jwt-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// In-memory gateway. Orders live in a map; signatures use [`TEST_KEY_SECRET`].
#[derive(Default)]
pub struct FakeGateway {
    orders: Mutex<HashMap<String, GatewayOrder>>,
    next_id: AtomicU64,
}

impl FakeGateway {
    /// Register an order directly, e.g. one with a tampered amount.
    pub fn insert_order(&self, id: &str, amount: MinorAmount, currency: &str) {
        self.orders.lock().unwrap().insert(
            id.to_string(),
            GatewayOrder {
                id: id.to_string(),
                amount,
                currency: currency.to_string(),
                receipt: None,
                status: "paid".to_string(),
            },
        );
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    fn key_id(&self) -> &str {
        "rzp_test_key"
    }

    async fn create_order(
        &self,
        amount: MinorAmount,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let order = GatewayOrder {
            id: format!("order_test_{n}"),
            amount,
            currency: currency.to_string(),
            receipt: Some(receipt.to_string()),
            status: "created".to_string(),
        };
        self.orders
            .lock()
            .unwrap()
            .insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, PaymentError> {
        self.orders
            .lock()
            .unwrap()
            .get(order_id)
            .cloned()
            .ok_or_else(|| PaymentError::ApiError {
                status: 400,
                body: format!("The id provided does not exist: {order_id}"),
            })
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_checkout_signature(TEST_KEY_SECRET, order_id, payment_id, signature)
    }
}

/// A router plus handles on its shared state.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub gateway: Arc<FakeGateway>,
}

/// Build the full application with the production middleware stack and a
/// fake payment gateway.
pub fn spawn_test_app(pool: PgPool) -> TestApp {
    let config = test_config();
    let gateway = Arc::new(FakeGateway::default());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
        payments: gateway.clone(),
    };
    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
        gateway,
    }
}

pub fn build_test_app(pool: PgPool) -> Router {
    spawn_test_app(pool).router
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(
    method: &str,
    uri: &str,
    body: &serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("POST", uri, &body, None)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request("POST", uri, &body, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request("PUT", uri, &body, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, role_id: DbId) -> User {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        full_name: "Test User".to_string(),
        phone_number: None,
        role_id,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login(app: Router, email: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    body_json(response).await["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

/// Insert a user and return `(user, access_token)`.
pub async fn user_with_token(
    app: &Router,
    pool: &PgPool,
    email: &str,
    role_id: DbId,
) -> (User, String) {
    let user = create_user(pool, email, role_id).await;
    let token = login(app.clone(), email).await;
    (user, token)
}

/// An experience with one activity priced at 1,500.00 INR per person and
/// two slots: 09:00-11:00 (capacity 10) and 14:00-16:00 (capacity 4).
pub struct Catalogue {
    pub experience: Experience,
    pub activity: Activity,
    pub morning: TimeSlot,
    pub afternoon: TimeSlot,
}

pub const UNIT_PRICE: MinorAmount = 150_000;

pub async fn seed_catalogue(pool: &PgPool, vendor_id: DbId) -> Catalogue {
    let experience = ExperienceRepo::create(
        pool,
        vendor_id,
        &CreateExperience {
            destination_id: None,
            title: "Rafting in Rishikesh".to_string(),
            description: None,
            location: Some("Rishikesh".to_string()),
            category: Some("adventure".to_string()),
            duration: Some("2 hours".to_string()),
            image_url: None,
            price: UNIT_PRICE,
            currency: None,
        },
    )
    .await
    .unwrap();

    let activity = ActivityRepo::create(
        pool,
        experience.id,
        &CreateActivity {
            name: "16 km run".to_string(),
            description: None,
            price: 180_000,
            discounted_price: Some(UNIT_PRICE),
            currency: None,
        },
    )
    .await
    .unwrap();

    let morning = slot(pool, activity.id, 9, 11, 10).await;
    let afternoon = slot(pool, activity.id, 14, 16, 4).await;

    Catalogue {
        experience,
        activity,
        morning,
        afternoon,
    }
}

pub async fn slot(
    pool: &PgPool,
    activity_id: DbId,
    start: u32,
    end: u32,
    capacity: i32,
) -> TimeSlot {
    TimeSlotRepo::create(
        pool,
        activity_id,
        &CreateTimeSlot {
            start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
            capacity,
        },
    )
    .await
    .unwrap()
}

/// A date safely in the future regardless of time zone.
pub fn future_date(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

/// A date safely in the past regardless of time zone.
pub fn past_date(days: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(days)
}

/// The `payment` object the checkout widget would return for `order_id`.
pub fn signed_payment(order_id: &str, payment_id: &str) -> serde_json::Value {
    serde_json::json!({
        "order_id": order_id,
        "payment_id": payment_id,
        "signature": compute_checkout_signature(TEST_KEY_SECRET, order_id, payment_id),
    })
}

pub fn contact_json() -> serde_json::Value {
    serde_json::json!({
        "name": "Asha Rao",
        "email": "asha@example.com",
        "phone_number": "+91 98765 43210",
    })
}

/// Insert a confirmed booking straight through the repository.
pub async fn insert_confirmed_booking(
    pool: &PgPool,
    catalogue: &Catalogue,
    slot_id: DbId,
    date: NaiveDate,
    participants: i32,
    user_id: Option<DbId>,
) -> Booking {
    let contact = ParticipantDetails {
        name: "Seeded Guest".to_string(),
        email: "guest@example.com".to_string(),
        phone_number: "9876543210".to_string(),
    };
    let total = UNIT_PRICE * i64::from(participants);
    let new_booking = NewBooking {
        reference: generate_booking_reference(),
        user_id,
        experience_id: catalogue.experience.id,
        activity_id: catalogue.activity.id,
        time_slot_id: slot_id,
        booking_date: date,
        total_participants: participants,
        subtotal_amount: total,
        discount_amount: 0,
        total_amount: total,
        currency: "INR".to_string(),
        coupon_id: None,
        contact: contact.clone(),
        participants: vec![contact],
        is_offline: true,
        payment_order_id: None,
        payment_id: None,
        note: None,
        created_by: user_id,
    };
    match BookingRepo::create_confirmed(pool, &new_booking).await.unwrap() {
        BookingInsertOutcome::Created(created) => created.booking,
        other => panic!("seed booking should fit, got {other:?}"),
    }
}
