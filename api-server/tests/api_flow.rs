//! End-to-end flows through the full HTTP stack: router, middleware,
//! auth and the in-memory database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use api_server::db::DbService;
use api_server::{Config, JwtService, ServerState, api};

async fn test_app() -> Router {
    let db = DbService::memory().await.unwrap();
    let config = Config::with_overrides("./unused", 0);
    let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
    let state = ServerState::new(config, db.db, jwt_service);
    api::build_app(&state).with_state(state)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register(app: &Router, name: &str, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "name": name,
                "email": email,
                "password": "secret123",
                "role": role,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn seed_menu_item(app: &Router, admin_token: &str, name: &str, price: f64) -> String {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/menu",
            Some(admin_token),
            Some(json!({
                "name": name,
                "category": "main-course",
                "description": "House special",
                "price": price,
                "preparation_time": 15,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "menu create failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn order_and_payment_flow() {
    let app = test_app().await;
    let admin = register(&app, "Admin", "admin@example.com", "admin").await;
    let customer = register(&app, "Carol", "carol@example.com", "customer").await;

    let item_id = seed_menu_item(&app, &admin, "Paella", 24.5).await;

    // Place a takeaway order; totals come from the menu
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/orders",
            Some(&customer),
            Some(json!({
                "items": [{"menu_item": item_id, "quantity": 2}],
                "order_type": "takeaway",
                "payment_method": "card",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "order create failed: {body}");
    let order_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["total_amount"].as_f64().unwrap(), 49.0);
    assert!(body["data"]["order_number"].as_str().unwrap().starts_with("ORD"));

    // Card payment with full details succeeds and confirms the order
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/payments/process",
            Some(&customer),
            Some(json!({
                "order_id": order_id,
                "payment_method": "card",
                "payment_details": {
                    "card_number": "4111111111111111",
                    "expiry_date": "12/27",
                    "cvv": "123",
                },
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "payment failed: {body}");
    assert_eq!(body["data"]["payment_status"], "paid");
    assert_eq!(body["data"]["order"]["status"], "confirmed");
    assert!(body["data"]["transaction_id"].as_str().unwrap().starts_with("TXN"));

    // Paying twice is rejected
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/payments/process",
            Some(&customer),
            Some(json!({"order_id": order_id, "payment_method": "cash"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // History shows the paid order
    let (status, body) = send(
        &app,
        request(Method::GET, "/api/payments/history", Some(&customer), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["orders"].as_array().unwrap().len(), 1);

    // Admin refund cancels the order
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/payments/{order_id}/refund"),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "refund failed: {body}");
    assert_eq!(body["data"]["refund_amount"].as_f64().unwrap(), 49.0);
    assert!(body["data"]["transaction_id"].as_str().unwrap().starts_with("REF"));
}

#[tokio::test]
async fn kitchen_status_pipeline() {
    let app = test_app().await;
    let admin = register(&app, "Admin", "admin@example.com", "admin").await;
    let chef = register(&app, "Chef", "chef@example.com", "chef").await;
    let customer = register(&app, "Carol", "carol@example.com", "customer").await;

    let item_id = seed_menu_item(&app, &admin, "Ramen", 13.0).await;
    let (_, body) = send(
        &app,
        request(
            Method::POST,
            "/api/orders",
            Some(&customer),
            Some(json!({
                "items": [{"menu_item": item_id, "quantity": 1}],
                "order_type": "dine-in",
                "table_number": 4,
                "payment_method": "cash",
            })),
        ),
    )
    .await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    // Customers cannot drive the kitchen pipeline
    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/orders/{order_id}/status"),
            Some(&customer),
            Some(json!({"status": "confirmed"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for step in ["confirmed", "preparing", "ready", "completed"] {
        let (status, body) = send(
            &app,
            request(
                Method::PUT,
                &format!("/api/orders/{order_id}/status"),
                Some(&chef),
                Some(json!({"status": step})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "transition to {step} failed: {body}");
        assert_eq!(body["data"]["status"], *step);
    }

    // The chef who started preparation got assigned
    let (_, body) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/orders/{order_id}"),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert!(body["data"]["assigned_chef"].as_str().unwrap().starts_with("user:"));

    // Skipping backwards is rejected
    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/orders/{order_id}/status"),
            Some(&chef),
            Some(json!({"status": "pending"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reservation_flow_and_public_slots() {
    let app = test_app().await;
    let customer = register(&app, "Carol", "carol@example.com", "customer").await;

    // The availability grid is public: 24 half-hour slots
    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/reservations/slots?date=2026-09-01&partySize=4",
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "slots failed: {body}");
    assert_eq!(body["data"].as_array().unwrap().len(), 24);

    // 2026-09-01 20:00 UTC
    let start_ms: i64 = 1_788_292_800_000;
    let booking = json!({
        "reservation_date": start_ms,
        "party_size": 4,
        "table_number": 7,
        "contact_phone": "555-0101",
    });
    let (status, body) = send(
        &app,
        request(Method::POST, "/api/reservations", Some(&customer), Some(booking.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "booking failed: {body}");
    let reservation_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["duration"].as_i64().unwrap(), 90);

    // Same table an hour later is inside the conflict window
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/reservations",
            Some(&customer),
            Some(json!({
                "reservation_date": start_ms + 60 * 60 * 1000,
                "party_size": 2,
                "table_number": 7,
                "contact_phone": "555-0102",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "expected conflict: {body}");

    // Cancelling frees the table for the conflicting window
    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/reservations/{reservation_id}/cancel"),
            Some(&customer),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/reservations",
            Some(&customer),
            Some(booking),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn auth_and_role_boundaries() {
    let app = test_app().await;
    let customer = register(&app, "Carol", "carol@example.com", "customer").await;

    // Public reads work without a token
    let (status, _) = send(&app, request(Method::GET, "/api/menu", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);

    // Protected reads do not
    let (status, _) = send(&app, request(Method::GET, "/api/orders", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/orders", Some("not-a-token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Customers cannot touch admin surfaces
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/inventory",
            Some(&customer),
            Some(json!({
                "name": "Flour",
                "category": "grains",
                "current_stock": 10.0,
                "unit": "kg",
                "min_stock_level": 2.0,
                "cost_per_unit": 1.2,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/auth/users", Some(&customer), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Duplicate registration is a conflict
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Carol Again",
                "email": "carol@example.com",
                "password": "secret123",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn feedback_moderation_flow() {
    let app = test_app().await;
    let admin = register(&app, "Admin", "admin@example.com", "admin").await;
    let customer = register(&app, "Carol", "carol@example.com", "customer").await;

    let item_id = seed_menu_item(&app, &admin, "Gyoza", 8.0).await;
    let (_, body) = send(
        &app,
        request(
            Method::POST,
            "/api/orders",
            Some(&customer),
            Some(json!({
                "items": [{"menu_item": item_id, "quantity": 1}],
                "order_type": "takeaway",
                "payment_method": "cash",
            })),
        ),
    )
    .await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/feedback",
            Some(&customer),
            Some(json!({
                "order_id": order_id,
                "rating": 5,
                "comment": "Great dumplings",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "feedback failed: {body}");
    let feedback_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["is_approved"], false);

    // Unapproved feedback stays off the public listing
    let (_, body) = send(&app, request(Method::GET, "/api/feedback", None, None)).await;
    assert_eq!(body["data"]["feedback"].as_array().unwrap().len(), 0);

    // A second submission for the same order is rejected
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/feedback",
            Some(&customer),
            Some(json!({"order_id": order_id, "rating": 1})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Approval publishes it, with averages
    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/feedback/{feedback_id}"),
            Some(&admin),
            Some(json!({"is_approved": true})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, request(Method::GET, "/api/feedback", None, None)).await;
    assert_eq!(body["data"]["feedback"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["averages"]["avgRating"].as_f64().unwrap(), 5.0);
    assert_eq!(body["data"]["averages"]["totalReviews"].as_i64().unwrap(), 1);
}
