//! API surface tests
//!
//! Each test drives the real router, full middleware stack included,
//! through `tower::ServiceExt::oneshot` against an in-memory database.
//! No sockets; requests and responses stay in process.

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use cortado_server::auth::JwtConfig;
use cortado_server::db::DbService;
use cortado_server::{Config, ServerState, build_app};

fn test_config() -> Config {
    Config {
        http_port: 0,
        database_path: ":memory:".into(),
        jwt: JwtConfig::default(),
        environment: "development".into(),
        log_dir: None,
        bootstrap_admin_username: "admin".into(),
        bootstrap_admin_password: None,
        seed_demo_data: false,
    }
}

async fn test_app() -> Router {
    let db = DbService::in_memory().await.expect("in-memory database");
    let state = ServerState::with_pool(test_config(), db.pool);
    build_app(state)
}

fn request(method: Method, path: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("oneshot");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

async fn register(app: &Router, username: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": username, "password": password })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": username, "password": password })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token").to_string()
}

/// Register the first account (granted manager) and log it in
async fn manager_token(app: &Router) -> String {
    register(app, "manager", "secret-1").await;
    login(app, "manager", "secret-1").await
}

async fn create_category(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/categories",
            Some(token),
            Some(json!({ "name": name })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create category failed: {body}");
    body["id"].as_i64().expect("category id")
}

async fn create_product(app: &Router, token: &str, category_id: i64, name: &str, price: i64) -> i64 {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/products",
            Some(token),
            Some(json!({ "name": name, "price": price, "category_id": category_id })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create product failed: {body}");
    body["id"].as_i64().expect("product id")
}

/// Menu with an espresso (35 000) and a bạc xỉu (45 000); returns their ids
async fn seed_menu(app: &Router, token: &str) -> (i64, i64) {
    let category = create_category(app, token, "Cà Phê").await;
    let espresso = create_product(app, token, category, "Espresso", 35_000).await;
    let bac_xiu = create_product(app, token, category, "Bạc Xỉu", 45_000).await;
    (espresso, bac_xiu)
}

/// Anonymous kiosk submission; returns the new order id
async fn submit_kiosk_order(app: &Router, items: Value) -> i64 {
    let (status, order) = send(
        app,
        request(
            Method::POST,
            "/api/orders",
            None,
            Some(json!({ "items": items })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "order failed: {order}");
    order["id"].as_i64().expect("order id")
}

#[tokio::test]
async fn health_is_public_and_probes_the_database() {
    let app = test_app().await;

    let (status, body) = send(&app, request(Method::GET, "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn first_registered_account_runs_the_cafe() {
    let app = test_app().await;

    let first = register(&app, "alice", "secret-1").await;
    assert_eq!(first["role"], "manager");
    assert_eq!(first["is_active"], true);

    let second = register(&app, "bob", "secret-2").await;
    assert_eq!(second["role"], "staff");

    // A client-supplied role field is ignored, not honored
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "mallory", "password": "secret-3", "role": "manager" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "staff");
}

#[tokio::test]
async fn login_failures_share_one_error() {
    let app = test_app().await;
    register(&app, "alice", "secret-1").await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "wrong" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    // Unknown usernames are indistinguishable from wrong passwords
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "nobody", "password": "wrong" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);
}

#[tokio::test]
async fn deactivated_account_cannot_login() {
    let app = test_app().await;
    let manager = manager_token(&app).await;
    let staff = register(&app, "carol", "secret-2").await;

    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/users/{}", staff["id"]),
            Some(&manager),
            Some(json!({ "is_active": false })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "carol", "password": "secret-2" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1007);
}

#[tokio::test]
async fn catalog_writes_are_manager_only_reads_public() {
    let app = test_app().await;
    let manager = manager_token(&app).await;
    register(&app, "bob", "secret-2").await;
    let staff = login(&app, "bob", "secret-2").await;

    // Anonymous write: 401
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/categories",
            None,
            Some(json!({ "name": "Cà Phê" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    // Staff write: 403
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/categories",
            Some(&staff),
            Some(json!({ "name": "Cà Phê" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    // Manager write succeeds; duplicate names conflict
    let id = create_category(&app, &manager, "Cà Phê").await;
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/categories",
            Some(&manager),
            Some(json!({ "name": "Cà Phê" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6103);

    // Reads stay anonymous
    let (status, body) = send(&app, request(Method::GET, "/api/categories", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 1);

    let (status, _) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/products/by-category/{id}"),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn kiosk_order_keeps_captured_prices() {
    let app = test_app().await;
    let manager = manager_token(&app).await;
    let (espresso, bac_xiu) = seed_menu(&app, &manager).await;

    // Anonymous kiosk submission
    let (status, order) = send(
        &app,
        request(
            Method::POST,
            "/api/orders",
            None,
            Some(json!({
                "items": [
                    { "product_id": espresso, "quantity": 2 },
                    { "product_id": bac_xiu, "quantity": 1, "notes": "less ice" },
                ]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "order failed: {order}");
    assert_eq!(order["total_amount"], 115_000);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["payment_method"], "cash");
    assert_eq!(order["created_by"], "Unknown User");
    let order_id = order["id"].as_i64().expect("order id");

    // Reprice the espresso; the order must keep what it charged
    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/products/{espresso}"),
            Some(&manager),
            Some(json!({ "price": 50_000 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, order) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/orders/{order_id}"),
            Some(&manager),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["total_amount"], 115_000);
    let items = order["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["unit_price"], 35_000);
    assert_eq!(items[0]["product_name"], "Espresso");
    assert_eq!(items[1]["notes"], "less ice");
}

#[tokio::test]
async fn kiosk_submission_rejects_bad_carts_atomically() {
    let app = test_app().await;
    let manager = manager_token(&app).await;
    let (espresso, _) = seed_menu(&app, &manager).await;

    // Empty cart
    let (status, body) = send(
        &app,
        request(Method::POST, "/api/orders", None, Some(json!({ "items": [] }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    // One good line and one unknown product: nothing is persisted
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/orders",
            None,
            Some(json!({
                "items": [
                    { "product_id": espresso, "quantity": 1 },
                    { "product_id": 9_999, "quantity": 1 },
                ]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6002);

    let (status, orders) = send(
        &app,
        request(Method::GET, "/api/orders", Some(&manager), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(orders.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn staff_token_on_the_kiosk_route_is_recorded() {
    let app = test_app().await;
    let manager = manager_token(&app).await;
    let (espresso, _) = seed_menu(&app, &manager).await;
    register(&app, "dave", "secret-2").await;
    let staff = login(&app, "dave", "secret-2").await;

    let (status, order) = send(
        &app,
        request(
            Method::POST,
            "/api/orders",
            Some(&staff),
            Some(json!({ "items": [{ "product_id": espresso, "quantity": 1 }] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["created_by"], "dave");

    // A garbage token degrades to an anonymous submission
    let (status, order) = send(
        &app,
        request(
            Method::POST,
            "/api/orders",
            Some("not-a-jwt"),
            Some(json!({ "items": [{ "product_id": espresso, "quantity": 1 }] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["created_by"], "Unknown User");
}

#[tokio::test]
async fn order_reads_require_a_token() {
    let app = test_app().await;
    let manager = manager_token(&app).await;

    let (status, body) = send(&app, request(Method::GET, "/api/orders", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/orders/999", Some(&manager), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn status_changes_are_manager_gated_and_validated() {
    let app = test_app().await;
    let manager = manager_token(&app).await;
    let (espresso, _) = seed_menu(&app, &manager).await;
    register(&app, "erin", "secret-2").await;
    let staff = login(&app, "erin", "secret-2").await;

    let (_, order) = send(
        &app,
        request(
            Method::POST,
            "/api/orders",
            None,
            Some(json!({ "items": [{ "product_id": espresso, "quantity": 1 }] })),
        ),
    )
    .await;
    let order_id = order["id"].as_i64().expect("order id");

    // Staff may look but not move
    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/orders/{order_id}/status"),
            Some(&staff),
            Some(json!({ "status": "completed" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    // Manager completes the order
    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/orders/{order_id}/status"),
            Some(&manager),
            Some(json!({ "status": "completed" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    // Completed is terminal
    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/orders/{order_id}/status"),
            Some(&manager),
            Some(json!({ "status": "cancelled" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    // Unknown statuses are transition errors, not parse failures
    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/orders/{order_id}/status"),
            Some(&manager),
            Some(json!({ "status": "shipped" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    // Requesting the current status is a no-op, not an error
    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/orders/{order_id}/status"),
            Some(&manager),
            Some(json!({ "status": "completed" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn dashboard_reflects_completed_revenue_only() {
    let app = test_app().await;
    let manager = manager_token(&app).await;
    let (espresso, bac_xiu) = seed_menu(&app, &manager).await;

    let completed = submit_kiosk_order(
        &app,
        json!([
            { "product_id": espresso, "quantity": 2 },
            { "product_id": bac_xiu, "quantity": 1 },
        ]),
    )
    .await;
    let cancelled = submit_kiosk_order(&app, json!([{ "product_id": espresso, "quantity": 1 }])).await;
    let _pending = submit_kiosk_order(&app, json!([{ "product_id": bac_xiu, "quantity": 1 }])).await;

    for (id, status) in [(completed, "completed"), (cancelled, "cancelled")] {
        let (code, _) = send(
            &app,
            request(
                Method::PUT,
                &format!("/api/orders/{id}/status"),
                Some(&manager),
                Some(json!({ "status": status })),
            ),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
    }

    let (status, stats) = send(
        &app,
        request(Method::GET, "/api/dashboard/stats", Some(&manager), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_revenue"], 115_000);
    assert_eq!(stats["total_orders"], 3);
    assert_eq!(stats["status_counts"]["pending"], 1);
    assert_eq!(stats["status_counts"]["completed"], 1);
    assert_eq!(stats["status_counts"]["cancelled"], 1);

    let daily = stats["daily_stats"].as_array().expect("daily stats");
    assert_eq!(daily.len(), 7);
    let window_total: i64 = daily.iter().map(|d| d["revenue"].as_i64().unwrap()).sum();
    assert_eq!(window_total, 115_000);
}

#[tokio::test]
async fn user_admin_is_manager_only() {
    let app = test_app().await;
    let manager = manager_token(&app).await;
    register(&app, "frank", "secret-2").await;
    let staff = login(&app, "frank", "secret-2").await;

    let (status, body) = send(&app, request(Method::GET, "/api/users", Some(&staff), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    // Manager creates an account; passwords below the minimum are rejected
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/users",
            Some(&manager),
            Some(json!({ "username": "grace", "password": "short" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/users",
            Some(&manager),
            Some(json!({ "username": "grace", "password": "secret-3" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "staff");

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/users",
            Some(&manager),
            Some(json!({ "username": "grace", "password": "secret-4" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);
}

#[tokio::test]
async fn managers_cannot_delete_themselves() {
    let app = test_app().await;
    let manager = manager_token(&app).await;

    let (_, me) = send(&app, request(Method::GET, "/api/auth/me", Some(&manager), None)).await;
    let my_id = me["id"].as_i64().expect("user id");

    let (status, body) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/users/{my_id}"),
            Some(&manager),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 8003);
}

#[tokio::test]
async fn deleting_a_user_leaves_their_orders_readable() {
    let app = test_app().await;
    let manager = manager_token(&app).await;
    let (espresso, _) = seed_menu(&app, &manager).await;
    let staff_user = register(&app, "henry", "secret-2").await;
    let staff = login(&app, "henry", "secret-2").await;

    let (_, order) = send(
        &app,
        request(
            Method::POST,
            "/api/orders",
            Some(&staff),
            Some(json!({ "items": [{ "product_id": espresso, "quantity": 1 }] })),
        ),
    )
    .await;
    assert_eq!(order["created_by"], "henry");
    let order_id = order["id"].as_i64().expect("order id");

    let (status, deleted) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/users/{}", staff_user["id"]),
            Some(&manager),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, Value::Bool(true));

    let (status, order) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/orders/{order_id}"),
            Some(&manager),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["created_by"], "Unknown User");
    assert_eq!(order["total_amount"], 35_000);
}

#[tokio::test]
async fn me_reads_fresh_account_state() {
    let app = test_app().await;
    let manager = manager_token(&app).await;
    let staff_user = register(&app, "iris", "secret-2").await;
    let staff = login(&app, "iris", "secret-2").await;

    // Promote iris after the token was issued
    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/users/{}", staff_user["id"]),
            Some(&manager),
            Some(json!({ "role": "manager" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, me) = send(&app, request(Method::GET, "/api/auth/me", Some(&staff), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "iris");
    assert_eq!(me["role"], "manager");
}
