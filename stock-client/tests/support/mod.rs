// stock-client/tests/support/mod.rs
// In-process mock of the inventory service

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use axum::extract::{Path, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde_json::{Value, json};
use stock_client::{ClientConfig, OneshotTransport, StockClient};
use tempfile::TempDir;
use tokio::sync::Notify;

pub const ADMIN: (&str, &str) = ("admin", "admin123");
pub const STAFF: (&str, &str) = ("staff", "staff123");

/// Holds a request inside the mock until the test releases it
#[derive(Debug, Default)]
pub struct Gate {
    pub arrived: Notify,
    pub release: Notify,
}

#[derive(Debug, Clone)]
struct MockUser {
    id: i64,
    username: &'static str,
    password: &'static str,
    full_name: &'static str,
    role: &'static str,
}

impl MockUser {
    fn profile(&self) -> Value {
        json!({
            "id": self.id,
            "username": self.username,
            "fullName": self.full_name,
            "email": format!("{}@example.com", self.username),
            "role": self.role,
            "active": true,
            "createdAt": "2024-01-01T09:00:00"
        })
    }
}

#[derive(Debug)]
pub struct MockState {
    users: Vec<MockUser>,
    tokens: Mutex<HashMap<String, i64>>,
    next_token: AtomicU64,
    pub product_posts: AtomicUsize,
    /// Edits and deletes that reached the service
    pub writes: AtomicUsize,
    pub fail_suppliers: AtomicBool,
    /// List endpoints answer 500 while set
    pub fail_lists: AtomicBool,
    pub last_transaction: Mutex<Option<Value>>,
    pub last_stock: Mutex<Option<(i64, i64)>>,
    transactions_gate: Mutex<Option<Arc<Gate>>>,
    me_gate: Mutex<Option<Arc<Gate>>>,
    summary_gate: Mutex<Option<(String, Arc<Gate>)>>,
}

impl MockState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            users: vec![
                MockUser {
                    id: 1,
                    username: ADMIN.0,
                    password: ADMIN.1,
                    full_name: "Store Admin",
                    role: "ADMIN",
                },
                MockUser {
                    id: 2,
                    username: STAFF.0,
                    password: STAFF.1,
                    full_name: "Floor Staff",
                    role: "STAFF",
                },
            ],
            tokens: Mutex::new(HashMap::new()),
            next_token: AtomicU64::new(1),
            product_posts: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            fail_suppliers: AtomicBool::new(false),
            fail_lists: AtomicBool::new(false),
            last_transaction: Mutex::new(None),
            last_stock: Mutex::new(None),
            transactions_gate: Mutex::new(None),
            me_gate: Mutex::new(None),
            summary_gate: Mutex::new(None),
        })
    }

    /// Server-side expiry of every issued token
    pub fn revoke_all(&self) {
        self.tokens.lock().clear();
    }

    /// The next `GET /transactions` waits for the gate and then answers 401
    pub fn gate_transactions(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.transactions_gate.lock() = Some(gate.clone());
        gate
    }

    /// The next `GET /auth/me` waits for the gate
    pub fn gate_me(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.me_gate.lock() = Some(gate.clone());
        gate
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lists_down(&self) -> bool {
        self.fail_lists.load(Ordering::SeqCst)
    }

    /// The next summary request starting at `start` waits for the gate
    pub fn gate_summary(&self, start: NaiveDate) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.summary_gate.lock() = Some((start.format("%Y-%m-%d").to_string(), gate.clone()));
        gate
    }

    fn caller(&self, headers: &HeaderMap) -> Option<MockUser> {
        let token = headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        let user_id = *self.tokens.lock().get(token)?;
        self.users.iter().find(|u| u.id == user_id).cloned()
    }
}

type Shared = State<Arc<MockState>>;

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "Error: Unauthorized").into_response()
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, "Error: Access denied").into_response()
}

fn list_unavailable() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Error: list unavailable").into_response()
}

fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("Error: {what} not found")).into_response()
}

/// Overlay the fields of `patch` onto `base`
fn merged(mut base: Value, patch: Value) -> Value {
    if let (Some(base), Value::Object(patch)) = (base.as_object_mut(), patch) {
        base.extend(patch);
    }
    base
}

fn find(list: Value, id: i64) -> Option<Value> {
    match list {
        Value::Array(items) => items.into_iter().find(|item| item["id"] == id),
        _ => None,
    }
}

macro_rules! caller {
    ($state:expr, $headers:expr) => {
        match $state.caller(&$headers) {
            Some(user) => user,
            None => return unauthorized(),
        }
    };
}

macro_rules! admin {
    ($state:expr, $headers:expr) => {{
        let user = caller!($state, $headers);
        if user.role != "ADMIN" {
            return forbidden();
        }
        user
    }};
}

// ========== Fixtures ==========

fn products() -> Value {
    json!([
        {"id": 1, "name": "Bolt", "category": "Hardware", "sku": "BLT-01", "priceIn": 10.0, "priceOut": 15.0,
         "stock": 2, "minimumStock": 5, "supplierId": 1, "supplierName": "Acme", "active": true},
        {"id": 2, "name": "Nut", "category": "Hardware", "sku": "NUT-01", "priceIn": 0.5, "priceOut": 0.8,
         "stock": 50, "minimumStock": 5, "supplierId": 1, "supplierName": "Acme", "active": true},
        {"id": 3, "name": "Washer", "sku": "WSH-01", "priceIn": 1.0, "priceOut": 1.5,
         "stock": 5, "minimumStock": 5, "active": true},
        {"id": 4, "name": "Glue", "category": "Adhesives", "sku": "GLU-01", "priceIn": 8.0, "priceOut": 12.0,
         "stock": 10, "minimumStock": 2, "supplierId": 2, "supplierName": "Globex", "active": true}
    ])
}

fn suppliers() -> Value {
    json!([
        {"id": 1, "name": "Acme", "contactPerson": "Wile E.", "email": "sales@acme.test", "active": true},
        {"id": 2, "name": "Globex", "phone": "555-0100", "active": true}
    ])
}

fn transactions() -> Vec<Value> {
    vec![
        json!({"id": 1, "productId": 1, "productName": "Bolt", "type": "IN", "quantity": 10,
               "unitPrice": 10.0, "totalPrice": 100.0, "supplierId": 1, "userId": 1,
               "username": "admin", "transactionDate": "2024-03-05T10:00:00"}),
        json!({"id": 2, "productId": 2, "productName": "Nut", "type": "OUT", "quantity": 5,
               "unitPrice": 0.8, "totalPrice": 4.0, "userId": 2,
               "username": "staff", "transactionDate": "2024-03-08T12:00:00"}),
        json!({"id": 3, "productId": 4, "productName": "Glue", "type": "IN", "quantity": 2,
               "unitPrice": 8.0, "totalPrice": 16.0, "supplierId": 2, "userId": 1,
               "username": "admin", "transactionDate": "2024-03-10T09:00:00"}),
        json!({"id": 4, "productId": 1, "productName": "Bolt", "type": "OUT", "quantity": 8,
               "unitPrice": 15.0, "totalPrice": 120.0, "userId": 2,
               "username": "staff", "transactionDate": "2024-02-01T09:00:00"}),
    ]
}

/// Washer's `lowStock` flag is deliberately wrong (5 <= 5)
fn stock_report() -> Value {
    json!([
        {"productId": 1, "productName": "Bolt", "category": "Hardware", "currentStock": 2,
         "minimumStock": 5, "stockValue": 20.0, "lowStock": true},
        {"productId": 2, "productName": "Nut", "category": "Hardware", "currentStock": 50,
         "minimumStock": 5, "stockValue": 25.0, "lowStock": false},
        {"productId": 3, "productName": "Washer", "currentStock": 5,
         "minimumStock": 5, "stockValue": 5.0, "lowStock": false},
        {"productId": 4, "productName": "Glue", "category": "Adhesives", "currentStock": 10,
         "minimumStock": 2, "stockValue": 80.0, "lowStock": false}
    ])
}

/// Second row's `netValue` disagrees with in - out
fn summary(start: &str, end: &str) -> Value {
    json!([
        {"date": start, "period": "DAILY", "totalTransactions": 3, "inTransactions": 2,
         "outTransactions": 1, "totalInValue": 100.0, "totalOutValue": 40.0, "netValue": 60.0},
        {"date": end, "period": "DAILY", "totalTransactions": 2, "inTransactions": 1,
         "outTransactions": 1, "totalInValue": 10.0, "totalOutValue": 30.0, "netValue": 0.0}
    ])
}

fn users(state: &MockState) -> Value {
    Value::Array(state.users.iter().map(MockUser::profile).collect())
}

// ========== Handlers ==========

async fn sign_in(State(state): Shared, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let Some(user) = state
        .users
        .iter()
        .find(|u| u.username == username && u.password == password)
    else {
        return (StatusCode::UNAUTHORIZED, "Error: Invalid username or password").into_response();
    };

    let token = format!("token-{}", state.next_token.fetch_add(1, Ordering::SeqCst));
    state.tokens.lock().insert(token.clone(), user.id);
    Json(json!({
        "token": token,
        "type": "Bearer",
        "id": user.id,
        "username": user.username,
        "fullName": user.full_name,
        "role": user.role
    }))
    .into_response()
}

async fn me(State(state): Shared, headers: HeaderMap) -> Response {
    let user = caller!(state, headers);
    let gate = state.me_gate.lock().take();
    if let Some(gate) = gate {
        gate.arrived.notify_one();
        gate.release.notified().await;
    }
    Json(user.profile()).into_response()
}

async fn active_products(State(state): Shared, headers: HeaderMap) -> Response {
    caller!(state, headers);
    if state.lists_down() {
        return list_unavailable();
    }
    Json(products()).into_response()
}

async fn low_stock_products(State(state): Shared, headers: HeaderMap) -> Response {
    caller!(state, headers);
    let low: Vec<Value> = products()
        .as_array()
        .into_iter()
        .flatten()
        .filter(|p| p["stock"].as_i64() <= p["minimumStock"].as_i64())
        .cloned()
        .collect();
    Json(low).into_response()
}

async fn create_product(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    admin!(state, headers);
    state.product_posts.fetch_add(1, Ordering::SeqCst);
    let mut product = body;
    product["id"] = json!(10);
    product["stock"] = json!(0);
    product["active"] = json!(true);
    Json(product).into_response()
}

async fn active_suppliers(State(state): Shared, headers: HeaderMap) -> Response {
    caller!(state, headers);
    if state.fail_suppliers.load(Ordering::SeqCst) || state.lists_down() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Error: supplier service down").into_response();
    }
    Json(suppliers()).into_response()
}

async fn all_transactions(State(state): Shared, headers: HeaderMap) -> Response {
    caller!(state, headers);
    let gate = state.transactions_gate.lock().take();
    if let Some(gate) = gate {
        gate.arrived.notify_one();
        gate.release.notified().await;
        return unauthorized();
    }
    if state.lists_down() {
        return list_unavailable();
    }
    Json(transactions()).into_response()
}

async fn transactions_in_range(
    State(state): Shared,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    caller!(state, headers);
    let (Some(start), Some(end)) = (params.get("startDate"), params.get("endDate")) else {
        return (StatusCode::BAD_REQUEST, "Error: startDate and endDate are required").into_response();
    };
    let within: Vec<Value> = transactions()
        .into_iter()
        .filter(|tx| {
            let day = &tx["transactionDate"].as_str().unwrap_or_default()[..10];
            start.as_str() <= day && day <= end.as_str()
        })
        .collect();
    Json(within).into_response()
}

async fn record_transaction(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let user = caller!(state, headers);
    *state.last_transaction.lock() = Some(body.clone());

    let unit_price = body["unitPrice"].as_f64().unwrap_or(0.8);
    let quantity = body["quantity"].as_i64().unwrap_or_default();
    Json(json!({
        "id": 99,
        "productId": body["productId"],
        "type": body["type"],
        "quantity": quantity,
        "unitPrice": unit_price,
        "totalPrice": unit_price * quantity as f64,
        "userId": body["userId"],
        "username": user.username,
        "transactionDate": "2024-03-10T12:00:00",
        "notes": body["notes"]
    }))
    .into_response()
}

async fn stock_report_rows(State(state): Shared, headers: HeaderMap) -> Response {
    caller!(state, headers);
    Json(stock_report()).into_response()
}

async fn summary_rows(
    State(state): Shared,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    caller!(state, headers);
    let (Some(start), Some(end)) = (params.get("startDate"), params.get("endDate")) else {
        return (StatusCode::BAD_REQUEST, "Error: startDate and endDate are required").into_response();
    };

    let gate = {
        let mut slot = state.summary_gate.lock();
        match slot.as_ref() {
            Some((key, _)) if key == start => slot.take().map(|(_, gate)| gate),
            _ => None,
        }
    };
    if let Some(gate) = gate {
        gate.arrived.notify_one();
        gate.release.notified().await;
    }
    Json(summary(start, end)).into_response()
}

async fn all_users(State(state): Shared, headers: HeaderMap) -> Response {
    admin!(state, headers);
    if state.lists_down() {
        return list_unavailable();
    }
    Json(users(&state)).into_response()
}

async fn update_product(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    admin!(state, headers);
    let Some(product) = find(products(), id) else {
        return not_found("Product");
    };
    state.writes.fetch_add(1, Ordering::SeqCst);
    Json(merged(product, body)).into_response()
}

async fn set_stock(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    admin!(state, headers);
    let Some(stock) = params.get("stock").and_then(|s| s.parse::<i64>().ok()) else {
        return (StatusCode::BAD_REQUEST, "Error: stock is required").into_response();
    };
    state.writes.fetch_add(1, Ordering::SeqCst);
    *state.last_stock.lock() = Some((id, stock));
    StatusCode::OK.into_response()
}

async fn delete_product(State(state): Shared, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    admin!(state, headers);
    if find(products(), id).is_none() {
        return not_found("Product");
    }
    state.writes.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK.into_response()
}

async fn create_supplier(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    admin!(state, headers);
    state.writes.fetch_add(1, Ordering::SeqCst);
    Json(merged(json!({"id": 3, "active": true}), body)).into_response()
}

async fn update_supplier(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    admin!(state, headers);
    let Some(supplier) = find(suppliers(), id) else {
        return not_found("Supplier");
    };
    state.writes.fetch_add(1, Ordering::SeqCst);
    Json(merged(supplier, body)).into_response()
}

async fn delete_supplier(State(state): Shared, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    admin!(state, headers);
    if find(suppliers(), id).is_none() {
        return not_found("Supplier");
    }
    state.writes.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK.into_response()
}

async fn update_transaction(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    admin!(state, headers);
    let Some(tx) = find(Value::Array(transactions()), id) else {
        return not_found("Transaction");
    };
    state.writes.fetch_add(1, Ordering::SeqCst);
    Json(merged(tx, body)).into_response()
}

async fn delete_transaction(State(state): Shared, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    admin!(state, headers);
    if find(Value::Array(transactions()), id).is_none() {
        return not_found("Transaction");
    }
    state.writes.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK.into_response()
}

async fn create_user(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    admin!(state, headers);
    state.writes.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "id": 3,
        "username": body["username"],
        "fullName": body["fullName"],
        "email": body["email"],
        "role": body["role"],
        "active": true,
        "createdAt": "2024-03-10T12:00:00"
    }))
    .into_response()
}

async fn update_user(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Response {
    admin!(state, headers);
    let Some(user) = state.users.iter().find(|u| u.id == id) else {
        return not_found("User");
    };
    if let Some(fields) = body.as_object_mut() {
        fields.remove("password");
    }
    state.writes.fetch_add(1, Ordering::SeqCst);
    Json(merged(user.profile(), body)).into_response()
}

async fn delete_user(State(state): Shared, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    admin!(state, headers);
    if !state.users.iter().any(|u| u.id == id) {
        return not_found("User");
    }
    state.writes.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK.into_response()
}

pub fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/auth/signin", post(sign_in))
        .route("/auth/me", get(me))
        .route("/products", post(create_product))
        .route("/products/active", get(active_products))
        .route("/products/low-stock", get(low_stock_products))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/products/{id}/stock", patch(set_stock))
        .route("/suppliers", post(create_supplier))
        .route("/suppliers/active", get(active_suppliers))
        .route("/suppliers/{id}", put(update_supplier).delete(delete_supplier))
        .route("/transactions", get(all_transactions).post(record_transaction))
        .route("/transactions/date-range", get(transactions_in_range))
        .route("/transactions/{id}", put(update_transaction).delete(delete_transaction))
        .route("/reports/stock", get(stock_report_rows))
        .route("/reports/summary", get(summary_rows))
        .route("/users", get(all_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .with_state(state)
}

// ========== Harness ==========

/// Mock service plus a client whose session file lives in a temp dir
pub struct Harness {
    pub state: Arc<MockState>,
    pub dir: TempDir,
    pub client: StockClient,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(|config| config)
    }

    pub fn with_config(customize: impl FnOnce(ClientConfig) -> ClientConfig) -> Self {
        let state = MockState::new();
        let dir = TempDir::new().unwrap();
        let config = customize(ClientConfig::new("http://inventory.test/api").with_data_dir(dir.path()));
        let client = StockClient::with_transport(
            config,
            Arc::new(OneshotTransport::new(router(state.clone()))),
        );
        Self { state, dir, client }
    }

    /// A fresh client over the same service and data dir, as after a restart
    pub fn restart(&self) -> StockClient {
        StockClient::with_transport(
            self.client.config().clone(),
            Arc::new(OneshotTransport::new(router(self.state.clone()))),
        )
    }

    pub async fn login_admin(&self) {
        self.client.login(ADMIN.0, ADMIN.1).await.unwrap();
    }

    pub async fn login_staff(&self) {
        self.client.login(STAFF.0, STAFF.1).await.unwrap();
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
