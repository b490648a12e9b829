//! Integration tests for the storefront cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-cart-integration-tests
//! ```
//!
//! The tests run the real client against [`FakeBackend`], an in-process
//! `axum` server on `127.0.0.1` that implements the cart backend's routes:
//!
//! - `GET /products` - the catalog
//! - `GET /cart` - the caller's cart (authenticated)
//! - `POST /cart` - set one product's absolute quantity (authenticated)
//! - `POST /auth/login` - exchange credentials for a token

#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing
)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use storefront_cart_client::{CartApi, ClientConfig, SessionContext};
use storefront_cart_core::{CartEntry, Price, Product, ProductId, Quantity};
use url::Url;
use uuid::Uuid;

/// Username registered in every fake backend.
pub const USERNAME: &str = "shopper";
/// Password of [`USERNAME`].
pub const PASSWORD: &str = "correct-horse-battery";
/// Token issued to [`USERNAME`] at startup.
pub const TOKEN: &str = "fake-token-shopper";

/// A catalog product for tests.
#[must_use]
pub fn product(id: &str, name: &str, cost: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: "Fashion".to_string(),
        cost: Price::from_units(cost),
        rating: 4,
        image: format!("https://img.example/{id}.png"),
    }
}

/// Two-product catalog: "a" costs 10, "b" costs 5.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![product("a", "Duffle", 10), product("b", "Lamp", 5)]
}

#[derive(Default)]
struct BackendState {
    catalog: Vec<Product>,
    /// token -> username
    tokens: HashMap<String, String>,
    /// username -> cart
    carts: HashMap<String, Vec<CartEntry>>,
    request_ids: Vec<String>,
    mutations: usize,
}

#[derive(Clone)]
struct Backend {
    state: Arc<Mutex<BackendState>>,
    fail_mutations: Arc<AtomicBool>,
    garble_mutations: Arc<AtomicBool>,
}

/// Handle to a running fake backend.
pub struct FakeBackend {
    addr: SocketAddr,
    backend: Backend,
}

impl FakeBackend {
    /// Start a backend serving `catalog`, with [`USERNAME`]'s cart set to `cart`.
    pub async fn spawn(catalog: Vec<Product>, cart: Vec<CartEntry>) -> Self {
        let mut state = BackendState {
            catalog,
            ..BackendState::default()
        };
        state.tokens.insert(TOKEN.to_string(), USERNAME.to_string());
        state.carts.insert(USERNAME.to_string(), cart);

        let backend = Backend {
            state: Arc::new(Mutex::new(state)),
            fail_mutations: Arc::new(AtomicBool::new(false)),
            garble_mutations: Arc::new(AtomicBool::new(false)),
        };

        let router = Router::new()
            .route("/products", get(products))
            .route("/cart", get(get_cart).post(set_quantity))
            .route("/auth/login", post(login))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, backend }
    }

    /// Base URL of the backend.
    #[must_use]
    pub fn endpoint(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    /// A client pointed at this backend.
    #[must_use]
    pub fn api(&self) -> CartApi {
        CartApi::new(&ClientConfig::new(self.endpoint())).unwrap()
    }

    /// A session holding the pre-issued token.
    #[must_use]
    pub fn session(&self) -> SessionContext {
        SessionContext::from_token(TOKEN).with_username(USERNAME)
    }

    /// Make every `POST /cart` fail with HTTP 500.
    pub fn fail_mutations(&self, fail: bool) {
        self.backend.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Make every `POST /cart` answer HTTP 200 with a body that is not a cart.
    pub fn garble_mutations(&self, garble: bool) {
        self.backend.garble_mutations.store(garble, Ordering::SeqCst);
    }

    /// Server-side cart of [`USERNAME`].
    #[must_use]
    pub fn cart(&self) -> Vec<CartEntry> {
        let state = self.backend.state.lock().unwrap();
        state.carts.get(USERNAME).cloned().unwrap_or_default()
    }

    /// Number of cart mutations the backend has applied.
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.backend.state.lock().unwrap().mutations
    }

    /// `x-request-id` values received so far.
    #[must_use]
    pub fn request_ids(&self) -> Vec<String> {
        self.backend.state.lock().unwrap().request_ids.clone()
    }

    /// Replace the catalog, e.g. to remove a product that is in a cart.
    pub fn set_catalog(&self, catalog: Vec<Product>) {
        self.backend.state.lock().unwrap().catalog = catalog;
    }
}

/// A URL on which nothing is listening.
pub async fn unreachable_endpoint() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetQuantityBody {
    product_id: String,
    qty: i64,
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "code": status.as_u16(), "message": message }))).into_response()
}

fn record_request(state: &mut BackendState, headers: &HeaderMap) {
    if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        state.request_ids.push(id.to_string());
    }
}

fn authenticate(state: &BackendState, headers: &HeaderMap) -> Result<String, Response> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| state.tokens.get(token).cloned())
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Please authenticate"))
}

async fn products(State(backend): State<Backend>) -> Json<Vec<Product>> {
    Json(backend.state.lock().unwrap().catalog.clone())
}

async fn get_cart(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    let mut state = backend.state.lock().unwrap();
    record_request(&mut state, &headers);
    match authenticate(&state, &headers) {
        Ok(user) => Json(state.carts.get(&user).cloned().unwrap_or_default()).into_response(),
        Err(response) => response,
    }
}

async fn set_quantity(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<SetQuantityBody>,
) -> Response {
    let mut state = backend.state.lock().unwrap();
    record_request(&mut state, &headers);

    let user = match authenticate(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    if backend.fail_mutations.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Cart service unavailable");
    }
    if backend.garble_mutations.load(Ordering::SeqCst) {
        return (StatusCode::OK, "<html>Service temporarily unavailable</html>").into_response();
    }

    let product_id = ProductId::new(body.product_id);
    if !state.catalog.iter().any(|p| p.id == product_id) {
        return error(StatusCode::BAD_REQUEST, "Product doesn't exist");
    }
    let Ok(qty) = Quantity::try_from(body.qty) else {
        return error(StatusCode::BAD_REQUEST, "Quantity must be a non-negative integer");
    };

    state.mutations += 1;
    let cart = state.carts.entry(user).or_default();
    match cart.iter().position(|e| e.product_id == product_id) {
        Some(i) if qty.is_zero() => {
            cart.remove(i);
        }
        Some(i) => cart[i].qty = qty,
        None if qty.is_zero() => {}
        None => cart.push(CartEntry { product_id, qty }),
    }

    Json(cart.clone()).into_response()
}

async fn login(State(backend): State<Backend>, Json(body): Json<LoginBody>) -> Response {
    if body.username != USERNAME {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Username does not exist" })),
        )
            .into_response();
    }
    if body.password != PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Password is incorrect" })),
        )
            .into_response();
    }

    let token = Uuid::new_v4().to_string();
    backend
        .state
        .lock()
        .unwrap()
        .tokens
        .insert(token.clone(), body.username.clone());

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "token": token,
            "username": body.username,
            "balance": 5000
        })),
    )
        .into_response()
}
