//! Quantity synchronization against the fake cart backend.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use storefront_cart_client::error::BACKEND_UNREACHABLE_MESSAGE;
use storefront_cart_client::{
    CartApi, CartStore, ClientConfig, QuantityAction, SessionContext, SyncError,
};
use storefront_cart_core::{CartEntry, CartMode, Price, ProductId, Quantity, hydrate, total_value};
use storefront_cart_integration_tests::{
    FakeBackend, PASSWORD, USERNAME, sample_catalog, unreachable_endpoint,
};

fn id(s: &str) -> ProductId {
    ProductId::new(s)
}

// ============================================================================
// set_quantity
// ============================================================================

#[tokio::test]
async fn test_set_quantity_returns_authoritative_cart() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![CartEntry::new("a", 2)]).await;
    let api = backend.api();

    let cart = api
        .set_quantity(&backend.session(), &id("b"), Quantity::new(1))
        .await
        .unwrap();

    assert_eq!(cart, vec![CartEntry::new("a", 2), CartEntry::new("b", 1)]);
    assert_eq!(cart, backend.cart());
}

#[tokio::test]
async fn test_set_quantity_zero_removes_entry() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![CartEntry::new("a", 1)]).await;

    let cart = backend
        .api()
        .set_quantity(&backend.session(), &id("a"), Quantity::ZERO)
        .await
        .unwrap();

    assert!(cart.iter().all(|e| e.product_id != id("a")));
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_set_quantity_is_idempotent() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![]).await;
    let api = backend.api();
    let session = backend.session();

    let first = api.set_quantity(&session, &id("a"), Quantity::new(3)).await.unwrap();
    let second = api.set_quantity(&session, &id("a"), Quantity::new(3)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second, vec![CartEntry::new("a", 3)]);
}

#[tokio::test]
async fn test_invalid_token_is_auth_error() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![CartEntry::new("a", 1)]).await;
    let expired = SessionContext::from_token("expired-token");

    let err = backend
        .api()
        .set_quantity(&expired, &id("a"), Quantity::new(2))
        .await
        .unwrap_err();

    assert!(err.is_auth(), "expected auth error, got {err:?}");
    assert!(!err.is_transient());
    assert_eq!(err.user_message(), "Please authenticate");
    assert_eq!(backend.cart(), vec![CartEntry::new("a", 1)]);
}

#[tokio::test]
async fn test_unreachable_backend_is_transient_error() {
    let api = CartApi::new(&ClientConfig::new(unreachable_endpoint().await)).unwrap();
    let session = SessionContext::from_token("token");

    let err = api
        .set_quantity(&session, &id("a"), Quantity::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Http(_)), "got {err:?}");
    assert!(err.is_transient());
    assert!(!err.is_auth());
}

#[tokio::test]
async fn test_server_failure_is_transient_with_message() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![]).await;
    backend.fail_mutations(true);

    let err = backend
        .api()
        .set_quantity(&backend.session(), &id("a"), Quantity::new(1))
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert_eq!(err.user_message(), "Cart service unavailable");
}

#[tokio::test]
async fn test_undecodable_success_body_is_transient() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![CartEntry::new("a", 1)]).await;
    let api = backend.api();
    let session = backend.session();

    let mut store = CartStore::load(&api, &session).await.unwrap();
    backend.garble_mutations(true);

    let err = store
        .change_quantity(&api, &session, &id("a"), QuantityAction::Increment)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Parse(_)));
    assert!(err.is_transient());
    assert_eq!(err.user_message(), BACKEND_UNREACHABLE_MESSAGE);
    assert_eq!(store.entries(), &[CartEntry::new("a", 1)]);
}

#[tokio::test]
async fn test_unknown_product_is_rejected() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![]).await;

    let err = backend
        .api()
        .set_quantity(&backend.session(), &id("zzz"), Quantity::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Rejected { status: 400, .. }));
    assert_eq!(err.user_message(), "Product doesn't exist");
}

#[tokio::test]
async fn test_malformed_id_never_reaches_backend() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![]).await;

    let err = backend
        .api()
        .set_quantity(&backend.session(), &id(""), Quantity::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Validation(_)));
    assert!(backend.request_ids().is_empty());
    assert_eq!(backend.mutations(), 0);
}

#[tokio::test]
async fn test_requests_carry_request_ids() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![]).await;
    let api = backend.api();
    let session = backend.session();

    api.set_quantity(&session, &id("a"), Quantity::new(1)).await.unwrap();
    api.fetch_cart(&session).await.unwrap();

    let ids = backend.request_ids();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

// ============================================================================
// increment / decrement
// ============================================================================

#[tokio::test]
async fn test_increment_and_decrement_send_absolute_quantities() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![CartEntry::new("a", 1)]).await;
    let api = backend.api();
    let session = backend.session();

    let items = hydrate(&backend.cart(), &sample_catalog());
    let cart = api.increment(&session, &items[0]).await.unwrap();
    assert_eq!(cart, vec![CartEntry::new("a", 2)]);

    let items = hydrate(&cart, &sample_catalog());
    let cart = api.decrement(&session, &items[0]).await.unwrap();
    assert_eq!(cart, vec![CartEntry::new("a", 1)]);

    let items = hydrate(&cart, &sample_catalog());
    let cart = api.decrement(&session, &items[0]).await.unwrap();
    assert!(cart.is_empty());
}

// ============================================================================
// CartStore
// ============================================================================

#[tokio::test]
async fn test_store_round_trip_rehydrates_after_mutation() {
    let backend = FakeBackend::spawn(
        sample_catalog(),
        vec![CartEntry::new("b", 1), CartEntry::new("a", 2)],
    )
    .await;
    let api = backend.api();
    let session = backend.session();

    let mut store = CartStore::load(&api, &session).await.unwrap();
    let items = store.line_items();
    // Catalog order, not cart order.
    assert_eq!(items[0].product_id, id("a"));
    assert_eq!(items[1].product_id, id("b"));
    assert_eq!(store.total(), Price::from_units(25));

    store
        .change_quantity(&api, &session, &id("b"), QuantityAction::Increment)
        .await
        .unwrap();

    assert_eq!(store.quantity_of(&id("b")), Quantity::new(2));
    assert_eq!(store.total(), Price::from_units(30));
    assert_eq!(store.entries(), backend.cart().as_slice());
}

#[tokio::test]
async fn test_store_keeps_last_good_state_on_failure() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![CartEntry::new("a", 2)]).await;
    let api = backend.api();
    let session = backend.session();

    let mut store = CartStore::load(&api, &session).await.unwrap();
    backend.fail_mutations(true);

    let err = store
        .change_quantity(&api, &session, &id("a"), QuantityAction::Decrement)
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert_eq!(store.entries(), &[CartEntry::new("a", 2)]);
    assert_eq!(store.total(), Price::from_units(20));
}

#[tokio::test]
async fn test_store_drops_products_removed_from_catalog() {
    let backend = FakeBackend::spawn(
        sample_catalog(),
        vec![CartEntry::new("a", 1), CartEntry::new("b", 2)],
    )
    .await;
    backend.set_catalog(vec![sample_catalog().remove(1)]);

    let store = CartStore::load(&backend.api(), &backend.session()).await.unwrap();

    let items = store.line_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, id("b"));
    assert_eq!(total_value(&items), Price::from_units(10));
}

#[tokio::test]
async fn test_read_only_view_after_load() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![CartEntry::new("a", 2)]).await;

    let store = CartStore::load(&backend.api(), &backend.session()).await.unwrap();
    let view = store.view(CartMode::ReadOnly);

    assert_eq!(view.items[0].quantity_label, "Qty:2");
    assert_eq!(view.summary.unwrap().total, Price::from_units(20));
}

// ============================================================================
// Catalog & login
// ============================================================================

#[tokio::test]
async fn test_catalog_is_cached_until_invalidated() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![]).await;
    let api = backend.api();

    assert_eq!(api.fetch_catalog().await.unwrap().len(), 2);

    backend.set_catalog(vec![]);
    assert_eq!(api.fetch_catalog().await.unwrap().len(), 2);

    api.invalidate_catalog().await;
    assert!(api.fetch_catalog().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_issues_usable_session() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![]).await;
    let api = backend.api();

    let session = api.login(USERNAME, PASSWORD).await.unwrap();
    assert_eq!(session.username(), Some(USERNAME));
    assert_eq!(session.balance(), Some(5000));

    let cart = api.set_quantity(&session, &id("a"), Quantity::new(1)).await.unwrap();
    assert_eq!(cart, vec![CartEntry::new("a", 1)]);
}

#[tokio::test]
async fn test_login_wrong_password_is_auth_error() {
    let backend = FakeBackend::spawn(sample_catalog(), vec![]).await;

    let err = backend.api().login(USERNAME, "wrong").await.unwrap_err();

    assert!(err.is_auth());
    assert_eq!(err.user_message(), "Password is incorrect");
}
