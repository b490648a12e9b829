//! Cart commands.
//!
//! Every command builds its own [`CartApi`] from the environment and passes
//! the session explicitly.

use storefront_cart_client::{
    CartApi, CartStore, ClientConfig, ConfigError, QuantityAction, SessionContext, SyncError,
};
use storefront_cart_core::{CartMode, ProductId, Quantity, ValidationError};
use thiserror::Error;

use crate::render;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Talking to the backend failed.
    #[error("{}", .0.user_message())]
    Sync(#[from] SyncError),

    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        Self::Sync(SyncError::Validation(err))
    }
}

impl CliError {
    /// Process exit status for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Sync(err) if err.is_auth() => 2,
            _ => 1,
        }
    }
}

fn api() -> Result<CartApi, CliError> {
    Ok(CartApi::new(&ClientConfig::from_env()?)?)
}

fn session(token: Option<String>) -> Result<SessionContext, CliError> {
    match token {
        Some(token) => Ok(SessionContext::from_token(token)),
        None => Ok(SessionContext::from_env()?),
    }
}

#[allow(clippy::print_stdout)]
fn print_cart(store: &CartStore, mode: CartMode) {
    print!("{}", render::cart_text(&store.view(mode)));
}

/// Log in and print the token as an export line.
#[allow(clippy::print_stdout)]
pub async fn login(username: &str, password: &str) -> Result<(), CliError> {
    let session = api()?.login(username, password).await?;
    tracing::info!(username = session.username().unwrap_or(username), "Logged in");
    println!("export CART_API_TOKEN={}", session.expose_token());
    Ok(())
}

/// Shell line that forgets the session exported by [`login`].
pub const LOGOUT_LINE: &str = "unset CART_API_TOKEN CART_USERNAME";

/// Print the line that clears the exported session.
///
/// The token lives only in the caller's environment, so there is nothing to
/// revoke here.
#[allow(clippy::print_stdout)]
pub fn logout() {
    tracing::info!("Logged out");
    println!("{LOGOUT_LINE}");
}

/// Show the cart in the requested mode.
#[allow(clippy::print_stdout)]
pub async fn show(token: Option<String>, read_only: bool, json: bool) -> Result<(), CliError> {
    let api = api()?;
    let session = session(token)?;
    let store = CartStore::load(&api, &session).await?;

    let mode = if read_only {
        CartMode::ReadOnly
    } else {
        CartMode::Editable
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&store.view(mode))?);
    } else {
        print_cart(&store, mode);
    }
    Ok(())
}

/// Set an absolute quantity.
pub async fn set(token: Option<String>, product_id: &str, qty: i64) -> Result<(), CliError> {
    let product_id = ProductId::parse(product_id)?;
    let qty = Quantity::try_from(qty)?;
    change(token, &product_id, QuantityAction::Set(qty)).await
}

/// Add or remove one unit.
pub async fn step(token: Option<String>, product_id: &str, up: bool) -> Result<(), CliError> {
    let product_id = ProductId::parse(product_id)?;
    let action = if up {
        QuantityAction::Increment
    } else {
        QuantityAction::Decrement
    };
    change(token, &product_id, action).await
}

async fn change(
    token: Option<String>,
    product_id: &ProductId,
    action: QuantityAction,
) -> Result<(), CliError> {
    let api = api()?;
    let session = session(token)?;
    let mut store = CartStore::load(&api, &session).await?;

    store
        .change_quantity(&api, &session, product_id, action)
        .await?;
    tracing::info!(
        product_id = %product_id,
        qty = %store.quantity_of(product_id),
        "Cart updated"
    );

    print_cart(&store, CartMode::Editable);
    Ok(())
}
