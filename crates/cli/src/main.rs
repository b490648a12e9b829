//! Storefront Cart CLI - inspect and edit a cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in and print the token to export
//! cart login -u shopper -p correct-horse-battery
//!
//! # Forget the session
//! eval "$(cart logout)"
//!
//! # Show the cart (editable view, or the order-confirmation view)
//! cart show
//! cart show --read-only --json
//!
//! # Change quantities
//! cart set BW0jAAeDJmlZCF8i 3
//! cart inc BW0jAAeDJmlZCF8i
//! cart dec BW0jAAeDJmlZCF8i
//! ```
//!
//! # Environment Variables
//!
//! - `CART_API_ENDPOINT` - Base URL of the cart backend
//! - `CART_API_TOKEN` - Bearer token (or pass `--token`)
//!
//! Exits with status 2 when the backend rejects the session, 1 on any other failure.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

use commands::CliError;

#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about = "Storefront cart tools")]
struct Cli {
    /// Bearer token for the cart backend
    #[arg(long, global = true, env = "CART_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the session token
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Print the line that clears the exported session
    Logout,
    /// Show the cart
    Show {
        /// Display quantities as labels with an order summary
        #[arg(long)]
        read_only: bool,

        /// Print the cart view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a product's quantity (0 removes it)
    Set {
        /// Product ID
        product_id: String,

        /// Desired quantity
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Add one unit of a product
    Inc {
        /// Product ID
        product_id: String,
    },
    /// Remove one unit of a product
    Dec {
        /// Product ID
        product_id: String,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays clean for --json output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_cart_client=info,cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let token = cli.token;
    match cli.command {
        Commands::Login { username, password } => {
            commands::login(&username, &password).await?;
        }
        Commands::Logout => commands::logout(),
        Commands::Show { read_only, json } => {
            commands::show(token, read_only, json).await?;
        }
        Commands::Set { product_id, qty } => {
            commands::set(token, &product_id, qty).await?;
        }
        Commands::Inc { product_id } => {
            commands::step(token, &product_id, true).await?;
        }
        Commands::Dec { product_id } => {
            commands::step(token, &product_id, false).await?;
        }
    }
    Ok(())
}
