//! Wardrobe CLI - Clothing shop inventory from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create the data files and the default accounts
//! wardrobe init
//!
//! # Register a user account
//! wardrobe register -u alice --password secret1 --confirm secret1
//!
//! # Browse products
//! wardrobe products -u user -p user123 list
//! wardrobe products -u user -p user123 search "áo"
//!
//! # Edit products (admin only)
//! wardrobe products -u admin -p admin123 add --name "Áo thun" --category Áo --price 150000 --quantity 10
//! wardrobe products -u admin -p admin123 generate --count 8
//! wardrobe products -u admin -p admin123 import products_load.json
//!
//! # Interactive shell
//! wardrobe shell
//! ```
//!
//! # Environment Variables
//!
//! - `WARDROBE_USERNAME` / `WARDROBE_PASSWORD` - Credentials when the flags are omitted
//! - `WARDROBE_DATA_DIR` and friends - See `wardrobe_inventory::config`
//! - `RUST_LOG` - Log filter (default: `wardrobe_inventory=info,wardrobe_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wardrobe_inventory::models::ProductDraft;
use wardrobe_inventory::{Inventory, InventoryConfig};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "wardrobe")]
#[command(author, version, about = "Wardrobe clothing shop inventory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create missing data files and the default accounts
    Init,
    /// Register a new user account
    Register {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password (at least 6 characters)
        #[arg(long)]
        password: String,

        /// Password again
        #[arg(long)]
        confirm: String,
    },
    /// Browse and edit products
    Products {
        #[command(flatten)]
        credentials: Credentials,

        #[command(subcommand)]
        action: ProductAction,
    },
    /// Start the interactive shell
    Shell {
        #[command(flatten)]
        credentials: Credentials,
    },
}

/// Login flags shared by product commands and the shell.
#[derive(Args, Default)]
pub struct Credentials {
    /// Login name
    #[arg(short, long, env = "WARDROBE_USERNAME")]
    pub username: Option<String>,

    /// Password
    #[arg(short, long, env = "WARDROBE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List every product
    List,
    /// Search name, category and description
    Search {
        /// Text to look for (case-insensitive)
        term: String,
    },
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// Add a product
    Add {
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Replace a product's fields
    Update {
        /// Product id
        id: String,

        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
    /// Fetch generated products from the simulated supplier feed
    Generate {
        /// Number of products (default: `WARDROBE_FETCH_COUNT`)
        #[arg(short, long)]
        count: Option<usize>,
    },
    /// Append products from a JSON file
    Import {
        /// JSON array of product objects
        file: PathBuf,
    },
}

#[derive(Args)]
struct ProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Category
    #[arg(long)]
    category: String,

    /// Price in VND
    #[arg(long)]
    price: String,

    /// Quantity in stock
    #[arg(long)]
    quantity: String,

    /// Description
    #[arg(long, default_value = "")]
    description: String,
}

impl From<ProductArgs> for ProductDraft {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            category: args.category,
            price: args.price,
            quantity: args.quantity,
            description: args.description,
        }
    }
}

#[tokio::main]
async fn main() {
    let config = InventoryConfig::from_env();
    init_tracing(config.as_ref().is_ok_and(|c| c.log_json));

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, Inventory::open(config)).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter` and a text or JSON layer on stderr.
fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wardrobe_inventory=info,wardrobe_cli=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli, inventory: Inventory) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Init => commands::init::run(&inventory)?,
        Commands::Register {
            username,
            password,
            confirm,
        } => commands::register::run(
            &inventory,
            &username,
            &SecretString::from(password),
            &SecretString::from(confirm),
        )?,
        Commands::Products {
            credentials,
            action,
        } => {
            let session = commands::login(&inventory, credentials)?;
            match action {
                ProductAction::List => commands::products::list(&inventory, &session),
                ProductAction::Search { term } => {
                    commands::products::search(&inventory, &session, &term);
                }
                ProductAction::Show { id } => commands::products::show(&inventory, &session, &id)?,
                ProductAction::Add { fields } => {
                    commands::products::add(&inventory, &session, &fields.into())?;
                }
                ProductAction::Update { id, fields } => {
                    commands::products::update(&inventory, &session, &id, &fields.into())?;
                }
                ProductAction::Delete { id } => {
                    commands::products::delete(&inventory, &session, &id)?;
                }
                ProductAction::Generate { count } => {
                    let count = count.unwrap_or(inventory.config().fetch_count);
                    commands::products::generate(&inventory, &session, count).await?;
                }
                ProductAction::Import { file } => {
                    commands::products::import(&inventory, &session, &file)?;
                }
            }
        }
        Commands::Shell { credentials } => commands::shell::run(&inventory, credentials).await?,
    }
    Ok(())
}
