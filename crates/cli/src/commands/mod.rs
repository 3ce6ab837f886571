//! Commands

use std::{io, path::PathBuf};

use clap::Subcommand;
use storefront::{
    cart::ProductId,
    catalog::{Catalog, CatalogError, Category},
    checkout::CheckoutError,
    storage::FileSlot,
    store::CartStore,
};
use thiserror::Error;

use crate::{
    config::{CliConfig, storage::StorageConfig},
    orders::JsonlOrderGateway,
};

mod cart;
mod checkout;
mod show;

pub(crate) use checkout::CheckoutArgs;

/// Cart manager commands.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Show the cart and its totals
    Show,

    /// List catalog products
    Products {
        /// Only list products in this category
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Add a catalog product to the cart
    Add {
        /// Catalog product id
        product_id: String,

        /// Number of units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: String,
    },

    /// Set a product's quantity; 0 removes it
    Update {
        /// Product id
        product_id: String,

        /// New quantity
        quantity: u32,
    },

    /// Empty the cart
    Clear,

    /// Apply a newline-delimited log of cart action records
    Replay {
        /// Action log file
        log: PathBuf,
    },

    /// Place an order for the cart's contents
    Checkout(CheckoutArgs),
}

/// Command failures.
#[derive(Debug, Error)]
pub(crate) enum CommandError {
    /// Output or input file error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configured currency code is not an ISO 4217 code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The command needs a catalog but none was configured.
    #[error("no catalog configured; pass --catalog or set CATALOG_PATH")]
    CatalogRequired,

    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The product is not in the catalog.
    #[error("product not found: {0}")]
    UnknownProduct(ProductId),

    /// The product has no stock.
    #[error("{0} is out of stock")]
    OutOfStock(ProductId),

    /// Checkout failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Runs the configured command, writing user-facing output to `out`.
pub(crate) fn run(config: &CliConfig, out: &mut impl io::Write) -> Result<(), CommandError> {
    let currency = config
        .storage
        .currency()
        .ok_or_else(|| CommandError::UnknownCurrency(config.storage.currency.clone()))?;

    let mut store = CartStore::new(FileSlot::new(&config.storage.storage_dir));

    match &config.command {
        Command::Show => show::cart(&store, &config.shipping.policy(), currency, out),
        Command::Products { category } => show::products(
            &load_catalog(&config.storage)?,
            *category,
            currency,
            out,
        ),
        Command::Add {
            product_id,
            quantity,
        } => cart::add(
            &mut store,
            &load_catalog(&config.storage)?,
            &ProductId::from(product_id.as_str()),
            *quantity,
            currency,
            out,
        ),
        Command::Remove { product_id } => {
            cart::remove(&mut store, &ProductId::from(product_id.as_str()), out)
        }
        Command::Update {
            product_id,
            quantity,
        } => cart::update(
            &mut store,
            &ProductId::from(product_id.as_str()),
            *quantity,
            out,
        ),
        Command::Clear => cart::clear(&mut store, out),
        Command::Replay { log } => cart::replay(&mut store, log, out),
        Command::Checkout(args) => checkout::run(
            &mut store,
            args,
            &config.shipping.policy(),
            &mut JsonlOrderGateway::new(config.storage.orders_path()),
            currency,
            out,
        ),
    }
}

fn load_catalog(storage: &StorageConfig) -> Result<Catalog, CommandError> {
    let path = storage
        .catalog
        .as_ref()
        .ok_or(CommandError::CatalogRequired)?;

    Ok(Catalog::load(path)?)
}
