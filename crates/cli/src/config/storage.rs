//! Storage & Catalog Config

use std::path::PathBuf;

use clap::Args;
use rusty_money::iso::{self, Currency};

/// Where the cart lives and which catalog feeds it.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// Directory holding the cart slot and placed orders
    #[arg(long, env = "CART_STORAGE_DIR", default_value = ".storefront")]
    pub storage_dir: PathBuf,

    /// Product catalog YAML file
    #[arg(long, env = "CATALOG_PATH")]
    pub catalog: Option<PathBuf>,

    /// ISO 4217 currency code used to display prices
    #[arg(long, env = "STORE_CURRENCY", default_value = "PHP")]
    pub currency: String,
}

impl StorageConfig {
    /// Resolve the configured currency code.
    pub(crate) fn currency(&self) -> Option<&'static Currency> {
        iso::find(&self.currency.to_ascii_uppercase())
    }

    /// File that placed orders are appended to.
    pub(crate) fn orders_path(&self) -> PathBuf {
        self.storage_dir.join("orders.jsonl")
    }
}
