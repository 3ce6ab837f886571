//! Command-line configuration module

use clap::Parser;

use crate::{
    commands::Command,
    config::{observability::LoggingConfig, shipping::ShippingConfig, storage::StorageConfig},
};

pub(crate) mod observability;
pub(crate) mod shipping;
pub(crate) mod storage;

pub(crate) use observability::LogFormat;

/// Storefront cart manager configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-cart", about = "Storefront cart manager", long_about = None)]
pub(crate) struct CliConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Cart storage and catalog settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Shipping charge settings.
    #[command(flatten)]
    pub shipping: ShippingConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
