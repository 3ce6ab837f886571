//! Shipping Config

use clap::Args;
use rust_decimal::Decimal;
use storefront::checkout::ShippingPolicy;

/// Shipping charges applied at checkout and previewed by `show`.
#[derive(Debug, Args)]
pub(crate) struct ShippingConfig {
    /// Subtotals above this ship for free
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value = "1000")]
    pub free_shipping_threshold: Decimal,

    /// Flat shipping rate charged otherwise
    #[arg(long, env = "SHIPPING_FLAT_RATE", default_value = "50")]
    pub shipping_rate: Decimal,
}

impl ShippingConfig {
    /// The configured policy.
    pub(crate) fn policy(&self) -> ShippingPolicy {
        ShippingPolicy {
            free_shipping_threshold: self.free_shipping_threshold,
            flat_rate: self.shipping_rate,
        }
    }
}
