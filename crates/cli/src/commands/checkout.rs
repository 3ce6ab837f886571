//! Checkout command

use std::io::Write;

use clap::Args;
use rusty_money::iso::Currency;
use storefront::{
    checkout::{CustomerDetails, OrderGateway, ShippingPolicy},
    storage::CartSlot,
    store::CartStore,
};

use super::CommandError;

/// Customer details for an order.
#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Customer full name
    #[arg(long)]
    pub name: String,

    /// Customer email
    #[arg(long)]
    pub email: String,

    /// Customer phone
    #[arg(long)]
    pub phone: String,

    /// Street address
    #[arg(long)]
    pub address: String,

    /// City
    #[arg(long, default_value = "")]
    pub city: String,

    /// Postal code
    #[arg(long, default_value = "")]
    pub zip_code: String,
}

impl CheckoutArgs {
    fn customer(&self) -> CustomerDetails {
        CustomerDetails {
            customer_name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            zip_code: self.zip_code.clone(),
        }
    }
}

pub(super) fn run<S: CartSlot, G: OrderGateway>(
    store: &mut CartStore<S>,
    args: &CheckoutArgs,
    policy: &ShippingPolicy,
    gateway: &mut G,
    currency: &Currency,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let completed = store.checkout(&args.customer(), policy, gateway)?;

    writeln!(out, "Order placed successfully!")?;
    writeln!(out, "Order ID: {}", completed.receipt.order_id)?;
    writeln!(out, "Total: {}", completed.order.total_money(currency))?;

    Ok(())
}
