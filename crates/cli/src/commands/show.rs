//! Cart and catalog tables

use std::io::Write;

use rusty_money::iso::Currency;
use storefront::{
    catalog::{Catalog, Category},
    checkout::{ShippingPolicy, format_price},
    storage::CartSlot,
    store::CartStore,
};
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

use super::CommandError;

pub(super) fn cart<S: CartSlot>(
    store: &CartStore<S>,
    policy: &ShippingPolicy,
    currency: &Currency,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if store.items().is_empty() {
        writeln!(out, "Your cart is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Product", "Name", "Price", "Qty", "Total"]);

    for item in store.items() {
        builder.push_record([
            item.product_id.to_string(),
            item.name.clone(),
            format_price(item.price, currency),
            item.quantity.to_string(),
            format_price(item.line_total(), currency),
        ]);
    }

    writeln!(out, "{}", styled(builder.build(), 2))?;

    let subtotal = store.total_price();
    let shipping = policy.shipping_for(subtotal);

    writeln!(out, "Items: {}", store.total_items())?;
    writeln!(out, "Subtotal: {}", format_price(subtotal, currency))?;

    if shipping.is_zero() {
        writeln!(out, "Shipping: FREE")?;
    } else {
        writeln!(out, "Shipping: {}", format_price(shipping, currency))?;
    }

    writeln!(
        out,
        "Total: {}",
        format_price(subtotal.saturating_add(shipping), currency)
    )?;

    if let Some(remaining) = policy.remaining_for_free_shipping(subtotal) {
        writeln!(
            out,
            "Add {} more for free shipping",
            format_price(remaining, currency)
        )?;
    }

    Ok(())
}

pub(super) fn products(
    catalog: &Catalog,
    category: Option<Category>,
    currency: &Currency,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if catalog.is_empty() {
        writeln!(out, "The catalog has no products")?;

        return Ok(());
    }

    let listed: Vec<_> = match category {
        Some(category) => catalog.in_category(category).collect(),
        None => catalog.iter().collect(),
    };

    if listed.is_empty() {
        writeln!(out, "No products found")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Category", "Price", "Stock"]);

    for product in &listed {
        let stock = if product.is_in_stock() {
            format!("In stock ({} available)", product.stock)
        } else {
            "Out of stock".to_string()
        };

        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.to_string(),
            format_price(product.price, currency),
            stock,
        ]);
    }

    writeln!(out, "{}", styled(builder.build(), 3))?;
    writeln!(out, "Showing {} of {} products", listed.len(), catalog.len())?;

    Ok(())
}

fn styled(mut table: Table, first_numeric_column: usize) -> Table {
    table.with(Style::modern_rounded());
    table.modify(Columns::new(first_numeric_column..), Alignment::right());
    table.modify(Rows::first(), Alignment::left());

    table
}
