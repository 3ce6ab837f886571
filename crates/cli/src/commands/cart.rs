//! Cart editing commands

use std::{fs, io::Write, path::Path};

use rusty_money::iso::Currency;
use storefront::{
    cart::ProductId, catalog::Catalog, checkout::format_price, storage::CartSlot,
    store::CartStore,
};
use tracing::{info, warn};

use super::CommandError;

pub(super) fn add<S: CartSlot>(
    store: &mut CartStore<S>,
    catalog: &Catalog,
    product_id: &ProductId,
    requested: u32,
    currency: &Currency,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let product = catalog
        .get(product_id)
        .ok_or_else(|| CommandError::UnknownProduct(product_id.clone()))?;

    let quantity = product
        .clamp_quantity(requested)
        .ok_or_else(|| CommandError::OutOfStock(product_id.clone()))?;

    if quantity != requested {
        warn!(
            product = %product_id,
            requested,
            quantity,
            "quantity limited to available stock"
        );
    }

    store.add_item(product.cart_item(quantity));

    info!(product = %product_id, quantity, "added to cart");

    writeln!(
        out,
        "Added {quantity} x {} to cart ({} items, {})",
        product.name,
        store.total_items(),
        format_price(store.total_price(), currency)
    )?;

    Ok(())
}

pub(super) fn remove<S: CartSlot>(
    store: &mut CartStore<S>,
    product_id: &ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let present = store.state().item(product_id).is_some();

    store.remove_item(product_id.clone());

    if present {
        writeln!(out, "Removed {product_id} from cart")?;
    } else {
        writeln!(out, "{product_id} is not in the cart")?;
    }

    Ok(())
}

pub(super) fn update<S: CartSlot>(
    store: &mut CartStore<S>,
    product_id: &ProductId,
    quantity: u32,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let present = store.state().item(product_id).is_some();

    store.update_quantity(product_id.clone(), quantity);

    match (present, quantity) {
        (false, _) => writeln!(out, "{product_id} is not in the cart")?,
        (true, 0) => writeln!(out, "Removed {product_id} from cart")?,
        (true, _) => writeln!(out, "Set {product_id} quantity to {quantity}")?,
    }

    Ok(())
}

pub(super) fn clear<S: CartSlot>(
    store: &mut CartStore<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    store.clear_cart();

    writeln!(out, "Cart cleared")?;

    Ok(())
}

pub(super) fn replay<S: CartSlot>(
    store: &mut CartStore<S>,
    log: &Path,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let contents = fs::read_to_string(log)?;

    let applied = store.replay(&contents);

    writeln!(
        out,
        "Applied {applied} actions ({} items in cart)",
        store.total_items()
    )?;

    Ok(())
}
