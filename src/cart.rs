//! Cart
//!
//! Cart state, the actions that transition it and the totals derived from it.

use rust_decimal::Decimal;
use tracing::warn;

mod actions;
mod item;
mod reducer;

pub use actions::{ActionDecodeError, CartAction, decode_action};
pub use item::{CartItem, ProductId};
pub use reducer::reduce;

/// The whole cart: its lines and whether the cart panel is open.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartState {
    /// Lines in first-insertion order, unique by product.
    pub items: Vec<CartItem>,

    /// UI-only open flag; never persisted.
    pub is_open: bool,
}

impl CartState {
    /// Looks up the line for a product.
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Total number of units across all lines.
pub fn total_items(state: &CartState) -> u64 {
    state
        .items
        .iter()
        .map(|item| u64::from(item.quantity))
        .sum()
}

/// Total price of all lines, unrounded.
///
/// Saturates at [`Decimal::MAX`] instead of overflowing.
pub fn total_price(state: &CartState) -> Decimal {
    state
        .items
        .iter()
        .map(CartItem::line_total)
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .unwrap_or_else(|| {
            warn!(lines = state.items.len(), "cart total overflowed, saturating");

            Decimal::MAX
        })
}
