//! Cart Reducer

use crate::cart::{CartAction, CartItem, CartState, ProductId};

/// Computes the next cart state from the current state and an action.
///
/// The reducer is pure: it never fails and touches nothing but the state it is given.
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem(item) => add_item(&mut state.items, item),
        CartAction::RemoveItem(product_id) => remove_item(&mut state.items, &product_id),
        CartAction::UpdateQuantity {
            product_id,
            quantity: 0,
        } => remove_item(&mut state.items, &product_id),
        CartAction::UpdateQuantity {
            product_id,
            quantity,
        } => {
            if let Some(existing) = find_mut(&mut state.items, &product_id) {
                existing.quantity = quantity;
            }
        }
        CartAction::ClearCart => state.items.clear(),
        CartAction::ToggleCart => state.is_open = !state.is_open,
        CartAction::SetCart(items) => state.items = items,
    }

    state
}

fn find_mut<'a>(items: &'a mut [CartItem], product_id: &ProductId) -> Option<&'a mut CartItem> {
    items.iter_mut().find(|item| &item.product_id == product_id)
}

// Merging keeps the snapshot captured by the first add.
fn add_item(items: &mut Vec<CartItem>, item: CartItem) {
    match find_mut(items, &item.product_id) {
        Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
        None => items.push(item),
    }
}

fn remove_item(items: &mut Vec<CartItem>, product_id: &ProductId) {
    items.retain(|item| &item.product_id != product_id);
}
