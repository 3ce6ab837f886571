//! Cart Store
//!
//! [`CartStore`] is the sole owner of a [`CartState`]. Every change goes through
//! [`CartStore::dispatch`], which runs the reducer, notifies subscribers and then persists the
//! item list to the store's [`CartSlot`]. Persistence is best effort: failures are logged and
//! never undo or block the in-memory transition.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    mem,
};

use rust_decimal::Decimal;
use slotmap::{SlotMap, new_key_type};
use tracing::{debug, error, trace, warn};

use crate::{
    cart::{self, CartAction, CartItem, CartState, ProductId, decode_action, reduce},
    storage::{CartSlot, decode_items, encode_items},
};

new_key_type! {
    /// Subscription handle returned by [`CartStore::subscribe`].
    pub struct SubscriberKey;
}

type Subscriber = Box<dyn FnMut(&CartState)>;

/// Cart store bound to a durable slot.
pub struct CartStore<S: CartSlot> {
    state: CartState,
    slot: S,
    subscribers: SlotMap<SubscriberKey, Subscriber>,
}

impl<S: CartSlot> CartStore<S> {
    /// Creates a store and hydrates it once from the slot.
    ///
    /// An absent, empty, unreadable or malformed slot leaves the default empty cart.
    pub fn new(slot: S) -> Self {
        let mut store = Self {
            state: CartState::default(),
            slot,
            subscribers: SlotMap::with_key(),
        };

        store.hydrate();

        store
    }

    /// Applies an action to the cart.
    pub fn dispatch(&mut self, action: CartAction) {
        let kind = action.kind();
        let persist = action.persists_items();

        self.state = reduce(mem::take(&mut self.state), action);

        trace!(
            action = kind,
            lines = self.state.items.len(),
            "cart action applied"
        );

        for subscriber in self.subscribers.values_mut() {
            subscriber(&self.state);
        }

        if persist {
            self.persist();
        }
    }

    /// Adds an item, merging with an existing line for the same product.
    pub fn add_item(&mut self, item: CartItem) {
        self.dispatch(CartAction::AddItem(item));
    }

    /// Removes the line for a product.
    pub fn remove_item(&mut self, product_id: impl Into<ProductId>) {
        self.dispatch(CartAction::RemoveItem(product_id.into()));
    }

    /// Sets a line's quantity; zero removes the line.
    pub fn update_quantity(&mut self, product_id: impl Into<ProductId>, quantity: u32) {
        self.dispatch(CartAction::UpdateQuantity {
            product_id: product_id.into(),
            quantity,
        });
    }

    /// Removes every line.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::ClearCart);
    }

    /// Flips the cart's open flag.
    pub fn toggle_cart(&mut self) {
        self.dispatch(CartAction::ToggleCart);
    }

    /// Applies a newline-delimited log of action records, returning how many were applied.
    ///
    /// Blank lines are ignored; unknown and malformed records are logged and skipped.
    pub fn replay(&mut self, log: &str) -> usize {
        let mut applied = 0;

        for (index, line) in log.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            match decode_action(line) {
                Ok(Some(action)) => {
                    self.dispatch(action);
                    applied += 1;
                }
                Ok(None) => warn!(line = index + 1, "skipping unknown cart action"),
                Err(error) => warn!(line = index + 1, %error, "skipping malformed cart action"),
            }
        }

        applied
    }

    /// Registers a callback invoked with the new state after every dispatch.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&CartState) + 'static) -> SubscriberKey {
        self.subscribers.insert(Box::new(subscriber))
    }

    /// Removes a subscription, returning whether it existed.
    pub fn unsubscribe(&mut self, key: SubscriberKey) -> bool {
        self.subscribers.remove(key).is_some()
    }

    /// Current cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Current cart lines.
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    /// Whether the cart panel is open.
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Total number of units in the cart.
    pub fn total_items(&self) -> u64 {
        cart::total_items(&self.state)
    }

    /// Total price of the cart, unrounded.
    pub fn total_price(&self) -> Decimal {
        cart::total_price(&self.state)
    }

    /// The slot backing this store.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    fn hydrate(&mut self) {
        let payload = match self.slot.read() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("no persisted cart found");
                return;
            }
            Err(error) => {
                warn!(%error, "failed to read persisted cart");
                return;
            }
        };

        match decode_items(&payload) {
            Ok(items) if items.is_empty() => debug!("persisted cart is empty"),
            Ok(items) => {
                debug!(lines = items.len(), "hydrating cart from storage");
                self.dispatch(CartAction::SetCart(items));
            }
            Err(error) => warn!(%error, "ignoring malformed persisted cart"),
        }
    }

    fn persist(&mut self) {
        let payload = match encode_items(&self.state.items) {
            Ok(payload) => payload,
            Err(error) => {
                error!(%error, "failed to encode cart items");
                return;
            }
        };

        if let Err(error) = self.slot.write(&payload) {
            error!(%error, "failed to persist cart");
        }
    }
}

impl<S: CartSlot + Debug> Debug for CartStore<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("slot", &self.slot)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
