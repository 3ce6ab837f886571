//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        ActionDecodeError, CartAction, CartItem, CartState, ProductId, decode_action, reduce,
        total_items, total_price,
    },
    catalog::{Catalog, CatalogError, Category, Product, ProductError, UnknownCategory},
    checkout::{
        CheckoutError, CompletedOrder, CustomerDetails, GatewayError, OrderGateway, OrderItem, OrderReceipt,
        OrderStatus, OrderSubmission, ShippingPolicy, format_price,
    },
    storage::{
        CART_STORAGE_KEY, CartSlot, FileSlot, MemorySlot, StorageError, decode_items, encode_items,
    },
    store::{CartStore, SubscriberKey},
};
