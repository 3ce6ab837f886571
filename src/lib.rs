//! Storefront
//!
//! Client-side shopping cart for the storefront: a reducer-driven cart store, its
//! persistence bridge to a durable slot, catalog snapshots and checkout order building.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod prelude;
pub mod storage;
pub mod store;
