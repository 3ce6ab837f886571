//! Integration tests for cart persistence across sessions.

use std::fs;

use rust_decimal::Decimal;
use tempfile::tempdir;
use testresult::TestResult;

use storefront::prelude::*;

fn items() -> Vec<CartItem> {
    vec![
        CartItem::new("p1", "Mug", Decimal::new(24_950, 2), 2, "/uploads/mug.jpg"),
        CartItem::new("p2", "Lamp", Decimal::from(1200), 1, "/uploads/lamp.jpg"),
    ]
}

#[test]
fn a_new_session_is_seeded_from_the_previous_one() -> TestResult {
    let dir = tempdir()?;

    {
        let mut store = CartStore::new(FileSlot::new(dir.path()));

        for item in items() {
            store.add_item(item);
        }

        store.toggle_cart();
    }

    let store = CartStore::new(FileSlot::new(dir.path()));

    assert_eq!(store.items(), items());
    assert!(!store.is_open(), "open flag is not persisted");

    Ok(())
}

#[test]
fn persisted_items_round_trip_through_set_cart() -> TestResult {
    let mut slot = MemorySlot::new();
    slot.write(&encode_items(&items())?)?;

    let store = CartStore::new(slot);

    assert_eq!(store.items(), items());

    Ok(())
}

#[test]
fn corrupt_slot_file_starts_an_empty_cart() -> TestResult {
    let dir = tempdir()?;
    let slot = FileSlot::new(dir.path());

    fs::write(slot.path(), "[{\"productId\": ")?;

    let mut store = CartStore::new(slot);

    assert!(store.state().is_empty());

    store.add_item(CartItem::new("p1", "Mug", Decimal::from(10), 1, "x"));

    let reopened = CartStore::new(FileSlot::new(dir.path()));

    assert_eq!(reopened.total_items(), 1);

    Ok(())
}

#[test]
fn cleared_cart_persists_as_empty_list() -> TestResult {
    let dir = tempdir()?;

    let mut store = CartStore::new(FileSlot::new(dir.path()));
    store.add_item(CartItem::new("p1", "Mug", Decimal::from(10), 1, "x"));
    store.clear_cart();

    let contents = fs::read_to_string(dir.path().join("ecommerce-cart.json"))?;

    assert_eq!(contents, "[]");
    assert!(CartStore::new(FileSlot::new(dir.path())).state().is_empty());

    Ok(())
}
