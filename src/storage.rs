//! Durable cart storage.
//!
//! The cart persists through a single named slot holding the serialized item list. The slot
//! is reached through [`CartSlot`] so the store can run against [`MemorySlot`] in tests and
//! [`FileSlot`] on disk.

use mockall::automock;
use thiserror::Error;

use crate::cart::CartItem;

mod file;
mod memory;

pub use file::FileSlot;
pub use memory::MemorySlot;

/// Fixed, versionless key of the cart slot.
pub const CART_STORAGE_KEY: &str = "ecommerce-cart";

/// Errors raised by a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage I/O error")]
    Io(#[from] std::io::Error),

    /// Storage refused the operation (unavailable, quota exceeded, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A single durable key-value slot holding the serialized cart items.
#[automock]
pub trait CartSlot {
    /// Reads the slot, returning `None` when nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the slot cannot be read.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Overwrites the slot with the given payload.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the slot cannot be written.
    fn write(&mut self, payload: &str) -> Result<(), StorageError>;
}

/// Serializes cart items into the slot representation.
///
/// # Errors
///
/// Returns a `serde_json::Error` if an item cannot be represented as JSON.
pub fn encode_items(items: &[CartItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Parses the slot representation back into cart items.
///
/// # Errors
///
/// Returns a `serde_json::Error` if the payload is not a list of cart items.
pub fn decode_items(payload: &str) -> Result<Vec<CartItem>, serde_json::Error> {
    serde_json::from_str(payload)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_payload_written_by_the_web_storefront() -> TestResult {
        let items = decode_items(
            r#"[{"productId":"64f1","name":"Mug","price":249.5,"quantity":2,"image":"/uploads/mug.jpg"}]"#,
        )?;

        assert_eq!(
            items,
            vec![CartItem::new(
                "64f1",
                "Mug",
                Decimal::new(2495, 1),
                2,
                "/uploads/mug.jpg"
            )]
        );

        Ok(())
    }

    #[test]
    fn encoded_items_decode_to_the_same_list() -> TestResult {
        let items = vec![
            CartItem::new("p1", "Mug", Decimal::new(1099, 2), 3, "mug.jpg"),
            CartItem::new("p2", "Lamp", Decimal::from(45), 1, "lamp.jpg"),
            CartItem::new(
                "p3",
                "Rug",
                Decimal::from_i128_with_scale(1_234_567_891_234_567_891, 12),
                1,
                "rug.jpg",
            ),
        ];

        let payload = encode_items(&items)?;

        assert!(
            payload.contains(r#""price":1234567.891234567891"#),
            "price should be an exact JSON number: {payload}"
        );
        assert_eq!(decode_items(&payload)?, items);

        Ok(())
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        assert!(decode_items(r#"{"items":[]}"#).is_err());
        assert!(decode_items("").is_err());
    }
}
