//! Cart Items

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Opaque catalog identity of a product.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One product line in the cart.
///
/// Name, price and image are a snapshot of the catalog entry taken when the product was first
/// added; they are never re-synced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: ProductId,

    /// Product name at add time.
    pub name: String,

    /// Unit price at add time.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,

    /// Number of units held, at least 1 while the line exists.
    pub quantity: u32,

    /// Product image reference at add time.
    pub image: String,
}

impl CartItem {
    /// Creates a new cart line.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        quantity: u32,
        image: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity,
            image: image.into(),
        }
    }

    /// Price of the whole line (unit price multiplied by quantity).
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or_else(|| {
                warn!(product = %self.product_id, "line total overflowed, saturating");

                Decimal::MAX
            })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = CartItem::new("p1", "Mug", Decimal::new(1050, 2), 3, "mug.jpg");

        assert_eq!(item.line_total(), Decimal::new(3150, 2));
    }

    #[test]
    fn line_total_saturates_instead_of_overflowing() {
        let item = CartItem::new("p1", "Big", Decimal::MAX, 2, "x");

        assert_eq!(item.line_total(), Decimal::MAX);
    }

    #[test]
    fn price_keeps_every_digit_through_json() -> TestResult {
        let price = Decimal::from_i128_with_scale(1_234_567_891_234_567_891, 12);
        let item = CartItem::new("p1", "Mug", price, 1, "x");

        let decoded: CartItem = serde_json::from_str(&serde_json::to_string(&item)?)?;

        assert_eq!(decoded.price, price);
        assert_eq!(decoded, item);

        Ok(())
    }

    #[test]
    fn deserializes_camel_case_records() -> TestResult {
        let item: CartItem = serde_json::from_str(
            r#"{"productId":"p1","name":"Mug","price":10.5,"quantity":2,"image":"x"}"#,
        )?;

        assert_eq!(item.product_id, ProductId::from("p1"));
        assert_eq!(item.price, Decimal::new(105, 1));
        assert_eq!(item.quantity, 2);

        Ok(())
    }

    #[test]
    fn serializes_price_as_number() -> TestResult {
        let item = CartItem::new("p1", "Mug", Decimal::new(1099, 2), 1, "x");

        let value = serde_json::to_value(&item)?;

        assert!(value["price"].is_number(), "price should be a JSON number");
        assert_eq!(value["productId"], "p1");

        Ok(())
    }
}
