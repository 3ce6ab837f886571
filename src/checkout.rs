//! Checkout
//!
//! Builds order submissions from the cart and hands them to an [`OrderGateway`]. The cart is
//! cleared only after the gateway accepts the order.

use mockall::automock;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::{self, CartItem, CartState, ProductId},
    storage::CartSlot,
    store::CartStore,
};

/// Customer details collected by the checkout form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Full name (required).
    pub customer_name: String,

    /// Contact email (required).
    pub email: String,

    /// Contact phone (required).
    pub phone: String,

    /// Street address (required).
    pub address: String,

    /// City.
    pub city: String,

    /// Postal code.
    pub zip_code: String,
}

impl CustomerDetails {
    fn require(&self) -> Result<(), CheckoutError> {
        [
            ("customerName", &self.customer_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |(field, _)| Err(CheckoutError::MissingField(field)))
    }

    fn delivery_address(&self) -> String {
        let locality = format!("{} {}", self.city.trim(), self.zip_code.trim());
        let locality = locality.trim();

        if locality.is_empty() {
            self.address.trim().to_string()
        } else {
            format!("{}, {locality}", self.address.trim())
        }
    }
}

/// Shipping charged on top of the cart subtotal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotals strictly above this ship for free.
    pub free_shipping_threshold: Decimal,

    /// Flat rate charged otherwise.
    pub flat_rate: Decimal,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(1000),
            flat_rate: Decimal::from(50),
        }
    }
}

impl ShippingPolicy {
    /// Shipping charged for a subtotal.
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal > self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_rate
        }
    }

    /// How much more must be spent before shipping becomes free, if anything is still missing.
    pub fn remaining_for_free_shipping(&self, subtotal: Decimal) -> Option<Decimal> {
        (subtotal < self.free_shipping_threshold)
            .then(|| self.free_shipping_threshold - subtotal)
    }
}

/// Order lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet fulfilled.
    New,
}

/// One order line.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Ordered product.
    pub product_id: ProductId,

    /// Product name at add time.
    pub name: String,

    /// Unit price at add time.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,

    /// Units ordered.
    pub quantity: u32,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Order payload sent to the order service.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    /// Customer name.
    pub customer_name: String,

    /// Customer email.
    pub email: String,

    /// Customer phone.
    pub phone: String,

    /// Delivery address including city and postal code.
    pub address: String,

    /// Ordered lines.
    pub items: Vec<OrderItem>,

    /// Sum of line totals.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub subtotal: Decimal,

    /// Shipping charge.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub shipping: Decimal,

    /// Subtotal plus shipping.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,

    /// Always [`OrderStatus::New`] on submission.
    pub status: OrderStatus,
}

impl OrderSubmission {
    /// Builds an order from the cart.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::MissingField`]: a required customer field is blank.
    pub fn from_cart(
        state: &CartState,
        customer: &CustomerDetails,
        policy: &ShippingPolicy,
    ) -> Result<Self, CheckoutError> {
        if state.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        customer.require()?;

        let subtotal = cart::total_price(state);
        let shipping = policy.shipping_for(subtotal);

        Ok(Self {
            customer_name: customer.customer_name.trim().to_string(),
            email: customer.email.trim().to_string(),
            phone: customer.phone.trim().to_string(),
            address: customer.delivery_address(),
            items: state.items.iter().map(OrderItem::from).collect(),
            subtotal,
            shipping,
            total: subtotal.saturating_add(shipping),
            status: OrderStatus::New,
        })
    }

    /// The order total as money in the given currency.
    pub fn total_money<'a>(&self, currency: &'a Currency) -> Money<'a, Currency> {
        Money::from_decimal(self.total, currency)
    }
}

/// Acknowledgement returned by the order service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Identifier assigned to the order.
    pub order_id: String,
}

/// An accepted order: what was submitted and what the order service answered.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedOrder {
    /// The submission the gateway accepted.
    pub order: OrderSubmission,

    /// The gateway's acknowledgement.
    pub receipt: OrderReceipt,
}

/// Order service errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The service refused the order.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The service could not be reached.
    #[error("order service unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Checkout errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A required customer field was blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Submission failed.
    #[error("failed to create order")]
    Gateway(#[from] GatewayError),
}

/// Destination for order submissions.
#[automock]
pub trait OrderGateway {
    /// Submits an order.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the order is not accepted.
    fn submit(&mut self, order: &OrderSubmission) -> Result<OrderReceipt, GatewayError>;
}

impl<S: CartSlot> CartStore<S> {
    /// Places an order for the cart's contents and clears the cart once it is accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the order cannot be built or is not accepted; the cart is
    /// left untouched.
    pub fn checkout<G: OrderGateway + ?Sized>(
        &mut self,
        customer: &CustomerDetails,
        policy: &ShippingPolicy,
        gateway: &mut G,
    ) -> Result<CompletedOrder, CheckoutError> {
        let order = OrderSubmission::from_cart(self.state(), customer, policy)?;
        let receipt = gateway.submit(&order)?;

        info!(
            order_id = %receipt.order_id,
            total = %order.total,
            lines = order.items.len(),
            "order placed"
        );

        self.clear_cart();

        Ok(CompletedOrder { order, receipt })
    }
}

/// Formats an amount for display in the given currency.
pub fn format_price(amount: Decimal, currency: &Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;
    use crate::storage::MemorySlot;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            customer_name: "Ana Reyes".to_string(),
            email: "ana@example.com".to_string(),
            phone: "0917 000 0000".to_string(),
            address: "12 Mabini St".to_string(),
            city: "Quezon City".to_string(),
            zip_code: "1100".to_string(),
        }
    }

    fn cart(items: Vec<CartItem>) -> CartState {
        CartState {
            items,
            is_open: false,
        }
    }

    fn mug(quantity: u32) -> CartItem {
        CartItem::new("p1", "Mug", Decimal::from(250), quantity, "mug.jpg")
    }

    #[test]
    fn shipping_is_free_only_above_threshold() {
        let policy = ShippingPolicy::default();

        assert_eq!(policy.shipping_for(Decimal::from(1000)), Decimal::from(50));
        assert_eq!(policy.shipping_for(Decimal::new(100_001, 2)), Decimal::ZERO);
    }

    #[test]
    fn remaining_for_free_shipping_counts_down_to_threshold() {
        let policy = ShippingPolicy::default();

        assert_eq!(
            policy.remaining_for_free_shipping(Decimal::new(75_050, 2)),
            Some(Decimal::new(24_950, 2))
        );
        assert_eq!(policy.remaining_for_free_shipping(Decimal::from(1000)), None);
        assert_eq!(policy.remaining_for_free_shipping(Decimal::from(1500)), None);
    }

    #[test]
    fn from_cart_saturates_huge_totals() -> TestResult {
        let policy = ShippingPolicy {
            free_shipping_threshold: Decimal::MAX,
            flat_rate: Decimal::from(50),
        };

        let order = OrderSubmission::from_cart(
            &cart(vec![CartItem::new("p1", "Big", Decimal::MAX, 2, "x")]),
            &customer(),
            &policy,
        )?;

        assert_eq!(order.subtotal, Decimal::MAX);
        assert_eq!(order.shipping, Decimal::from(50));
        assert_eq!(order.total, Decimal::MAX);

        Ok(())
    }

    #[test]
    fn from_cart_builds_totals_and_lines() -> TestResult {
        let order = OrderSubmission::from_cart(
            &cart(vec![mug(2)]),
            &customer(),
            &ShippingPolicy::default(),
        )?;

        assert_eq!(order.subtotal, Decimal::from(500));
        assert_eq!(order.shipping, Decimal::from(50));
        assert_eq!(order.total, Decimal::from(550));
        assert_eq!(order.address, "12 Mabini St, Quezon City 1100");
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(
            order.items,
            vec![OrderItem {
                product_id: "p1".into(),
                name: "Mug".to_string(),
                price: Decimal::from(250),
                quantity: 2,
            }]
        );

        Ok(())
    }

    #[test]
    fn address_without_locality_is_left_alone() -> TestResult {
        let details = CustomerDetails {
            city: String::new(),
            zip_code: " ".to_string(),
            ..customer()
        };

        let order =
            OrderSubmission::from_cart(&cart(vec![mug(1)]), &details, &ShippingPolicy::default())?;

        assert_eq!(order.address, "12 Mabini St");

        Ok(())
    }

    #[test]
    fn from_cart_rejects_empty_cart() {
        let result =
            OrderSubmission::from_cart(&cart(Vec::new()), &customer(), &ShippingPolicy::default());

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[test]
    fn from_cart_requires_contact_fields() {
        let details = CustomerDetails {
            phone: "  ".to_string(),
            ..customer()
        };

        let result =
            OrderSubmission::from_cart(&cart(vec![mug(1)]), &details, &ShippingPolicy::default());

        assert!(
            matches!(result, Err(CheckoutError::MissingField("phone"))),
            "expected missing phone, got {result:?}"
        );
    }

    #[test]
    fn submission_serializes_like_the_order_api_expects() -> TestResult {
        let order = OrderSubmission::from_cart(
            &cart(vec![mug(1)]),
            &customer(),
            &ShippingPolicy::default(),
        )?;

        let value = serde_json::to_value(&order)?;

        assert_eq!(value["customerName"], "Ana Reyes");
        assert_eq!(value["status"], "new");
        assert_eq!(value["items"][0]["productId"], "p1");
        assert!(value["total"].is_number(), "total should be a JSON number");

        Ok(())
    }

    #[test]
    fn checkout_clears_cart_after_acceptance() -> TestResult {
        let mut store = CartStore::new(MemorySlot::new());
        store.add_item(mug(5));

        let mut gateway = MockOrderGateway::new();
        gateway
            .expect_submit()
            .withf(|order| order.total == Decimal::from(1250) && order.shipping.is_zero())
            .times(1)
            .returning(|_| {
                Ok(OrderReceipt {
                    order_id: "ord-1".to_string(),
                })
            });

        let completed = store.checkout(&customer(), &ShippingPolicy::default(), &mut gateway)?;

        assert_eq!(completed.receipt.order_id, "ord-1");
        assert_eq!(completed.order.total, Decimal::from(1250));
        assert_eq!(
            completed.order.total_money(iso::PHP).to_string(),
            format_price(Decimal::from(1250), iso::PHP)
        );
        assert!(store.items().is_empty());
        assert_eq!(store.slot().payload(), Some("[]"));

        Ok(())
    }

    #[test]
    fn rejected_checkout_keeps_cart() {
        let mut store = CartStore::new(MemorySlot::new());
        store.add_item(mug(1));

        let mut gateway = MockOrderGateway::new();
        gateway
            .expect_submit()
            .returning(|_| Err(GatewayError::Rejected("out of stock".to_string())));

        let result = store.checkout(&customer(), &ShippingPolicy::default(), &mut gateway);

        assert!(
            matches!(result, Err(CheckoutError::Gateway(GatewayError::Rejected(_)))),
            "expected rejection, got {result:?}"
        );
        assert_eq!(store.items(), [mug(1)]);
    }

    #[test]
    fn invalid_checkout_never_reaches_gateway() {
        let mut store = CartStore::new(MemorySlot::new());

        let mut gateway = MockOrderGateway::new();
        gateway.expect_submit().never();

        let result = store.checkout(&customer(), &ShippingPolicy::default(), &mut gateway);

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[test]
    fn total_money_keeps_the_amount() -> TestResult {
        let order = OrderSubmission::from_cart(
            &cart(vec![mug(1)]),
            &customer(),
            &ShippingPolicy::default(),
        )?;

        assert_eq!(
            order.total_money(iso::PHP),
            Money::from_minor(30_000, iso::PHP)
        );

        Ok(())
    }

    #[test]
    fn format_price_uses_currency_symbol() {
        assert_eq!(format_price(Decimal::new(3050, 2), iso::USD), "$30.50");
    }
}
