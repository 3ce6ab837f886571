//! File-backed order gateway

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use serde::Serialize;
use storefront::checkout::{GatewayError, OrderGateway, OrderReceipt, OrderSubmission};
use tracing::debug;
use uuid::Uuid;

/// Appends accepted orders to a JSON-lines file.
#[derive(Debug, Clone)]
pub(crate) struct JsonlOrderGateway {
    path: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlacedOrder<'a> {
    id: Uuid,

    #[serde(flatten)]
    order: &'a OrderSubmission,
}

impl JsonlOrderGateway {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(file, "{line}")
    }
}

impl OrderGateway for JsonlOrderGateway {
    fn submit(&mut self, order: &OrderSubmission) -> Result<OrderReceipt, GatewayError> {
        let id = Uuid::now_v7();

        let line = serde_json::to_string(&PlacedOrder { id, order })
            .map_err(|error| GatewayError::Unavailable(Box::new(error)))?;

        self.append(&line)
            .map_err(|error| GatewayError::Unavailable(Box::new(error)))?;

        debug!(order_id = %id, path = %self.path.display(), "order appended");

        Ok(OrderReceipt {
            order_id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use storefront::{
        cart::{CartItem, CartState},
        checkout::{CustomerDetails, ShippingPolicy},
    };
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    fn order() -> TestResult<OrderSubmission> {
        let state = CartState {
            items: vec![CartItem::new("p1", "Mug", Decimal::from(10), 1, "x")],
            is_open: false,
        };

        let customer = CustomerDetails {
            customer_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "0917".to_string(),
            address: "12 Mabini St".to_string(),
            ..CustomerDetails::default()
        };

        Ok(OrderSubmission::from_cart(
            &state,
            &customer,
            &ShippingPolicy::default(),
        )?)
    }

    #[test]
    fn submit_appends_one_line_per_order() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("orders.jsonl");
        let mut gateway = JsonlOrderGateway::new(&path);

        let first = gateway.submit(&order()?)?;
        let second = gateway.submit(&order()?)?;

        assert_ne!(first.order_id, second.order_id);

        let contents = fs::read_to_string(&path)?;
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(serde_json::from_str)
            .collect::<Result<_, _>>()?;

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines.first().map(|line| line["id"].clone()),
            Some(serde_json::Value::String(first.order_id))
        );
        assert_eq!(
            lines.first().map(|line| line["customerName"].clone()),
            Some(serde_json::Value::from("Ana"))
        );

        Ok(())
    }
}
