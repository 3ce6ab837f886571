//! Cart Actions

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::cart::{CartItem, ProductId};

/// Every state transition the cart supports.
#[derive(Clone, Debug, PartialEq)]
pub enum CartAction {
    /// Add a line, merging quantities into an existing line for the same product.
    AddItem(CartItem),

    /// Remove the line for a product.
    RemoveItem(ProductId),

    /// Set a line's quantity exactly, removing it when the quantity is zero.
    UpdateQuantity {
        /// Product whose line changes.
        product_id: ProductId,

        /// New quantity.
        quantity: u32,
    },

    /// Remove every line.
    ClearCart,

    /// Flip the cart's open flag.
    ToggleCart,

    /// Replace every line; used for hydration.
    SetCart(Vec<CartItem>),
}

impl CartAction {
    /// Whether the items list must be persisted after this action.
    pub fn persists_items(&self) -> bool {
        !matches!(self, Self::ToggleCart)
    }

    /// Wire tag of the action.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddItem(_) => ADD_ITEM,
            Self::RemoveItem(_) => REMOVE_ITEM,
            Self::UpdateQuantity { .. } => UPDATE_QUANTITY,
            Self::ClearCart => CLEAR_CART,
            Self::ToggleCart => TOGGLE_CART,
            Self::SetCart(_) => SET_CART,
        }
    }
}

const ADD_ITEM: &str = "ADD_ITEM";
const REMOVE_ITEM: &str = "REMOVE_ITEM";
const UPDATE_QUANTITY: &str = "UPDATE_QUANTITY";
const CLEAR_CART: &str = "CLEAR_CART";
const TOGGLE_CART: &str = "TOGGLE_CART";
const SET_CART: &str = "SET_CART";

/// Errors raised while decoding an externally supplied action record.
#[derive(Debug, Error)]
pub enum ActionDecodeError {
    /// The record was not a JSON object with a `type` tag.
    #[error("malformed action record: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The tag was recognised but its payload had the wrong shape.
    #[error("invalid payload for {kind}: {source}")]
    Payload {
        /// Tag of the offending record.
        kind: String,

        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ActionRecord {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    payload: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuantityPayload {
    product_id: ProductId,
    quantity: u32,
}

/// Decodes an action record of the form `{"type": "ADD_ITEM", "payload": ...}`.
///
/// Records with an unrecognised `type` decode to `Ok(None)` so callers can skip them.
///
/// # Errors
///
/// - [`ActionDecodeError::Malformed`]: the input is not an action record.
/// - [`ActionDecodeError::Payload`]: the payload does not match the tag.
pub fn decode_action(raw: &str) -> Result<Option<CartAction>, ActionDecodeError> {
    let ActionRecord { kind, payload } =
        serde_json::from_str(raw).map_err(ActionDecodeError::Malformed)?;

    let payload_error = |source| ActionDecodeError::Payload {
        kind: kind.clone(),
        source,
    };

    let action = match kind.as_str() {
        ADD_ITEM => CartAction::AddItem(
            serde_json::from_value(payload).map_err(payload_error)?,
        ),
        REMOVE_ITEM => CartAction::RemoveItem(
            serde_json::from_value(payload).map_err(payload_error)?,
        ),
        UPDATE_QUANTITY => {
            let QuantityPayload {
                product_id,
                quantity,
            } = serde_json::from_value(payload).map_err(payload_error)?;

            CartAction::UpdateQuantity {
                product_id,
                quantity,
            }
        }
        CLEAR_CART => CartAction::ClearCart,
        TOGGLE_CART => CartAction::ToggleCart,
        SET_CART => CartAction::SetCart(
            serde_json::from_value(payload).map_err(payload_error)?,
        ),
        _ => return Ok(None),
    };

    Ok(Some(action))
}
