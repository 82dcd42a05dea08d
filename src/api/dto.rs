//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name                 | Description                               |
// |----------------------|-------------------------------------------|
// | PlaceOrderRequest    | Request to place a limit or market order  |
// | PlaceOrderResponse   | Assigned id plus any immediate fills      |
// | MatchedOrder         | One fill from the taker's point of view   |
// | CancelOrderResponse  | Confirmation of a cancellation            |
// | LevelResponse        | One price level with its total volume     |
// | PriceResponse        | A single best-price value                 |
//--------------------------------------------------------------------------------------------------

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Market, Match, Order, OrderId, OrderType, OwnerId, Side};

/// Request to place a new order. `price` is required for limit orders and
/// ignored for market orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Party placing the order.
    pub owner: OwnerId,
    /// Market to place the order in.
    pub market: Market,
    /// Side of the order.
    pub side: Side,
    /// Limit or Market.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Limit price, for limit orders.
    pub price: Option<Decimal>,
    /// Order quantity.
    pub size: Decimal,
}

impl PlaceOrderRequest {
    /// Builds the order this request describes.
    pub fn into_order(self) -> Order {
        Order::new(self.side, self.size, self.owner)
    }
}

/// One fill, reported from the taker's point of view: `id` is the resting
/// counterparty order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedOrder {
    pub price: Decimal,
    pub size_filled: Decimal,
    pub id: OrderId,
}

impl MatchedOrder {
    pub fn from_match(m: &Match, taker_side: Side) -> Self {
        let id = match taker_side {
            Side::Bid => m.ask,
            Side::Ask => m.bid,
        };
        Self {
            price: m.price,
            size_filled: m.size_filled,
            id,
        }
    }
}

/// Response to a successfully placed order. `matches` is empty for limit
/// orders, which always rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub order_id: OrderId,
    pub message: String,
    pub matches: Vec<MatchedOrder>,
}

/// Response to a successful cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    pub order_id: OrderId,
    pub message: String,
}

/// One price level on a side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelResponse {
    pub price: Decimal,
    pub total_volume: Decimal,
}

/// A single best-price value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResponse {
    pub price: Decimal,
}
